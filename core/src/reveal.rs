use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Cell was flagged or already revealed.
    NoChange,
    /// Safe cells opened by this reveal, in the order they were opened.
    Revealed(Vec<Coord2>),
    HitMine(Coord2),
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl Board {
    /// Opens a hidden cell, flooding through cells with no adjacent mines.
    ///
    /// Flagged and revealed cells are left alone. Hitting a mine does not
    /// change the board, the caller decides what losing looks like.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        Ok(match cell.state {
            CellState::Revealed | CellState::Flagged => RevealOutcome::NoChange,
            CellState::Hidden if cell.is_mine() => RevealOutcome::HitMine(coords),
            CellState::Hidden => RevealOutcome::Revealed(self.flood_fill(coords)),
        })
    }

    fn flood_fill(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut opened = Vec::new();
        let mut visited = BTreeSet::new();
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            if !visited.insert(coords) {
                continue;
            }

            let cell = self.cell_mut(coords);
            if cell.state != CellState::Hidden || cell.is_mine() {
                continue;
            }
            cell.state = CellState::Revealed;
            let is_zero = cell.adjacent_mines() == Some(0);
            self.record_revealed();
            opened.push(coords);

            if is_zero {
                to_visit.extend(
                    self.neighbors(coords)
                        .filter(|&pos| self[pos].state == CellState::Hidden)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        log::debug!("revealed {} cells from {:?}", opened.len(), start);
        opened
    }

    /// Flips the flag on a hidden cell, revealed cells cannot be flagged.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;

        let cell = self.cell_mut(coords);
        let outcome = match cell.state {
            CellState::Hidden => {
                cell.state = CellState::Flagged;
                FlagOutcome::Flagged
            }
            CellState::Flagged => {
                cell.state = CellState::Hidden;
                FlagOutcome::Unflagged
            }
            CellState::Revealed => FlagOutcome::NoChange,
        };

        if outcome.has_update() {
            self.record_flag(outcome == FlagOutcome::Flagged);
        }
        Ok(outcome)
    }

    /// Shows every mine, dropping flags that were placed on them.
    pub fn reveal_mines(&mut self) {
        for coords in self.mine_positions() {
            if self[coords].is_flagged() {
                self.record_flag(false);
            }
            self.cell_mut(coords).state = CellState::Revealed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn revealed(board: &Board) -> BTreeSet<Coord2> {
        board.positions().filter(|&pos| board[pos].is_revealed()).collect()
    }

    #[test]
    fn reveal_hits_mine_without_touching_the_board() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::HitMine((0, 0))));
        assert!(revealed(&board).is_empty());
    }

    #[test]
    fn numbered_cell_does_not_propagate() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((1, 1)), Ok(RevealOutcome::Revealed(vec![(1, 1)])));
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn flood_fill_opens_zero_region_and_its_border() {
        // column 2 is a wall of mines splitting the board
        let mut board = board((3, 5), &[(0, 2), (1, 2), (2, 2)]);

        let RevealOutcome::Revealed(opened) = board.reveal((1, 0)).unwrap() else {
            panic!("expected a reveal");
        };

        let expected: BTreeSet<_> = [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)].into();
        assert_eq!(opened.iter().copied().collect::<BTreeSet<_>>(), expected);
        assert_eq!(opened.len(), expected.len());
        assert_eq!(revealed(&board), expected);
        assert!(!board.is_cleared());
    }

    #[test]
    fn flood_fill_clears_board_without_mines() {
        let mut board = board((4, 6), &[]);

        let RevealOutcome::Revealed(opened) = board.reveal((2, 3)).unwrap() else {
            panic!("expected a reveal");
        };

        assert_eq!(opened.len(), 24);
        assert!(board.is_cleared());
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut board = board((3, 3), &[]);
        board.toggle_flag((2, 2)).unwrap();

        board.reveal((0, 0)).unwrap();

        assert!(board[(2, 2)].is_flagged());
        assert_eq!(board.revealed_count(), 8);
    }

    #[test]
    fn revealing_twice_is_a_no_op() {
        let mut board = board((3, 3), &[(2, 2)]);
        board.reveal((0, 0)).unwrap();
        let count = board.revealed_count();

        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(board.reveal((1, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(board.revealed_count(), count);
    }

    #[test]
    fn flagged_cells_reject_reveal() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.toggle_flag((0, 0)), Ok(FlagOutcome::Flagged));
        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(board.mines_left(), 0);
    }

    #[test]
    fn flag_toggles_only_while_hidden() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.toggle_flag((1, 1)), Ok(FlagOutcome::Flagged));
        assert_eq!(board.toggle_flag((1, 1)), Ok(FlagOutcome::Unflagged));
        assert_eq!(board.flagged_count(), 0);

        board.reveal((1, 1)).unwrap();
        assert_eq!(board.toggle_flag((1, 1)), Ok(FlagOutcome::NoChange));
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn out_of_range_moves_are_errors() {
        let mut board = board((2, 2), &[]);

        assert_eq!(board.reveal((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn reveal_mines_shows_flagged_and_hidden_mines() {
        let mut board = board((2, 3), &[(0, 0), (1, 2)]);
        board.toggle_flag((0, 0)).unwrap();

        board.reveal_mines();

        assert!(board.mine_positions().iter().all(|&pos| board[pos].is_revealed()));
        assert_eq!(board.flagged_count(), 0);
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn outcomes_serialize_to_json() {
        let mut board = board((2, 2), &[(1, 1)]);
        let outcome = board.reveal((0, 0)).unwrap();

        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"Revealed":[[0,0]]}"#);
        assert_eq!(serde_json::from_str::<RevealOutcome>(&json).unwrap(), outcome);
        assert_eq!(serde_json::to_string(&FlagOutcome::Unflagged).unwrap(), r#""Unflagged""#);
    }
}
