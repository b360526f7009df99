use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Stored as the adjacent count of mine cells, where a count has no meaning.
pub const MINE_SENTINEL: u8 = u8::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mine,
    Safe,
}

/// Player-facing state of a cell. Being a single enum a cell can never be
/// revealed and flagged at the same time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub state: CellState,
    adjacent_mines: u8,
}

impl Cell {
    pub const fn safe() -> Self {
        Self {
            kind: CellKind::Safe,
            state: CellState::Hidden,
            adjacent_mines: 0,
        }
    }

    pub const fn mine() -> Self {
        Self {
            kind: CellKind::Mine,
            state: CellState::Hidden,
            adjacent_mines: MINE_SENTINEL,
        }
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    /// Count of mines around a safe cell, `None` for mines.
    pub const fn adjacent_mines(&self) -> Option<u8> {
        match self.kind {
            CellKind::Mine => None,
            CellKind::Safe => Some(self.adjacent_mines),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::safe()
    }
}

/// Fixed size grid of cells indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Builds a fully hidden board, `true` marks a mine.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let rows = Coord::try_from(rows).map_err(|_| GameError::InvalidBoardShape)?;
        let cols = Coord::try_from(cols).map_err(|_| GameError::InvalidBoardShape)?;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = mine_mask.map(|&is_mine| if is_mine { Cell::mine() } else { Cell::safe() });
        let mine_count = cells.iter().filter(|cell| cell.is_mine()).count() as CellCount;
        let mut board = Self {
            cells,
            mine_count,
            revealed_count: 0,
            flagged_count: 0,
        };
        board.compute_adjacent_counts();
        Ok(board)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    /// Fills in the Moore-neighborhood mine count of every safe cell.
    pub fn compute_adjacent_counts(&mut self) {
        for coords in self.positions() {
            let count = if self[coords].is_mine() {
                MINE_SENTINEL
            } else {
                self.neighbors(coords).filter(|&pos| self[pos].is_mine()).count() as u8
            };
            self.cells[coords.to_nd_index()].adjacent_mines = count;
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows(), self.cols())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Safe cells revealed so far, mines shown after a loss are not counted.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn mines_left(&self) -> isize {
        self.mine_count as isize - self.flagged_count as isize
    }

    /// Every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.safe_cell_count()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn safe_positions(&self) -> Vec<Coord2> {
        self.positions().filter(|&pos| !self[pos].is_mine()).collect()
    }

    pub fn mine_positions(&self) -> Vec<Coord2> {
        self.positions().filter(|&pos| self[pos].is_mine()).collect()
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn record_revealed(&mut self) {
        self.revealed_count += 1;
    }

    pub(crate) fn record_flag(&mut self, flagged: bool) {
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn counts_mines_in_moore_neighborhood() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board[(1, 1)].adjacent_mines(), Some(2));
        assert_eq!(board[(0, 1)].adjacent_mines(), Some(1));
        assert_eq!(board[(0, 2)].adjacent_mines(), Some(0));
        assert_eq!(board[(0, 0)].adjacent_mines(), None);
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 7);
    }

    #[test]
    fn every_neighbor_mine_counts_up_to_eight() {
        let mines: Vec<_> = Board::from_mine_coords((3, 3), &[])
            .unwrap()
            .positions()
            .filter(|&pos| pos != (1, 1))
            .collect();
        let board = Board::from_mine_coords((3, 3), &mines).unwrap();

        assert_eq!(board[(1, 1)].adjacent_mines(), Some(8));
        assert_eq!(board.safe_positions(), [(1, 1)]);
    }

    #[test]
    fn mask_rows_and_cols_follow_array_shape() {
        let mask = Array2::from_shape_vec((2, 3), vec![false, true, false, false, false, false]).unwrap();
        let board = Board::from_mine_mask(&mask).unwrap();

        assert_eq!(board.size(), (2, 3));
        assert_eq!(board.mine_positions(), [(0, 1)]);
        assert_eq!(board[(1, 0)].adjacent_mines(), Some(1));
        assert_eq!(board[(1, 2)].adjacent_mines(), Some(1));
    }

    #[test]
    fn rejects_empty_and_oversized_shapes() {
        let empty: Array2<bool> = Array2::default([0, 4]);
        let wide: Array2<bool> = Array2::default([1, 300]);

        assert_eq!(Board::from_mine_mask(&empty), Err(GameError::InvalidBoardShape));
        assert_eq!(Board::from_mine_mask(&wide), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn rejects_mines_outside_the_board() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn validates_coordinates() {
        let board = Board::from_mine_coords((2, 3), &[]).unwrap();

        assert_eq!(board.validate_coords((1, 2)), Ok((1, 2)));
        assert_eq!(board.validate_coords((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.validate_coords((0, 3)), Err(GameError::InvalidCoords));
    }
}
