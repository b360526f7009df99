use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

pub trait BoardGenerator {
    fn generate<R: Rng + ?Sized>(&self, size: Coord2, rng: &mut R) -> Result<Board>;
}

/// Naive generation: every cell is a mine with the same probability.
///
/// There is no padding around the first click and no guarantee of a minimum
/// number of safe cells.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomBoardGenerator {
    mine_probability: f64,
}

impl RandomBoardGenerator {
    /// One mine for every five safe cells.
    pub const DEFAULT_MINE_PROBABILITY: f64 = 1.0 / 6.0;

    pub fn new(mine_probability: f64) -> Self {
        let mine_probability = if mine_probability.is_nan() {
            log::warn!("Mine probability is not a number, using the default");
            Self::DEFAULT_MINE_PROBABILITY
        } else if !(0.0..=1.0).contains(&mine_probability) {
            log::warn!("Mine probability {mine_probability} out of range, clamped");
            mine_probability.clamp(0.0, 1.0)
        } else {
            mine_probability
        };
        Self { mine_probability }
    }

    pub fn mine_probability(&self) -> f64 {
        self.mine_probability
    }
}

impl Default for RandomBoardGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MINE_PROBABILITY)
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate<R: Rng + ?Sized>(&self, size: Coord2, rng: &mut R) -> Result<Board> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidBoardShape);
        }

        let mine_mask =
            Array2::from_shape_fn(size.to_nd_index(), |_| rng.random_bool(self.mine_probability));
        let board = Board::from_mine_mask(&mine_mask)?;
        log::debug!(
            "generated {}x{} board with {} mines",
            size.0,
            size.1,
            board.mine_count()
        );
        Ok(board)
    }
}

/// Generates a `rows x cols` board where each cell is a mine with `mine_probability`.
pub fn generate<R: Rng + ?Sized>(size: Coord2, mine_probability: f64, rng: &mut R) -> Result<Board> {
    RandomBoardGenerator::new(mine_probability).generate(size, rng)
}
