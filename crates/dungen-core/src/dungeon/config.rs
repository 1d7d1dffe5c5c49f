//! Generator configuration

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_HEIGHT, DEFAULT_MAX_ROOMS, DEFAULT_PLACE_TRIES, DEFAULT_ROOM_HEIGHT,
    DEFAULT_ROOM_WIDTH, DEFAULT_WIDTH, MIN_ROOM_DIM,
};

use super::errors::GenerationError;
use super::progress::StageMask;

/// Inclusive integer range a room dimension is drawn from.
///
/// Endpoints need not be odd; sampling rejects even draws, so the range only
/// has to contain at least one odd value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimRange {
    pub lo: usize,
    pub hi: usize,
}

impl DimRange {
    /// Create a range from inclusive endpoints
    pub const fn new(lo: usize, hi: usize) -> Self {
        Self { lo, hi }
    }

    /// Check that lo..=hi contains at least one odd integer
    pub const fn contains_odd(&self) -> bool {
        self.lo % 2 == 1 || self.hi > self.lo
    }
}

/// Relative weights for the maze walk's direction choice.
///
/// `forward` weighs continuing in the previous direction, `turn` weighs the
/// two perpendicular options. Equal weights give the classic uniform walk;
/// raising `forward` straightens corridors, raising `turn` makes them
/// twistier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorWeights {
    pub forward: u32,
    pub turn: u32,
}

impl Default for CorridorWeights {
    fn default() -> Self {
        Self {
            forward: 1,
            turn: 1,
        }
    }
}

/// Map generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Grid columns; must be odd
    pub width: usize,
    /// Grid rows; must be odd
    pub height: usize,
    /// Cap on accepted rooms; 0 produces a maze-only map
    pub max_rooms: usize,
    /// Outer room width range
    pub room_width: DimRange,
    /// Outer room height range
    pub room_height: DimRange,
    /// Consecutive placement failures allowed before stage 1 stops
    pub max_place_tries: usize,
    /// Maze walk direction weights
    pub weights: CorridorWeights,
    /// Which pipeline stages report progress
    pub stages: StageMask,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_rooms: DEFAULT_MAX_ROOMS,
            room_width: DimRange::new(DEFAULT_ROOM_WIDTH.0, DEFAULT_ROOM_WIDTH.1),
            room_height: DimRange::new(DEFAULT_ROOM_HEIGHT.0, DEFAULT_ROOM_HEIGHT.1),
            max_place_tries: DEFAULT_PLACE_TRIES,
            weights: CorridorWeights::default(),
            stages: StageMask::default(),
        }
    }
}

impl GenConfig {
    /// Check dimension, range, and parity preconditions.
    ///
    /// Runs before any grid is allocated or mutated; a failed check is fatal
    /// to the generation call.
    pub fn validate(&self) -> Result<(), GenerationError> {
        Self::check_dimension("width", self.width, self.min_span(self.room_width))?;
        Self::check_dimension("height", self.height, self.min_span(self.room_height))?;
        Self::check_range("width", self.room_width)?;
        Self::check_range("height", self.room_height)?;

        if self.max_place_tries == 0 {
            return Err(GenerationError::ZeroTries);
        }
        if self.weights.forward == 0 || self.weights.turn == 0 {
            return Err(GenerationError::ZeroWeight);
        }
        Ok(())
    }

    /// Smallest grid span that fits a room from `range` plus the outer walls
    fn min_span(&self, range: DimRange) -> usize {
        if self.max_rooms > 0 {
            range.lo.max(MIN_ROOM_DIM) + 2
        } else {
            MIN_ROOM_DIM + 2
        }
    }

    fn check_dimension(
        axis: &'static str,
        value: usize,
        needed: usize,
    ) -> Result<(), GenerationError> {
        if value % 2 == 0 {
            return Err(GenerationError::EvenDimension { axis, value });
        }
        if value < needed {
            return Err(GenerationError::GridTooSmall {
                axis,
                value,
                needed,
            });
        }
        Ok(())
    }

    fn check_range(axis: &'static str, range: DimRange) -> Result<(), GenerationError> {
        if range.lo > range.hi || range.lo < MIN_ROOM_DIM {
            return Err(GenerationError::BadRoomRange {
                axis,
                lo: range.lo,
                hi: range.hi,
            });
        }
        if !range.contains_odd() {
            return Err(GenerationError::NoOddInRange {
                axis,
                lo: range.lo,
                hi: range.hi,
            });
        }
        Ok(())
    }
}
