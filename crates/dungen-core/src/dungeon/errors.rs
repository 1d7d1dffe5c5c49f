//! Generation errors

use thiserror::Error;

/// Errors surfaced by map generation.
///
/// Configuration variants are reported by validation before any grid
/// mutation. Placement-retry exhaustion in stage 1 is a normal branch, not
/// an error; nothing in the core retries a failed operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("{axis} dimension must be odd, got {value}")]
    EvenDimension { axis: &'static str, value: usize },

    #[error("{axis} dimension {value} is too small, need at least {needed}")]
    GridTooSmall {
        axis: &'static str,
        value: usize,
        needed: usize,
    },

    #[error("room {axis} range {lo}..={hi} is invalid")]
    BadRoomRange {
        axis: &'static str,
        lo: usize,
        hi: usize,
    },

    #[error("room {axis} range {lo}..={hi} contains no odd value")]
    NoOddInRange {
        axis: &'static str,
        lo: usize,
        hi: usize,
    },

    #[error("placement retry budget must be positive")]
    ZeroTries,

    #[error("corridor direction weights must be positive")]
    ZeroWeight,

    #[error("random source produced no usable value in {limit} draws")]
    RngExhausted { limit: u32 },

    #[error("internal invariant violated: {0}")]
    Invariant(&'static str),
}
