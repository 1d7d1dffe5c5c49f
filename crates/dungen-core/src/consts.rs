//! Generator defaults and limits.

/// Default map dimensions. Both are odd so the outer walls land on even
/// coordinates and corridor cells align to odd coordinates.
pub const DEFAULT_WIDTH: usize = 79;
pub const DEFAULT_HEIGHT: usize = 25;

/// Room limits
pub const DEFAULT_MAX_ROOMS: usize = 16;
pub const DEFAULT_ROOM_WIDTH: (usize, usize) = (7, 10);
pub const DEFAULT_ROOM_HEIGHT: (usize, usize) = (5, 7);

/// Consecutive placement failures allowed before room placement stops
pub const DEFAULT_PLACE_TRIES: usize = 200;

/// Smallest room edge that still encloses an interior cell
pub const MIN_ROOM_DIM: usize = 3;

/// Draws allowed to a rejection-sampling loop before the random source is
/// declared broken
pub const SAMPLE_LIMIT: u32 = 1000;
