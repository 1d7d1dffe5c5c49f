//! Stage 1: room placement
//!
//! Drops non-overlapping rectangular rooms onto the grid under a retry
//! budget. Odd interior dimensions and even top-left corners keep every
//! room on the same parity lattice as the maze, so corridors abut room
//! interiors cleanly and connector candidates land on even-parity walls.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::MapRng;
use crate::consts::SAMPLE_LIMIT;

use super::config::{DimRange, GenConfig};
use super::errors::GenerationError;
use super::grid::Grid;
use super::progress::ProgressSink;
use super::region::RegionCounter;
use super::room::Room;
use super::tile::{NO_ROOM, TileKind};

/// Place up to `config.max_rooms` rooms, stopping after
/// `config.max_place_tries` consecutive rejected candidates.
///
/// Each accepted room stamps its index over the full rectangle (wall border
/// included), floors the interior, and tags it with a fresh region id. The
/// number of accepted rooms is non-deterministic; running out of retries is
/// normal termination, not an error.
pub fn place_rooms(
    grid: &mut Grid,
    regions: &mut RegionCounter,
    config: &GenConfig,
    rng: &mut MapRng,
    sink: &mut dyn ProgressSink,
) -> Result<Vec<Room>, GenerationError> {
    let mut rooms = Vec::new();
    let mut tries = 0;

    while tries < config.max_place_tries && rooms.len() < config.max_rooms {
        let w = sample_odd(rng, config.room_width)?;
        let h = sample_odd(rng, config.room_height)?;
        let x0 = sample_even(rng, grid.width() - w)?;
        let y0 = sample_even(rng, grid.height() - h)?;

        let room = Room::new(x0, y0, w, h);
        if room.x1 % 2 != 0 || room.y1 % 2 != 0 {
            return Err(GenerationError::Invariant("room corner parity"));
        }

        if collides(grid, &room) {
            tries += 1;
            continue;
        }

        stamp(grid, &room, rooms.len() as i16, regions);
        rooms.push(room);
        tries = 0;
        sink.room_placed(&room);
    }

    Ok(rooms)
}

/// Draw from `range` until the value is odd
fn sample_odd(rng: &mut MapRng, range: DimRange) -> Result<usize, GenerationError> {
    for _ in 0..SAMPLE_LIMIT {
        let v = rng.range(range.lo as i32, range.hi as i32) as usize;
        if v % 2 == 1 {
            return Ok(v);
        }
    }
    Err(GenerationError::RngExhausted {
        limit: SAMPLE_LIMIT,
    })
}

/// Draw from 0..=max until the value is even
fn sample_even(rng: &mut MapRng, max: usize) -> Result<usize, GenerationError> {
    for _ in 0..SAMPLE_LIMIT {
        let v = rng.range(0, max as i32) as usize;
        if v % 2 == 0 {
            return Ok(v);
        }
    }
    Err(GenerationError::RngExhausted {
        limit: SAMPLE_LIMIT,
    })
}

/// Check if the rectangle touches open floor or an existing room.
///
/// Testing the room stamp as well as the floor kind keeps whole rectangles
/// disjoint; a floor-only test would let two rooms share a border wall.
fn collides(grid: &Grid, room: &Room) -> bool {
    for x in room.x0..=room.x1 {
        for y in room.y0..=room.y1 {
            let t = grid.tile(x, y);
            if t.kind == TileKind::Floor || t.room != NO_ROOM {
                return true;
            }
        }
    }
    false
}

/// Write the accepted room into the grid
fn stamp(grid: &mut Grid, room: &Room, index: i16, regions: &mut RegionCounter) {
    for x in room.x0..=room.x1 {
        for y in room.y0..=room.y1 {
            grid.tile_mut(x, y).room = index;
        }
    }

    let region = regions.alloc();
    for x in room.x0 + 1..room.x1 {
        for y in room.y0 + 1..room.y1 {
            let t = grid.tile_mut(x, y);
            t.kind = TileKind::Floor;
            t.region = region;
        }
    }
}
