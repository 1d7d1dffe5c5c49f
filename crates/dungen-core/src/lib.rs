//! dungen-core: rooms-and-corridors dungeon map generation
//!
//! Builds a connected floor plan on a fixed-size grid: rectangular rooms on
//! an odd-aligned lattice, a perfect maze grown through the leftover space,
//! doors opened between regions until the map is one region, and corridor
//! dead ends pruned away.
//!
//! The crate is pure logic with no I/O. Rendering, input, and the process
//! main loop are host concerns; the core only consumes a seeded random
//! source and optionally reports progress through [`dungeon::ProgressSink`].
//!
//! Supports `no_std` environments by disabling the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod dungeon;

mod consts;
mod rng;

pub use consts::*;
pub use rng::MapRng;
