//! Dungeon map generation
//!
//! The four-stage pipeline over a labelled-tile grid: room placement, maze
//! carving, region connection, dead-end pruning.

mod config;
mod connect;
mod errors;
mod generation;
mod grid;
mod maze;
mod progress;
mod prune;
mod region;
mod room;
mod rooms;
mod tile;

pub use config::{CorridorWeights, DimRange, GenConfig};
pub use connect::{MAIN_REGION, connect_regions};
pub use errors::GenerationError;
pub use generation::Generator;
pub use grid::Grid;
pub use maze::{carve_maze, unused_odd_cells};
pub use progress::{NullSink, ProgressSink, StageMask};
pub use prune::remove_dead_ends;
pub use region::{NO_REGION, RegionCounter, RegionId, absorb};
pub use room::Room;
pub use rooms::place_rooms;
pub use tile::{NO_ROOM, Tile, TileKind};
