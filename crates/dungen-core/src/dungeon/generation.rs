//! Generation pipeline
//!
//! Runs the four stages in order over a shared grid: room placement, maze
//! carving, region connection, dead-end pruning. Each stage leaves the grid
//! in a stronger invariant than it found.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::MapRng;

use super::config::GenConfig;
use super::connect::connect_regions;
use super::errors::GenerationError;
use super::grid::Grid;
use super::maze::carve_maze;
use super::progress::{NullSink, ProgressSink, StageMask};
use super::prune::remove_dead_ends;
use super::region::RegionCounter;
use super::room::Room;
use super::rooms::place_rooms;

/// Owns the grid and room table and drives the pipeline.
///
/// The grid is allocated once and reset in place per generation, so a
/// generator can be reused to produce many maps.
#[derive(Debug)]
pub struct Generator {
    config: GenConfig,
    grid: Grid,
    rooms: Vec<Room>,
}

impl Generator {
    /// Validate the configuration and allocate the grid.
    pub fn new(config: GenConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self {
            config,
            grid,
            rooms: Vec::new(),
        })
    }

    /// Build a generator and run one generation.
    pub fn new_generated(config: GenConfig, rng: &mut MapRng) -> Result<Self, GenerationError> {
        let mut generator = Self::new(config)?;
        generator.generate(rng)?;
        Ok(generator)
    }

    /// The active configuration
    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    /// The generated grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Accepted rooms in placement order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Run a full generation without progress reporting.
    pub fn generate(&mut self, rng: &mut MapRng) -> Result<(), GenerationError> {
        self.generate_with(rng, &mut NullSink)
    }

    /// Run a full generation, reporting progress for the stages enabled in
    /// the configured [`StageMask`].
    ///
    /// The sink observes the pipeline but cannot influence it; any sink
    /// produces the same map as [`NullSink`] for the same seed.
    pub fn generate_with(
        &mut self,
        rng: &mut MapRng,
        sink: &mut dyn ProgressSink,
    ) -> Result<(), GenerationError> {
        self.grid.reset();
        self.rooms.clear();

        let mut regions = RegionCounter::new();
        let mut null = NullSink;
        let stages = self.config.stages;

        {
            let s: &mut dyn ProgressSink = if stages.contains(StageMask::ROOMS) {
                &mut *sink
            } else {
                &mut null
            };
            self.rooms = place_rooms(&mut self.grid, &mut regions, &self.config, rng, s)?;
        }

        {
            let s: &mut dyn ProgressSink = if stages.contains(StageMask::MAZE) {
                &mut *sink
            } else {
                &mut null
            };
            carve_maze(&mut self.grid, &mut regions, &self.config.weights, rng, s);
        }

        {
            let s: &mut dyn ProgressSink = if stages.contains(StageMask::CONNECT) {
                &mut *sink
            } else {
                &mut null
            };
            connect_regions(&mut self.grid, rng, s);
        }

        {
            let s: &mut dyn ProgressSink = if stages.contains(StageMask::PRUNE) {
                &mut *sink
            } else {
                &mut null
            };
            remove_dead_ends(&mut self.grid, s);
        }

        Ok(())
    }
}
