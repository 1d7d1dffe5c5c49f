//! Dense tile grid
//!
//! Storage for the map under construction. The grid is allocated once and
//! reset in place at the start of every generation; it is the sole
//! long-lived state of the generator.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use core::fmt;

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileKind};

/// Fixed-size 2D tile array, indexed `[x][y]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Grid {
    /// Create a grid of solid wall
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![Tile::wall(); height]; width],
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get tile at position. Out-of-bounds access panics.
    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[x][y]
    }

    /// Get mutable tile at position. Out-of-bounds access panics.
    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        &mut self.tiles[x][y]
    }

    /// Check if a signed position lies on the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Guarded probe: true iff the position is on the grid and floor
    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.tiles[x as usize][y as usize].kind == TileKind::Floor
    }

    /// Count floor tiles among the four orthogonal neighbors
    pub fn floor_neighbors(&self, x: usize, y: usize) -> usize {
        let (x, y) = (x as i32, y as i32);
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .iter()
            .filter(|&&(nx, ny)| self.is_floor(nx, ny))
            .count()
    }

    /// Refill every tile with solid wall, reusing the allocation
    pub fn reset(&mut self) {
        for column in &mut self.tiles {
            for tile in column {
                *tile = Tile::wall();
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.tiles[x][y].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
