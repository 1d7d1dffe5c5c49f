//! Map tile types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::region::{NO_REGION, RegionId};

/// Room table index meaning "not part of any room rectangle"
pub const NO_ROOM: i16 = -1;

/// Tile terrain kind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Wall = 0,
    Floor = 1,
    /// Candidate door between two regions; only exists while the connector
    /// stage holds the tile on its candidate list
    Connector = 2,
    /// Removed by dead-end pruning; reads as Wall outside the generator
    Culled = 3,
}

impl TileKind {
    /// Check if this kind is traversable
    pub const fn is_open(&self) -> bool {
        matches!(self, TileKind::Floor)
    }

    /// Get the display character for this kind
    pub const fn symbol(&self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Connector => '+',
            TileKind::Culled => '#',
        }
    }
}

/// A single map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Raw terrain kind, including the internal Culled state
    pub kind: TileKind,

    /// Region label; NO_REGION unless the tile is floor
    pub region: RegionId,

    /// Room table index, or NO_ROOM. Covers the full room rectangle
    /// including its wall border.
    pub room: i16,

    /// Tile was opened as a connector between two regions
    pub door: bool,
}

impl Tile {
    /// Create a solid wall tile
    pub const fn wall() -> Self {
        Self {
            kind: TileKind::Wall,
            region: NO_REGION,
            room: NO_ROOM,
            door: false,
        }
    }

    /// Terrain kind as map consumers see it: Culled collapses to Wall.
    pub const fn visible_kind(&self) -> TileKind {
        match self.kind {
            TileKind::Culled => TileKind::Wall,
            k => k,
        }
    }

    /// Check if the tile is traversable open space
    pub const fn is_open(&self) -> bool {
        self.kind.is_open()
    }

    /// Display character for the tile, doors shown as '+'
    pub const fn symbol(&self) -> char {
        if self.door && self.kind.is_open() {
            '+'
        } else {
            self.visible_kind().symbol()
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::wall()
    }
}
