//! Progress reporting for visualizers
//!
//! The pipeline announces its work through a narrow sink interface so a
//! host can animate generation. The sink never feeds back into the core: a
//! no-op implementation yields an identical map, and no sink call consumes
//! randomness.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::region::RegionId;
use super::room::Room;

bitflags! {
    /// Which pipeline stages emit progress events
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StageMask: u8 {
        const ROOMS = 0x01;
        const MAZE = 0x02;
        const CONNECT = 0x04;
        const PRUNE = 0x08;
    }
}

impl Default for StageMask {
    fn default() -> Self {
        Self::all()
    }
}

// Manual serde impl for StageMask
impl Serialize for StageMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StageMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(StageMask::from_bits_truncate(bits))
    }
}

/// Observer for generation progress.
///
/// Every method identifies the grid region of interest; the highlight class
/// is the method itself. All methods default to no-ops, so an implementation
/// only overrides the events it draws.
pub trait ProgressSink {
    /// A room rectangle was accepted
    fn room_placed(&mut self, _room: &Room) {}

    /// The hunt phase started scanning a column of odd cells
    fn hunt_scan(&mut self, _column: usize) {}

    /// A maze tile was carved at (x, y)
    fn maze_carved(&mut self, _x: usize, _y: usize) {}

    /// A connector at (x, y) was opened, absorbing `absorbed` into the
    /// main region
    fn connector_opened(&mut self, _x: usize, _y: usize, _absorbed: RegionId) {}

    /// A full dead-end pass completed, culling `culled` tiles
    fn dead_end_pass(&mut self, _culled: usize) {}
}

/// Sink that ignores every event
pub struct NullSink;

impl ProgressSink for NullSink {}
