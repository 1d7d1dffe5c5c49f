//! Stage 3: region connectors
//!
//! Finds every wall tile separating two different regions, then opens one
//! at random from the main-region frontier until the whole map is a single
//! region. Anchoring the frontier to the main region keeps the merge front
//! contiguous; uniform selection gives each boundary a fair chance to hold
//! the chosen door.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use crate::MapRng;

use super::grid::Grid;
use super::progress::ProgressSink;
use super::region::{RegionId, absorb};
use super::tile::TileKind;

/// The region every other region is merged into
pub const MAIN_REGION: RegionId = 0;

/// A wall tile on the boundary between two regions; a candidate door
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Connector {
    x: usize,
    y: usize,
    /// Normalized region pair, low <= high
    low: RegionId,
    high: RegionId,
}

/// Open connectors until every floor tile carries the main region.
///
/// Returns the number of doors opened; exactly (regions - 1) when the
/// connector graph is connected, which stage 2 guarantees.
pub fn connect_regions(grid: &mut Grid, rng: &mut MapRng, sink: &mut dyn ProgressSink) -> usize {
    let mut connectors = find_connectors(grid);
    let mut frontier = Vec::new();
    let mut doors = 0;

    loop {
        frontier.clear();
        frontier.extend(
            connectors
                .iter()
                .enumerate()
                .filter(|(_, c)| c.low == MAIN_REGION)
                .map(|(i, _)| i),
        );
        if frontier.is_empty() {
            break;
        }

        let conn = connectors[frontier[rng.rn2(frontier.len() as u32) as usize]];

        let t = grid.tile_mut(conn.x, conn.y);
        t.kind = TileKind::Floor;
        t.region = MAIN_REGION;
        t.door = true;
        doors += 1;
        sink.connector_opened(conn.x, conn.y, conn.high);

        absorb(grid, conn.high, MAIN_REGION);
        collapse(grid, &mut connectors, conn.high);
    }

    // Anything left on the list bridges regions the frontier never reached;
    // drop the transient markers
    for c in connectors.drain(..) {
        let t = grid.tile_mut(c.x, c.y);
        if t.kind == TileKind::Connector {
            t.kind = TileKind::Wall;
        }
    }

    doors
}

/// Scan the interior for wall tiles separating two regions.
///
/// The horizontal pair takes precedence: a tile qualifying on both axes is
/// recorded once, with its horizontal neighbors. Candidate tiles are marked
/// with the transient Connector kind until the merge loop resolves them.
fn find_connectors(grid: &mut Grid) -> Vec<Connector> {
    let mut connectors = Vec::new();

    for x in 1..grid.width() - 1 {
        for y in 1..grid.height() - 1 {
            if grid.tile(x, y).kind != TileKind::Wall {
                continue;
            }

            let pair = split_pair(grid.tile(x - 1, y).region, grid.tile(x + 1, y).region)
                .or_else(|| split_pair(grid.tile(x, y - 1).region, grid.tile(x, y + 1).region));

            if let Some((low, high)) = pair {
                connectors.push(Connector { x, y, low, high });
                grid.tile_mut(x, y).kind = TileKind::Connector;
            }
        }
    }

    connectors
}

/// Normalize a neighbor pair into (low, high) if it straddles two regions
fn split_pair(a: RegionId, b: RegionId) -> Option<(RegionId, RegionId)> {
    (a >= 0 && b >= 0 && a != b).then(|| (a.min(b), a.max(b)))
}

/// Rewrite the candidate list after `absorbed` merged into the main region.
///
/// Survivors referencing the absorbed region are relabeled and
/// re-normalized; candidates whose pair collapses are swap-removed and
/// their tiles revert to wall.
fn collapse(grid: &mut Grid, connectors: &mut Vec<Connector>, absorbed: RegionId) {
    let mut i = connectors.len();
    while i > 0 {
        i -= 1;
        {
            let c = &mut connectors[i];
            if c.high == absorbed {
                c.high = c.low;
                c.low = MAIN_REGION;
            }
            if c.low == absorbed {
                c.low = MAIN_REGION;
            }
        }
        if connectors[i].low == connectors[i].high {
            let dead = connectors.swap_remove(i);
            let t = grid.tile_mut(dead.x, dead.y);
            if t.kind == TileKind::Connector {
                t.kind = TileKind::Wall;
            }
        }
    }
}
