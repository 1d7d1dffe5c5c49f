//! Stage 4: dead-end pruning
//!
//! Repeatedly walls off floor tiles with exactly one floor neighbor until a
//! full pass culls nothing. Doors get no special treatment: one whose
//! corridor branch dies back becomes a dead end like any other tile, and a
//! culled tile drops its region and door marks with it.

use super::grid::Grid;
use super::progress::ProgressSink;
use super::region::NO_REGION;
use super::tile::TileKind;

/// Cull corridor dead ends; returns the total number of tiles removed.
///
/// Each pass is monotone non-increasing in floor count, and the number of
/// passes is bounded by the longest corridor.
pub fn remove_dead_ends(grid: &mut Grid, sink: &mut dyn ProgressSink) -> usize {
    let mut total = 0;

    loop {
        let mut culled = 0;

        for x in 1..grid.width() - 1 {
            for y in 1..grid.height() - 1 {
                if grid.tile(x, y).kind != TileKind::Floor {
                    continue;
                }
                if grid.floor_neighbors(x, y) == 1 {
                    let t = grid.tile_mut(x, y);
                    t.kind = TileKind::Culled;
                    t.region = NO_REGION;
                    t.door = false;
                    culled += 1;
                }
            }
        }

        sink.dead_end_pass(culled);
        total += culled;
        if culled == 0 {
            break;
        }
    }

    total
}
