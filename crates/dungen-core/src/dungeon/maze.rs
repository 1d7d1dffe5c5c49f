//! Stage 2: hunt-and-kill maze carving
//!
//! Grows a perfect maze through every odd cell left unused by room
//! placement. The walk is a random path carved two cells at a time; when it
//! corners itself, the hunt scans for an unused odd cell to resume from,
//! preferring one it can stitch onto the current component. Each maximal
//! connected component gets its own region id.

use crate::MapRng;

use super::config::CorridorWeights;
use super::grid::Grid;
use super::progress::ProgressSink;
use super::region::{NO_REGION, RegionCounter, RegionId};
use super::room::Room;
use super::tile::{NO_ROOM, TileKind};

/// Step-two offsets to the four lattice neighbors
const STEP_DIRS: [(i32, i32); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Fill all unused odd cells with maze corridors.
///
/// Repeatedly hunts for a start cell and walks from it until the hunt finds
/// no unused odd cell. Terminates because every walk carves at least one new
/// odd cell and the set of unused odd cells strictly shrinks.
pub fn carve_maze(
    grid: &mut Grid,
    regions: &mut RegionCounter,
    weights: &CorridorWeights,
    rng: &mut MapRng,
    sink: &mut dyn ProgressSink,
) {
    let mut current = NO_REGION;
    while let Some((x, y)) = hunt(grid, regions, &mut current, rng, sink) {
        walk(grid, current, weights, x, y, rng, sink);
    }
}

/// A cell is open to carving if it is unused wall outside every room
/// rectangle
fn carveable(grid: &Grid, x: i32, y: i32) -> bool {
    grid.in_bounds(x, y) && {
        let t = grid.tile(x as usize, y as usize);
        t.kind == TileKind::Wall && t.room == NO_ROOM
    }
}

/// True for maze floor: carved corridor, not room interior
fn maze_floor(grid: &Grid, x: i32, y: i32) -> bool {
    grid.in_bounds(x, y) && {
        let t = grid.tile(x as usize, y as usize);
        t.kind == TileKind::Floor && t.room == NO_ROOM
    }
}

fn carve(grid: &mut Grid, x: usize, y: usize, region: RegionId, sink: &mut dyn ProgressSink) {
    let t = grid.tile_mut(x, y);
    t.kind = TileKind::Floor;
    t.region = region;
    sink.maze_carved(x, y);
}

/// Random walk from (x, y), carving two cells per step until no eligible
/// neighbor remains.
///
/// The recursion of the textbook formulation is a tail call, so this is a
/// plain loop carrying the previous step (dx, dy) for direction weighting.
fn walk(
    grid: &mut Grid,
    region: RegionId,
    weights: &CorridorWeights,
    mut x: usize,
    mut y: usize,
    rng: &mut MapRng,
    sink: &mut dyn ProgressSink,
) {
    let (mut dx, mut dy) = (0i32, 0i32);

    loop {
        carve(grid, x, y, region, sink);

        let mut targets = [(0usize, 0usize); 4];
        let mut dir_weights = [0u32; 4];
        let mut n = 0;

        for (sx, sy) in STEP_DIRS {
            let nx = x as i32 + sx;
            let ny = y as i32 + sy;
            if !carveable(grid, nx, ny) {
                continue;
            }
            targets[n] = (nx as usize, ny as usize);
            dir_weights[n] = if dx == 0 && dy == 0 {
                1
            } else if (sx, sy) == (dx, dy) {
                weights.forward
            } else {
                weights.turn
            };
            n += 1;
        }

        if n == 0 {
            break;
        }

        let (nx, ny) = targets[rng.pick_weighted(&dir_weights[..n])];
        carve(grid, (x + nx) / 2, (y + ny) / 2, region, sink);

        dx = nx as i32 - x as i32;
        dy = ny as i32 - y as i32;
        x = nx;
        y = ny;
    }
}

/// Find the next cell to walk from.
///
/// First scan: an unused odd cell adjacent to existing maze floor; the
/// intervening tile is carved with the current region id, stitching the new
/// growth onto the current component. (A stitch can only ever reach the
/// current component: when a component is seeded, no unused odd cell borders
/// older maze floor, and growing the current component never changes that.)
///
/// Second scan: the first unused odd cell anywhere seeds a new component
/// and allocates its region id. Returns None when the maze is complete.
fn hunt(
    grid: &mut Grid,
    regions: &mut RegionCounter,
    current: &mut RegionId,
    rng: &mut MapRng,
    sink: &mut dyn ProgressSink,
) -> Option<(usize, usize)> {
    let (width, height) = (grid.width(), grid.height());

    for x in (1..width).step_by(2) {
        sink.hunt_scan(x);
        for y in (1..height).step_by(2) {
            if !carveable(grid, x as i32, y as i32) {
                continue;
            }

            let mut anchors = [(0usize, 0usize); 4];
            let mut n = 0;
            for (sx, sy) in STEP_DIRS {
                let nx = x as i32 + sx;
                let ny = y as i32 + sy;
                if maze_floor(grid, nx, ny) {
                    anchors[n] = (nx as usize, ny as usize);
                    n += 1;
                }
            }

            if n > 0 {
                let (ax, ay) = anchors[rng.rn2(n as u32) as usize];
                carve(grid, (x + ax) / 2, (y + ay) / 2, *current, sink);
                return Some((x, y));
            }
        }
    }

    for x in (1..width).step_by(2) {
        sink.hunt_scan(x);
        for y in (1..height).step_by(2) {
            if carveable(grid, x as i32, y as i32) {
                *current = regions.alloc();
                return Some((x, y));
            }
        }
    }

    None
}

/// Count odd cells outside every room rectangle that are still wall.
/// Zero after a completed carve.
pub fn unused_odd_cells(grid: &Grid, rooms: &[Room]) -> usize {
    let mut count = 0;
    for x in (1..grid.width()).step_by(2) {
        for y in (1..grid.height()).step_by(2) {
            if rooms.iter().any(|r| r.contains(x, y)) {
                continue;
            }
            if grid.tile(x, y).kind == TileKind::Wall {
                count += 1;
            }
        }
    }
    count
}
