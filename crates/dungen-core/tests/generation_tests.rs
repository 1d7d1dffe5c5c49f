//! End-to-end generation scenarios and map invariants.

use dungen_core::MapRng;
use dungen_core::dungeon::{
    CorridorWeights, DimRange, GenConfig, Generator, Grid, NO_REGION, NO_ROOM, NullSink,
    ProgressSink, RegionCounter, Room, TileKind, carve_maze, connect_regions, place_rooms,
    remove_dead_ends, unused_odd_cells,
};

fn floor_count(grid: &Grid) -> usize {
    let mut count = 0;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.tile(x, y).kind == TileKind::Floor {
                count += 1;
            }
        }
    }
    count
}

fn first_floor(grid: &Grid) -> Option<(usize, usize)> {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.tile(x, y).kind == TileKind::Floor {
                return Some((x, y));
            }
        }
    }
    None
}

fn flood_fill_count(grid: &Grid, start_x: usize, start_y: usize) -> usize {
    let mut visited = vec![vec![false; grid.height()]; grid.width()];
    let mut stack = vec![(start_x as i32, start_y as i32)];
    let mut count = 0;

    while let Some((x, y)) = stack.pop() {
        if !grid.is_floor(x, y) || visited[x as usize][y as usize] {
            continue;
        }
        visited[x as usize][y as usize] = true;
        count += 1;

        stack.push((x - 1, y));
        stack.push((x + 1, y));
        stack.push((x, y - 1));
        stack.push((x, y + 1));
    }

    count
}

/// All floor tiles form one connected component under 4-adjacency
fn assert_connected(grid: &Grid) {
    let total = floor_count(grid);
    if let Some((x, y)) = first_floor(grid) {
        assert_eq!(flood_fill_count(grid, x, y), total, "floor is disconnected");
    }
}

/// The outer border is wall everywhere
fn assert_border_walls(grid: &Grid) {
    for x in 0..grid.width() {
        assert_eq!(grid.tile(x, 0).visible_kind(), TileKind::Wall);
        assert_eq!(
            grid.tile(x, grid.height() - 1).visible_kind(),
            TileKind::Wall
        );
    }
    for y in 0..grid.height() {
        assert_eq!(grid.tile(0, y).visible_kind(), TileKind::Wall);
        assert_eq!(grid.tile(grid.width() - 1, y).visible_kind(), TileKind::Wall);
    }
}

/// No two accepted rooms share a cell
fn assert_rooms_disjoint(rooms: &[Room]) {
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }
}

/// Accepted rooms have odd dimensions, even corners
fn assert_room_parity(rooms: &[Room]) {
    for room in rooms {
        assert!(room.aligned(), "misaligned room {room:?}");
    }
}

/// No floor tile is left with exactly one floor neighbor
fn assert_no_dead_ends(grid: &Grid) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.tile(x, y).kind == TileKind::Floor {
                assert_ne!(grid.floor_neighbors(x, y), 1, "dead end at ({x},{y})");
            }
        }
    }
}

/// Door tiles are floor with at least two floor neighbors
fn assert_door_coherence(grid: &Grid) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let t = grid.tile(x, y);
            if t.door {
                assert_eq!(t.kind, TileKind::Floor, "door on non-floor at ({x},{y})");
                assert!(
                    grid.floor_neighbors(x, y) >= 2,
                    "dangling door at ({x},{y})"
                );
            }
        }
    }
}

/// No transient connector markers may survive generation
fn assert_no_markers(grid: &Grid) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            assert_ne!(grid.tile(x, y).kind, TileKind::Connector);
        }
    }
}

/// Every maze region, taken alone, is a tree with no 2x2 open block
fn assert_maze_perfect(grid: &Grid) {
    let maze_at = |x: i32, y: i32| -> Option<i16> {
        if x < 0 || y < 0 || x as usize >= grid.width() || y as usize >= grid.height() {
            return None;
        }
        let t = grid.tile(x as usize, y as usize);
        (t.kind == TileKind::Floor && t.room == NO_ROOM).then_some(t.region)
    };

    let mut cells = std::collections::HashMap::new();
    let mut edges = std::collections::HashMap::new();

    for x in 0..grid.width() as i32 {
        for y in 0..grid.height() as i32 {
            let Some(region) = maze_at(x, y) else {
                continue;
            };
            *cells.entry(region).or_insert(0usize) += 1;
            for (nx, ny) in [(x + 1, y), (x, y + 1)] {
                if maze_at(nx, ny) == Some(region) {
                    *edges.entry(region).or_insert(0usize) += 1;
                }
            }
            let block = [(x + 1, y), (x, y + 1), (x + 1, y + 1)]
                .iter()
                .all(|&(nx, ny)| maze_at(nx, ny) == Some(region));
            assert!(!block, "2x2 maze block at ({x},{y})");
        }
    }

    for (region, count) in &cells {
        assert_eq!(
            edges.get(region).copied().unwrap_or(0),
            count - 1,
            "maze region {region} is not a tree"
        );
    }
}

fn assert_final_map(grid: &Grid, rooms: &[Room]) {
    assert_connected(grid);
    assert_border_walls(grid);
    assert_rooms_disjoint(rooms);
    assert_room_parity(rooms);
    assert_no_dead_ends(grid);
    assert_door_coherence(grid);
    assert_no_markers(grid);
}

fn door_count(grid: &Grid) -> usize {
    let mut count = 0;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.tile(x, y).door {
                count += 1;
            }
        }
    }
    count
}

/// Run the stages by hand so inter-stage invariants can be observed
struct Staged {
    grid: Grid,
    rooms: Vec<Room>,
    regions: RegionCounter,
    rng: MapRng,
    config: GenConfig,
}

impl Staged {
    fn start(config: GenConfig, seed: u64) -> Self {
        let mut grid = Grid::new(config.width, config.height);
        let mut regions = RegionCounter::new();
        let mut rng = MapRng::new(seed);
        let rooms = place_rooms(
            &mut grid,
            &mut regions,
            &config,
            &mut rng,
            &mut NullSink,
        )
        .expect("room placement failed");
        Self {
            grid,
            rooms,
            regions,
            rng,
            config,
        }
    }

    fn maze(&mut self) {
        carve_maze(
            &mut self.grid,
            &mut self.regions,
            &self.config.weights,
            &mut self.rng,
            &mut NullSink,
        );
    }

    fn connect(&mut self) -> usize {
        connect_regions(
            &mut self.grid,
            &mut self.rng,
            &mut NullSink,
        )
    }

    fn prune(&mut self) -> usize {
        remove_dead_ends(&mut self.grid, &mut NullSink)
    }
}

#[test]
fn scenario_default_map() {
    // Default configuration end to end
    let mut generator = Generator::new(GenConfig::default()).unwrap();
    generator.generate(&mut MapRng::new(1)).unwrap();

    assert!(
        generator.rooms().len() >= 4,
        "expected several rooms, got {}",
        generator.rooms().len()
    );
    assert_final_map(generator.grid(), generator.rooms());
    assert!(door_count(generator.grid()) >= 1);
}

#[test]
fn scenario_tiny_rooms() {
    // 11x11 with 3x3 rooms; single-cell interiors may be pruned away,
    // so only connectivity is demanded of the final map
    let config = GenConfig {
        width: 11,
        height: 11,
        max_rooms: 4,
        room_width: DimRange::new(3, 3),
        room_height: DimRange::new(3, 3),
        ..Default::default()
    };

    let mut staged = Staged::start(config, 42);
    assert!(staged.rooms.len() <= 4);
    assert_rooms_disjoint(&staged.rooms);
    for room in &staged.rooms {
        assert_eq!(room.width(), 3);
        assert_eq!(room.height(), 3);
    }

    staged.maze();
    assert_eq!(unused_odd_cells(&staged.grid, &staged.rooms), 0);

    staged.connect();
    staged.prune();
    assert_connected(&staged.grid);
    assert_border_walls(&staged.grid);
}

#[test]
fn scenario_maze_only() {
    // 5x5, no rooms: one perfect maze over the odd lattice
    let config = GenConfig {
        width: 5,
        height: 5,
        max_rooms: 0,
        ..Default::default()
    };

    let mut staged = Staged::start(config, 0);
    assert!(staged.rooms.is_empty());

    staged.maze();
    assert_eq!(staged.regions.allocated(), 1);
    for x in (1..5).step_by(2) {
        for y in (1..5).step_by(2) {
            let t = staged.grid.tile(x, y);
            assert_eq!(t.kind, TileKind::Floor);
            assert_eq!(t.region, 0, "first maze component must take region 0");
        }
    }
    assert_maze_perfect(&staged.grid);

    // A single region has nothing to connect
    assert_eq!(staged.connect(), 0);
    assert_connected(&staged.grid);

    staged.prune();
    assert_connected(&staged.grid);
}

#[test]
fn scenario_single_room() {
    // Exactly one room, fixed 7x5 size, maze around it
    let config = GenConfig {
        max_rooms: 1,
        room_width: DimRange::new(7, 7),
        room_height: DimRange::new(5, 5),
        ..Default::default()
    };

    let mut staged = Staged::start(config, 7);
    assert_eq!(staged.rooms.len(), 1);

    staged.maze();
    assert_maze_perfect(&staged.grid);

    // Joining the maze to the room takes at least one door
    staged.connect();
    assert!(door_count(&staged.grid) >= 1);
    assert_connected(&staged.grid);

    staged.prune();
    assert_connected(&staged.grid);
    assert_no_dead_ends(&staged.grid);

    // The room interior always survives pruning
    let room = staged.rooms[0];
    for x in room.x0 + 1..room.x1 {
        for y in room.y0 + 1..room.y1 {
            assert_eq!(staged.grid.tile(x, y).kind, TileKind::Floor);
        }
    }
}

#[test]
fn scenario_sink_has_no_effect() {
    // A recording sink observes everything and changes nothing
    #[derive(Default)]
    struct Recorder {
        rooms: usize,
        carves: usize,
        doors: usize,
        passes: usize,
    }

    impl ProgressSink for Recorder {
        fn room_placed(&mut self, _room: &Room) {
            self.rooms += 1;
        }
        fn maze_carved(&mut self, _x: usize, _y: usize) {
            self.carves += 1;
        }
        fn connector_opened(&mut self, _x: usize, _y: usize, _absorbed: i16) {
            self.doors += 1;
        }
        fn dead_end_pass(&mut self, _culled: usize) {
            self.passes += 1;
        }
    }

    let config = GenConfig {
        width: 21,
        height: 21,
        ..Default::default()
    };

    let mut silent = Generator::new(config).unwrap();
    silent.generate(&mut MapRng::new(123)).unwrap();

    let mut observed = Generator::new(config).unwrap();
    let mut recorder = Recorder::default();
    observed
        .generate_with(&mut MapRng::new(123), &mut recorder)
        .unwrap();

    assert_eq!(silent.grid(), observed.grid());
    assert_eq!(silent.rooms(), observed.rooms());

    assert_eq!(recorder.rooms, observed.rooms().len());
    assert!(recorder.carves > 0);
    assert!(recorder.doors >= 1);
    assert!(recorder.passes >= 1);
}

#[test]
fn scenario_stress() {
    // Many seeds at default config, all invariants every run
    let mut generator = Generator::new(GenConfig::default()).unwrap();
    for seed in 0..1000 {
        generator.generate(&mut MapRng::new(seed)).unwrap();
        assert_connected(generator.grid());
        assert_no_dead_ends(generator.grid());
    }
}

#[test]
fn property_determinism_under_seed() {
    // Same config and seed, same map, run to run
    let config = GenConfig::default();
    for seed in [0, 1, 42, u64::MAX] {
        let mut a = Generator::new(config).unwrap();
        let mut b = Generator::new(config).unwrap();
        a.generate(&mut MapRng::new(seed)).unwrap();
        b.generate(&mut MapRng::new(seed)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.rooms(), b.rooms());
    }
}

#[test]
fn property_maze_perfection_before_connect() {
    // The carved maze must be a perfect maze on the default config
    let mut staged = Staged::start(GenConfig::default(), 99);
    staged.maze();
    assert_maze_perfect(&staged.grid);

    // Maze floors and room floors never touch before stage 3
    let grid = &staged.grid;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let t = grid.tile(x, y);
            if t.kind != TileKind::Floor || t.room == NO_ROOM {
                continue;
            }
            for (nx, ny) in [(x as i32 - 1, y as i32), (x as i32, y as i32 - 1)] {
                if grid.is_floor(nx, ny) {
                    let n = grid.tile(nx as usize, ny as usize);
                    assert_eq!(n.region, t.region, "room floor touches another region");
                }
            }
        }
    }
}

#[test]
fn property_region_labels_after_connect() {
    // Stage 3 leaves every floor tile in the main region
    let mut staged = Staged::start(GenConfig::default(), 5);
    staged.maze();
    staged.connect();

    for x in 0..staged.grid.width() {
        for y in 0..staged.grid.height() {
            let t = staged.grid.tile(x, y);
            if t.kind == TileKind::Floor {
                assert_eq!(t.region, 0);
            } else {
                assert_eq!(t.region, NO_REGION);
            }
        }
    }
}

#[test]
fn config_round_trips_through_json() {
    let config = GenConfig {
        width: 33,
        height: 17,
        weights: CorridorWeights {
            forward: 3,
            turn: 1,
        },
        ..Default::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: GenConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn grid_round_trips_through_json() {
    let mut generator = Generator::new(GenConfig {
        width: 15,
        height: 15,
        ..Default::default()
    })
    .unwrap();
    generator.generate(&mut MapRng::new(8)).unwrap();

    let json = serde_json::to_string(generator.grid()).unwrap();
    let back: Grid = serde_json::from_str(&json).unwrap();
    assert_eq!(back, *generator.grid());
}

mod random_configs {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn generated_maps_hold_invariants(
            seed in any::<u64>(),
            width in prop::sample::select(vec![9usize, 13, 21, 33, 79]),
            height in prop::sample::select(vec![9usize, 13, 21, 25]),
            max_rooms in 0usize..=8,
        ) {
            let config = GenConfig {
                width,
                height,
                max_rooms,
                room_width: DimRange::new(3, 7),
                room_height: DimRange::new(3, 7),
                ..Default::default()
            };
            prop_assert!(config.validate().is_ok());

            let mut generator = Generator::new(config).unwrap();
            generator.generate(&mut MapRng::new(seed)).unwrap();

            assert_connected(generator.grid());
            assert_border_walls(generator.grid());
            assert_no_dead_ends(generator.grid());
            assert_door_coherence(generator.grid());
            assert_no_markers(generator.grid());
        }
    }
}
