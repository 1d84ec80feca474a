//! Properties every spread model must hold on arbitrary terrain

mod common;

use common::{influence_set, init_tracing};
use firegrid_core::grid::random_terrain;
use firegrid_core::simulation::{is_ended, run_to_end, tick};
use firegrid_core::{
    Point, RandomSource, ScriptedSource, SimulationGrid, SpreadModel, TileGrid, TileType, Wind,
};

const SIZE: usize = 12;

fn windy() -> Wind {
    Wind {
        direction: 60.0,
        speed: 6.0,
    }
}

fn random_grid(model: SpreadModel, seed: u64) -> SimulationGrid {
    let mut source = RandomSource::seeded(seed);
    let tiles = random_terrain(SIZE, &mut source);
    let mut grid = SimulationGrid::from_tiles(tiles, model, windy());
    grid.ignite(Point::new(6, 6));
    grid.ignite(Point::new(2, 9));
    grid
}

fn snapshot(grid: &SimulationGrid) -> Vec<(TileType, TileType, u8)> {
    grid.tiles()
        .tiles()
        .iter()
        .map(|t| (t.default_type, t.current_type, t.state))
        .collect()
}

#[test]
fn test_tile_count_is_conserved() {
    init_tracing();
    for model in SpreadModel::ALL {
        let mut grid = random_grid(model, 7);
        let mut source = RandomSource::seeded(99);
        for _ in 0..25 {
            tick(&mut grid, &mut source);
            assert_eq!(grid.tiles().len(), SIZE * SIZE);
            assert_eq!(grid.size(), SIZE);
        }
    }
}

#[test]
fn test_ended_iff_no_fire() {
    for model in SpreadModel::ALL {
        let mut grid = random_grid(model, 11);
        let mut source = RandomSource::seeded(3);
        for _ in 0..200 {
            let fires = grid.tiles().count(TileType::Fire);
            assert_eq!(is_ended(&grid), fires == 0, "{model}");
            assert_eq!(grid.has_ended(), fires == 0, "{model}");
            if fires == 0 {
                break;
            }
            tick(&mut grid, &mut source);
        }
    }
}

#[test]
fn test_runs_terminate() {
    for model in SpreadModel::ALL {
        let mut grid = random_grid(model, 5);
        let mut source = RandomSource::seeded(17);
        let ticks = run_to_end(&mut grid, &mut source, Some(100_000));
        assert!(is_ended(&grid), "{model} still burning after {ticks} ticks");
        assert_eq!(grid.iteration(), ticks);
    }
}

#[test]
fn test_no_fire_is_a_fixed_point() {
    for model in SpreadModel::ALL {
        let mut source = RandomSource::seeded(23);
        let tiles = random_terrain(SIZE, &mut source);
        let mut grid = SimulationGrid::from_tiles(tiles, model, windy());
        let before = snapshot(&grid);
        let mut scripted = ScriptedSource::new([0.0]);
        tick(&mut grid, &mut scripted);
        assert_eq!(snapshot(&grid), before, "{model}");
        assert_eq!(scripted.draws(), 0);
        assert!(grid.has_ended());
    }
}

#[test]
fn test_changes_stay_next_to_fire() {
    for model in SpreadModel::ALL {
        let mut grid = random_grid(model, 41);
        let mut source = RandomSource::seeded(8);
        for _ in 0..30 {
            let before: TileGrid = grid.tiles().clone();
            tick(&mut grid, &mut source);

            let mut influenced = vec![false; SIZE * SIZE];
            for (p, tile) in before.iter() {
                if tile.is_burning() {
                    for q in influence_set(model, p) {
                        if before.contains(q) {
                            influenced[q.y as usize * SIZE + q.x as usize] = true;
                        }
                    }
                }
            }

            for (p, old) in before.iter() {
                let new = grid.tile(p).unwrap();
                assert_eq!(new.default_type, old.default_type);
                let changed = (new.current_type, new.state) != (old.current_type, old.state);
                if changed {
                    assert!(
                        influenced[p.y as usize * SIZE + p.x as usize],
                        "{model}: tile {p} changed with no burning neighbor"
                    );
                }
            }
        }
    }
}

#[test]
fn test_only_vegetation_ignites() {
    for model in SpreadModel::ALL {
        let mut grid = random_grid(model, 2);
        let mut source = RandomSource::seeded(4);
        for _ in 0..30 {
            let before = grid.tiles().clone();
            tick(&mut grid, &mut source);
            for (p, old) in before.iter() {
                let new = grid.tile(p).unwrap();
                if new.current_type == TileType::Fire && old.current_type != TileType::Fire {
                    assert!(old.current_type.is_combustible(), "{model}: {p}");
                    assert_eq!(new.state, 0);
                }
                if old.current_type.is_terminal() {
                    assert_eq!(new.current_type, old.current_type);
                }
            }
        }
    }
}

#[test]
fn test_scripted_runs_are_reproducible() {
    let sequence = [0.03, 0.71, 0.12, 0.44, 0.95, 0.2, 0.06, 0.58];
    for model in SpreadModel::ALL {
        let mut a = random_grid(model, 13);
        let mut b = random_grid(model, 13);
        let mut source_a = ScriptedSource::new(sequence);
        let mut source_b = ScriptedSource::new(sequence);
        for _ in 0..40 {
            tick(&mut a, &mut source_a);
            tick(&mut b, &mut source_b);
            assert_eq!(snapshot(&a), snapshot(&b), "{model}");
        }
        assert_eq!(source_a.draws(), source_b.draws());
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    for model in SpreadModel::ALL {
        let mut a = random_grid(model, 29);
        let mut b = random_grid(model, 29);
        let ticks_a = run_to_end(&mut a, &mut RandomSource::seeded(1), Some(10_000));
        let ticks_b = run_to_end(&mut b, &mut RandomSource::seeded(1), Some(10_000));
        assert_eq!(ticks_a, ticks_b);
        assert_eq!(snapshot(&a), snapshot(&b));
    }
}

#[test]
fn test_restore_resets_to_defaults() {
    let mut grid = random_grid(SpreadModel::UniformMoore, 31);
    run_to_end(&mut grid, &mut RandomSource::seeded(2), Some(10_000));
    grid.restore_terrain();
    for (_, tile) in grid.tiles().iter() {
        assert_eq!(tile.current_type, tile.default_type);
        assert_eq!(tile.state, 0);
    }
}
