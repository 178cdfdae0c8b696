//! Maze-escape core: carve a maze, route through it, and chase whoever is
//! trying to leave.
//!
//! The crate is the algorithm half of the game. [`generator::generate`]
//! builds a grid with a guaranteed route and a handful of deliberate loops,
//! [`pathfinder::shortest_path`] answers route queries on it, and
//! [`chaser::Chaser`] turns those answers into one-cell-per-tick pursuit.
//! All randomness comes in through `rand::Rng` arguments, so a seeded
//! [`rand::rngs::StdRng`] reproduces a whole run.

pub mod chaser;
pub mod generator;
pub mod grid;
pub mod pathfinder;

pub use chaser::{spawn_cell, Chaser};
pub use generator::{exit_cell, generate};
pub use grid::{Dir, Grid, Pos, Tile, CELL_SIZE};
pub use pathfinder::shortest_path;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn a_seed_reproduces_the_whole_setup() {
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(15, &mut rng);
            let spawn = spawn_cell(&grid, Pos::new(1, 1), &mut rng);
            (grid, spawn)
        };
        let (grid_a, spawn_a) = build(2024);
        let (grid_b, spawn_b) = build(2024);
        assert_eq!(spawn_a, spawn_b);
        for y in 0..15 {
            for x in 0..15 {
                assert_eq!(grid_a.tile(x, y), grid_b.tile(x, y));
            }
        }
    }

    #[test]
    fn the_exit_is_reachable_and_the_chaser_closes_in() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate(15, &mut rng);
        let start = Pos::new(1, 1);
        let exit = exit_cell(15);

        let path = shortest_path(&grid, start, exit).unwrap();
        assert_eq!(*path.last().unwrap(), exit);

        // Walk the chaser from the far corner to a standing player; every
        // step must be a legal single-cell move and it must arrive.
        let mut chaser = Chaser::new();
        let mut at = exit;
        for _ in 0..grid.size() * grid.size() {
            match chaser.step(&grid, at, start, &mut rng) {
                Some(next) => {
                    let dx = (next.x as isize - at.x as isize).abs();
                    let dy = (next.y as isize - at.y as isize).abs();
                    assert_eq!(dx + dy, 1, "jumped from {at:?} to {next:?}");
                    assert!(grid.is_open(next.x as isize, next.y as isize));
                    at = next;
                }
                None => break,
            }
        }
        assert_eq!(at, start);
    }
}
