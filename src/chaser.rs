//! The pursuit state machine: a cached path with a cursor, replanned only
//! when exhausted, and a random-walk fallback for when no route exists.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Grid, Pos};
use crate::pathfinder;

/// Random placement attempts before falling back to the farthest open cell.
const SPAWN_ATTEMPTS: usize = 100;
/// Minimum spawn distance from the avoided cell, in cells.
const SPAWN_MIN_DIST: f64 = 8.0;

/// Chases a moving target one cell per tick. The path is recomputed only
/// when the cached one runs out or a replan is forced, so a target that
/// moves mid-chase leaves the chaser on a stale path until the cursor
/// catches up. That trade of freshness for cost is intended.
#[derive(Clone, Debug)]
pub struct Chaser {
    path: Vec<Pos>,
    cursor: usize,
    replan: bool,
}

impl Chaser {
    pub fn new() -> Self {
        Self {
            path: Vec::new(),
            cursor: 0,
            replan: true,
        }
    }

    /// Drop the cached path and replan on the next step. Call at (re)spawn.
    pub fn reset(&mut self) {
        self.path.clear();
        self.cursor = 0;
        self.replan = true;
    }

    /// One tick of pursuit: the cell to move to, or `None` when already on
    /// the target cell or boxed in with no legal move. `from` and `target`
    /// are the live positions supplied by the caller each tick.
    pub fn step(&mut self, grid: &Grid, from: Pos, target: Pos, rng: &mut impl Rng) -> Option<Pos> {
        if from == target {
            return None;
        }

        if self.replan || self.cursor >= self.path.len() {
            self.path = pathfinder::shortest_path(grid, from, target).unwrap_or_default();
            self.cursor = 0;
            self.replan = false;
        }

        if self.cursor < self.path.len() {
            let next = self.path[self.cursor];
            self.cursor += 1;
            return Some(next);
        }

        let moves = grid.open_neighbors(from);
        moves.choose(rng).copied()
    }
}

impl Default for Chaser {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn cell for the chaser: a random open cell at least `SPAWN_MIN_DIST`
/// cells away from `avoid`, searched inside the `[2, size-3]` window; when
/// the probes all miss, the open cell farthest from `avoid`. `None` only on
/// a grid without a single open cell.
pub fn spawn_cell(grid: &Grid, avoid: Pos, rng: &mut impl Rng) -> Option<Pos> {
    let size = grid.size();
    if size > 4 {
        for _ in 0..SPAWN_ATTEMPTS {
            let pos = Pos::new(rng.gen_range(2..size - 2), rng.gen_range(2..size - 2));
            if grid.is_open(pos.x as isize, pos.y as isize) && distance(pos, avoid) >= SPAWN_MIN_DIST
            {
                return Some(pos);
            }
        }
    }

    grid.open_cells()
        .into_iter()
        .max_by(|a, b| distance(*a, avoid).total_cmp(&distance(*b, avoid)))
}

fn distance(a: Pos, b: Pos) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    (dx * dx + dy * dy).sqrt()
}
