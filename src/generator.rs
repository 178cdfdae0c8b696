//! Maze construction: a randomized depth-first spanning tree over the
//! interior odd lattice, then a deliberate second route and a handful of
//! random loop openings so the maze is not a pure tree.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Dir, Grid, Pos, Tile};

/// Randomized wall-opening attempts after the corridor pass.
const LOOP_PROBES: usize = 15;

/// The forced-open exit cell for a maze of the given size.
pub fn exit_cell(size: usize) -> Pos {
    Pos::new(size - 2, size - 2)
}

/// Builds a maze. Total for any `size >= 3`; the layout is fully determined
/// by `rng`, so a seeded generator reproduces the same grid.
pub fn generate(size: usize, rng: &mut impl Rng) -> Grid {
    assert!(size >= 3, "maze size must be at least 3, got {size}");

    let mut grid = Grid::walls(size);
    carve_dfs(&mut grid, 1, 1, rng);
    let exit = exit_cell(size);
    grid.open(exit.x, exit.y);
    add_second_path(&mut grid, rng);
    grid
}

/// Depth-first carving: open the current cell, then jump two cells in each
/// direction in shuffled order, opening the midpoint wall whenever the
/// landing cell is still uncarved interior. Visits every interior odd-lattice
/// cell exactly once, so recursion depth is bounded by the interior area.
fn carve_dfs(grid: &mut Grid, x: usize, y: usize, rng: &mut impl Rng) {
    grid.open(x, y);

    let mut dirs = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];
    dirs.shuffle(rng);

    for dir in dirs {
        let (dx, dy) = dir.delta();
        let nx = x as isize + dx * 2;
        let ny = y as isize + dy * 2;
        if in_interior(grid.size(), nx, ny) && grid.tile(nx, ny) == Tile::Wall {
            grid.open((x as isize + dx) as usize, (y as isize + dy) as usize);
            carve_dfs(grid, nx as usize, ny as usize, rng);
        }
    }
}

/// Strictly inside the outer wall ring: `[1, size-2]` on both axes.
fn in_interior(size: usize, x: isize, y: isize) -> bool {
    x > 0 && x < size as isize - 1 && y > 0 && y < size as isize - 1
}

/// Carves a guaranteed second route from the start corner to the exit, then
/// probes random interior cells and opens the ones whose opening would join
/// existing corridors. A wall cell qualifies when two or more of its
/// neighbors are already open. The check is local and can open a cell
/// between two arms of the same corridor, so not every opening closes a
/// loop.
fn add_second_path(grid: &mut Grid, rng: &mut impl Rng) {
    let size = grid.size();
    carve_corridors(grid, Pos::new(1, 1), exit_cell(size));

    for _ in 0..LOOP_PROBES {
        let x = rng.gen_range(1..size - 1);
        let y = rng.gen_range(1..size - 1);
        if grid.tile(x as isize, y as isize) == Tile::Wall
            && grid.open_neighbors(Pos::new(x, y)).len() >= 2
        {
            grid.open(x, y);
        }
    }
}

/// Two deterministic corridor passes from `from` toward `to`: advance in x,
/// detour in y near the end, finish in x; then a mirrored pass that detours
/// in y first. Every carved cell is adjacent to the previous one, so the
/// corridor connects `from` to `to` even on grids too small for the DFS to
/// reach the exit corner.
fn carve_corridors(grid: &mut Grid, from: Pos, to: Pos) {
    let (ex, ey) = (to.x as isize, to.y as isize);

    let mut x = from.x as isize;
    let mut y = from.y as isize;
    while x < ex - 2 {
        x += 1;
        grid.open(x as usize, y as usize);
    }
    while y < ey {
        y += 1;
        grid.open(x as usize, y as usize);
    }
    while x < ex {
        x += 1;
        grid.open(x as usize, y as usize);
    }

    let mut x = from.x as isize;
    let mut y = from.y as isize;
    while y < ey - 2 {
        y += 1;
        grid.open(x as usize, y as usize);
    }
    while x < ex {
        x += 1;
        grid.open(x as usize, y as usize);
    }
}
