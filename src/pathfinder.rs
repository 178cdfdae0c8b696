//! Breadth-first shortest paths over a grid. First dequeue of the target is
//! the shortest route, since the frontier expands in non-decreasing distance
//! order; the fixed neighbor scan order makes the tie-break among equally
//! short routes deterministic.

use std::collections::VecDeque;

use crate::grid::{Grid, Pos};

/// Shortest route from `start` to `target` as the sequence of cells to step
/// through: the first element is a neighbor of `start`, the last is `target`
/// itself, and `start` is never included.
///
/// `None` means no route exists. That is a normal outcome (disconnected
/// cells, or a start sitting on a wall or out of bounds), distinct from
/// `Some(vec![])`, which means start and target are already the same cell.
pub fn shortest_path(grid: &Grid, start: Pos, target: Pos) -> Option<Vec<Pos>> {
    if !grid.is_open(start.x as isize, start.y as isize) {
        return None;
    }

    let size = grid.size();
    let mut seen = vec![vec![false; size]; size];
    let mut parent: Vec<Vec<Option<Pos>>> = vec![vec![None; size]; size];
    let mut queue = VecDeque::new();

    seen[start.y][start.x] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        if pos == target {
            return Some(walk_back(&parent, start, target));
        }
        for next in grid.open_neighbors(pos) {
            if !seen[next.y][next.x] {
                seen[next.y][next.x] = true;
                parent[next.y][next.x] = Some(pos);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Parent-pointer walk from `target` back to `start`, reversed, with the
/// start cell dropped.
fn walk_back(parent: &[Vec<Option<Pos>>], start: Pos, target: Pos) -> Vec<Pos> {
    let mut path = Vec::new();
    let mut cur = target;
    while cur != start {
        path.push(cur);
        cur = parent[cur.y][cur.x].expect("dequeued cell links back to start");
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Independent distance computation used to cross-check path lengths.
    fn bfs_distance(grid: &Grid, start: Pos, target: Pos) -> Option<usize> {
        let size = grid.size();
        let mut dist = vec![vec![-1i32; size]; size];
        let mut queue = VecDeque::new();
        dist[start.y][start.x] = 0;
        queue.push_back(start);
        while let Some(pos) = queue.pop_front() {
            if pos == target {
                return Some(dist[pos.y][pos.x] as usize);
            }
            for next in grid.open_neighbors(pos) {
                if dist[next.y][next.x] < 0 {
                    dist[next.y][next.x] = dist[pos.y][pos.x] + 1;
                    queue.push_back(next);
                }
            }
        }
        None
    }

    #[test]
    fn follows_a_corridor_end_to_end() {
        let grid = Grid::from_rows(&[
            "#####",
            "#...#",
            "#####",
            "#####",
            "#####",
        ]);
        let path = shortest_path(&grid, Pos::new(1, 1), Pos::new(3, 1)).unwrap();
        assert_eq!(path, vec![Pos::new(2, 1), Pos::new(3, 1)]);
    }

    #[test]
    fn tie_break_is_fixed_east_then_south() {
        let grid = Grid::from_rows(&["...", "...", "..."]);
        let path = shortest_path(&grid, Pos::new(0, 0), Pos::new(2, 2)).unwrap();
        assert_eq!(
            path,
            vec![
                Pos::new(1, 0),
                Pos::new(2, 0),
                Pos::new(2, 1),
                Pos::new(2, 2),
            ]
        );
    }

    #[test]
    fn identical_queries_return_identical_paths() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = generator::generate(15, &mut rng);
        let a = shortest_path(&grid, Pos::new(1, 1), Pos::new(13, 13));
        let b = shortest_path(&grid, Pos::new(1, 1), Pos::new(13, 13));
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn path_length_matches_independent_distance() {
        let mut rng = StdRng::seed_from_u64(23);
        let grid = generator::generate(15, &mut rng);
        let cells = grid.open_cells();
        for target in cells.iter().step_by(7) {
            let path = shortest_path(&grid, Pos::new(1, 1), *target)
                .expect("open cells are connected");
            let dist = bfs_distance(&grid, Pos::new(1, 1), *target).unwrap();
            assert_eq!(path.len(), dist, "wrong length to {target:?}");
        }
    }

    #[test]
    fn start_equals_target_yields_empty_path_not_none() {
        let grid = Grid::from_rows(&["...", "...", "..."]);
        assert_eq!(shortest_path(&grid, Pos::new(1, 1), Pos::new(1, 1)), Some(vec![]));
    }

    #[test]
    fn disconnected_pocket_yields_none() {
        let grid = Grid::from_rows(&[
            "#####",
            "#.#.#",
            "#####",
            "#####",
            "#####",
        ]);
        assert_eq!(shortest_path(&grid, Pos::new(1, 1), Pos::new(3, 1)), None);
    }

    #[test]
    fn wall_or_out_of_bounds_start_yields_none() {
        let grid = Grid::from_rows(&["...", "...", "..."]);
        assert_eq!(shortest_path(&grid, Pos::new(9, 9), Pos::new(1, 1)), None);
        let walled = Grid::from_rows(&["###", "#.#", "###"]);
        assert_eq!(shortest_path(&walled, Pos::new(0, 0), Pos::new(1, 1)), None);
    }

    #[test]
    fn unreachable_target_yields_none() {
        let grid = Grid::from_rows(&["...", "...", "..."]);
        assert_eq!(shortest_path(&grid, Pos::new(1, 1), Pos::new(9, 9)), None);
    }

    #[test]
    fn first_step_is_adjacent_and_last_is_target() {
        let mut rng = StdRng::seed_from_u64(31);
        let grid = generator::generate(15, &mut rng);
        let start = Pos::new(13, 13);
        let target = Pos::new(1, 1);
        let path = shortest_path(&grid, start, target).unwrap();
        let first = path[0];
        let adjacent = (first.x as isize - start.x as isize).abs()
            + (first.y as isize - start.y as isize).abs();
        assert_eq!(adjacent, 1);
        assert_eq!(*path.last().unwrap(), target);
    }
}
