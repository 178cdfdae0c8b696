//! Wall/open cell matrix shared by the generator, the pathfinder and the
//! chaser. Everything works in cell coordinates; the `CELL_SIZE` constant is
//! the scaling factor callers apply when translating to world positions.

/// One grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Open,
}

/// World units per cell. The core never uses this itself; callers multiply
/// by it when placing entities and divide when reading positions back.
pub const CELL_SIZE: i32 = 40;

/// A cell coordinate: `x` is the column, `y` the row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// World coordinate of this cell's top-left corner.
    pub fn to_world(self) -> (i32, i32) {
        (self.x as i32 * CELL_SIZE, self.y as i32 * CELL_SIZE)
    }

    /// Cell containing a world coordinate. Negative coordinates clamp to
    /// the first row/column.
    pub fn from_world(wx: i32, wy: i32) -> Self {
        Self {
            x: (wx.max(0) / CELL_SIZE) as usize,
            y: (wy.max(0) / CELL_SIZE) as usize,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Neighbor scan order: +x, -x, +y, -y. Path tie-breaking and fallback
    /// moves depend on this order staying fixed.
    pub const ALL: [Dir; 4] = [Dir::Right, Dir::Left, Dir::Down, Dir::Up];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Square wall/open matrix for one level. Built by the generator, read-only
/// afterwards, replaced wholesale on restart. Coordinates outside the matrix
/// are reported as walls by every query, so probing off the edge is safe.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    size: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Grid {
    /// All-wall grid ready for carving.
    pub(crate) fn walls(size: usize) -> Self {
        Self {
            size,
            tiles: vec![vec![Tile::Wall; size]; size],
        }
    }

    /// Fixed layout from rows of characters: `.` is open, anything else is a
    /// wall. The grid is square with one cell per character and one row per
    /// string; short rows are padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        let mut grid = Self::walls(size);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(size).enumerate() {
                if ch == '.' {
                    grid.tiles[y][x] = Tile::Open;
                }
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Tile at `(x, y)`, or `Wall` when the coordinate is out of bounds.
    pub fn tile(&self, x: isize, y: isize) -> Tile {
        if x < 0 || y < 0 || x >= self.size as isize || y >= self.size as isize {
            Tile::Wall
        } else {
            self.tiles[y as usize][x as usize]
        }
    }

    pub fn is_open(&self, x: isize, y: isize) -> bool {
        self.tile(x, y) == Tile::Open
    }

    /// Open 4-neighbors of `pos` in the fixed `Dir::ALL` scan order.
    pub fn open_neighbors(&self, pos: Pos) -> Vec<Pos> {
        let mut cells = Vec::new();
        for dir in Dir::ALL {
            let (dx, dy) = dir.delta();
            let nx = pos.x as isize + dx;
            let ny = pos.y as isize + dy;
            if self.is_open(nx, ny) {
                cells.push(Pos::new(nx as usize, ny as usize));
            }
        }
        cells
    }

    /// Every open cell, scanned row by row.
    pub fn open_cells(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                if self.tiles[y][x] == Tile::Open {
                    cells.push(Pos::new(x, y));
                }
            }
        }
        cells
    }

    pub(crate) fn open(&mut self, x: usize, y: usize) {
        self.tiles[y][x] = Tile::Open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_a_wall() {
        let grid = Grid::from_rows(&["...", "...", "..."]);
        assert!(grid.is_open(0, 0));
        assert!(!grid.is_open(-1, 0));
        assert!(!grid.is_open(0, -1));
        assert!(!grid.is_open(3, 0));
        assert!(!grid.is_open(0, 3));
    }

    #[test]
    fn from_rows_pads_short_rows_with_walls() {
        let grid = Grid::from_rows(&["..", "...", "..."]);
        assert_eq!(grid.tile(2, 0), Tile::Wall);
        assert_eq!(grid.tile(2, 1), Tile::Open);
    }

    #[test]
    fn open_neighbors_follow_scan_order() {
        let grid = Grid::from_rows(&["...", "...", "..."]);
        let cells = grid.open_neighbors(Pos::new(1, 1));
        assert_eq!(
            cells,
            vec![
                Pos::new(2, 1),
                Pos::new(0, 1),
                Pos::new(1, 2),
                Pos::new(1, 0),
            ]
        );
    }

    #[test]
    fn corner_has_two_neighbors() {
        let grid = Grid::from_rows(&["...", "...", "..."]);
        let cells = grid.open_neighbors(Pos::new(0, 0));
        assert_eq!(cells, vec![Pos::new(1, 0), Pos::new(0, 1)]);
    }

    #[test]
    fn world_scaling_round_trips_cell_corners() {
        let pos = Pos::new(3, 7);
        let (wx, wy) = pos.to_world();
        assert_eq!((wx, wy), (120, 280));
        assert_eq!(Pos::from_world(wx, wy), pos);
        // Anywhere inside the cell maps back to the same cell.
        assert_eq!(Pos::from_world(wx + CELL_SIZE - 1, wy + CELL_SIZE - 1), pos);
        assert_eq!(Pos::from_world(-5, -5), Pos::new(0, 0));
    }
}
