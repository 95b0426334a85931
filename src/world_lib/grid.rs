// src/world_lib/grid.rs

use glam::Vec3;

// Smallest width/height a level may be generated with. Checked by callers.
pub const MIN_LEVEL_SIZE: usize = 10;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Floor = 0,
    Wall = 1,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    // Centre of the cell on the ground plane (cell x maps to world x, cell y to world z).
    pub fn world_center(&self) -> Vec3 {
        Vec3::new(self.x as f32 + 0.5, 0.0, self.y as f32 + 0.5)
    }
}

// Row-major, indexed y * width + x.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    // Builds a grid from rows of `'#'` (wall) and anything else (floor). Rows must be equally long.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            cells.extend(
                row.chars()
                    .take(width)
                    .map(|c| if c == '#' { Cell::Wall } else { Cell::Floor }),
            );
        }
        cells.resize(width * height, Cell::Wall);
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn index_of(&self, pos: GridPos) -> usize {
        pos.y * self.width + pos.x
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, pos: GridPos) -> Option<Cell> {
        if pos.x < self.width && pos.y < self.height {
            Some(self.cells[self.index_of(pos)])
        } else {
            None
        }
    }

    // Out-of-grid coordinates read as walls.
    pub fn is_wall_at(&self, x: i64, y: i64) -> bool {
        if !self.contains(x, y) {
            return true;
        }
        self.cells[y as usize * self.width + x as usize].is_wall()
    }

    pub fn is_floor(&self, pos: GridPos) -> bool {
        self.get(pos) == Some(Cell::Floor)
    }

    pub(crate) fn set(&mut self, pos: GridPos, cell: Cell) {
        let idx = self.index_of(pos);
        self.cells[idx] = cell;
    }

    pub fn cell_at_world(&self, position: Vec3) -> Option<GridPos> {
        let x = position.x.floor() as i64;
        let y = position.z.floor() as i64;
        if self.contains(x, y) {
            Some(GridPos::new(x as usize, y as usize))
        } else {
            None
        }
    }

    // In-bounds 4-neighbours in the fixed order +x, -x, +y, -y.
    pub fn neighbors4(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        const DIRS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        DIRS.iter().filter_map(move |&(dx, dy)| {
            let nx = pos.x as i64 + dx;
            let ny = pos.y as i64 + dy;
            self.contains(nx, ny)
                .then(|| GridPos::new(nx as usize, ny as usize))
        })
    }

    pub fn has_floor_neighbor(&self, pos: GridPos) -> bool {
        self.neighbors4(pos).any(|n| self.is_floor(n))
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    // Text minimap, one line per row: `#` wall, `.` floor.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|c| if c.is_wall() { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let grid = Grid::filled(3, 3, Cell::Floor);
        assert!(grid.is_wall_at(-1, 0));
        assert!(grid.is_wall_at(0, 3));
        assert!(!grid.is_wall_at(1, 1));
    }

    #[test]
    fn neighbor_order_is_fixed() {
        let grid = Grid::filled(3, 3, Cell::Floor);
        let order: Vec<_> = grid.neighbors4(GridPos::new(1, 1)).collect();
        assert_eq!(
            order,
            vec![
                GridPos::new(2, 1),
                GridPos::new(0, 1),
                GridPos::new(1, 2),
                GridPos::new(1, 0),
            ]
        );
    }

    #[test]
    fn corner_has_two_neighbors() {
        let grid = Grid::filled(4, 4, Cell::Wall);
        assert_eq!(grid.neighbors4(GridPos::new(0, 0)).count(), 2);
    }

    #[test]
    fn from_rows_and_ascii_agree() {
        let rows = ["###", "#.#", "###"];
        let grid = Grid::from_rows(&rows);
        assert_eq!(grid.render_ascii(), "###\n#.#\n###\n");
        assert!(grid.is_floor(GridPos::new(1, 1)));
        assert_eq!(grid.wall_count(), 8);
    }

    #[test]
    fn world_position_maps_to_cell() {
        let grid = Grid::filled(10, 10, Cell::Floor);
        assert_eq!(grid.cell_at_world(Vec3::new(3.7, 1.0, 8.2)), Some(GridPos::new(3, 8)));
        assert_eq!(grid.cell_at_world(Vec3::new(-0.1, 0.0, 1.0)), None);
    }
}
