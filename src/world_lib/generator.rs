// src/world_lib/generator.rs

use log::debug;

use crate::world_lib::grid::{Cell, Grid, GridPos};
use crate::world_lib::random::SeededStream;

pub const INITIAL_WALL_PROBABILITY: f64 = 0.4;
pub const SMOOTHING_PASSES: usize = 5;
pub const WALL_NEIGHBOR_THRESHOLD: usize = 5;

pub struct GridGenerator;

impl GridGenerator {
    // Caller guarantees width, height >= MIN_LEVEL_SIZE.
    pub fn generate(width: usize, height: usize, seed: &str) -> Grid {
        let mut stream = SeededStream::from_seed(seed);

        let mut grid = Grid::filled(width, height, Cell::Floor);
        for y in 0..height {
            for x in 0..width {
                if stream.next_bool(INITIAL_WALL_PROBABILITY) {
                    grid.set(GridPos::new(x, y), Cell::Wall);
                }
            }
        }

        for _ in 0..SMOOTHING_PASSES {
            grid = Self::smooth(&grid);
        }

        Self::add_border(&mut grid);
        Self::clear_spawn_area(&mut grid);

        debug!(
            "generated {}x{} grid for seed {:?}: {} walls",
            width,
            height,
            seed,
            grid.wall_count()
        );
        grid
    }

    // One cellular-automata pass, read from `previous` and written to a fresh grid.
    pub fn smooth(previous: &Grid) -> Grid {
        let mut next = Grid::filled(previous.width(), previous.height(), Cell::Floor);
        for y in 0..previous.height() {
            for x in 0..previous.width() {
                if Self::count_wall_neighbors(previous, x, y) >= WALL_NEIGHBOR_THRESHOLD {
                    next.set(GridPos::new(x, y), Cell::Wall);
                }
            }
        }
        next
    }

    // Walls among the 8 surrounding cells; cells off the grid count as walls.
    pub fn count_wall_neighbors(grid: &Grid, x: usize, y: usize) -> usize {
        let mut count = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if grid.is_wall_at(x as i64 + dx, y as i64 + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    fn add_border(grid: &mut Grid) {
        let (w, h) = (grid.width(), grid.height());
        for x in 0..w {
            grid.set(GridPos::new(x, 0), Cell::Wall);
            grid.set(GridPos::new(x, h - 1), Cell::Wall);
        }
        for y in 0..h {
            grid.set(GridPos::new(0, y), Cell::Wall);
            grid.set(GridPos::new(w - 1, y), Cell::Wall);
        }
    }

    // Runs after the border, so on grids narrower than 5 cells the spawn block wins.
    fn clear_spawn_area(grid: &mut Grid) {
        let center = Self::spawn_cell(grid.width(), grid.height());
        for y in center.y.saturating_sub(1)..=(center.y + 1).min(grid.height() - 1) {
            for x in center.x.saturating_sub(1)..=(center.x + 1).min(grid.width() - 1) {
                grid.set(GridPos::new(x, y), Cell::Floor);
            }
        }
    }

    pub fn spawn_cell(width: usize, height: usize) -> GridPos {
        GridPos::new(width / 2, height / 2)
    }
}
