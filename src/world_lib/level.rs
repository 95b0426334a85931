// src/world_lib/level.rs

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::world_lib::collision::CollisionWorld;
use crate::world_lib::generator::GridGenerator;
use crate::world_lib::geometry::BoxCollider;
use crate::world_lib::grid::{Grid, GridPos};

pub const WALL_HEIGHT: f32 = 2.0;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelParams {
    pub width: usize,
    pub height: usize,
    pub seed: String,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            seed: "default".to_string(),
        }
    }
}

// Finished level data handed to whoever builds the visual geometry.
#[derive(Clone, Copy, Debug)]
pub struct LevelGeometry<'a> {
    pub grid: &'a Grid,
    pub colliders: &'a [BoxCollider],
    pub collider_bytes: &'a [u8],
}

pub trait GeometrySink {
    // Replaces any previously built geometry.
    fn rebuild(&mut self, geometry: LevelGeometry<'_>);
}

// A generated grid together with the colliders derived from it. Never mutated after creation.
#[derive(Clone, Debug)]
pub struct Level {
    params: LevelParams,
    grid: Grid,
    collision: CollisionWorld,
}

impl Level {
    pub fn generate(params: LevelParams) -> Self {
        let grid = GridGenerator::generate(params.width, params.height, &params.seed);
        Self::from_grid(params, grid)
    }

    pub fn from_grid(params: LevelParams, grid: Grid) -> Self {
        let collision = build_wall_colliders(&grid);
        info!(
            "level {}x{} seed {:?}: {} walls, {} colliders",
            grid.width(),
            grid.height(),
            params.seed,
            grid.wall_count(),
            collision.len()
        );
        Self {
            params,
            grid,
            collision,
        }
    }

    pub fn params(&self) -> &LevelParams {
        &self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn collision(&self) -> &CollisionWorld {
        &self.collision
    }

    pub fn spawn_cell(&self) -> GridPos {
        GridGenerator::spawn_cell(self.grid.width(), self.grid.height())
    }

    pub fn geometry(&self) -> LevelGeometry<'_> {
        LevelGeometry {
            grid: &self.grid,
            colliders: self.collision.colliders(),
            collider_bytes: self.collision.as_bytes(),
        }
    }
}

// One box per wall cell that touches floor on a 4-neighbour; buried walls are unreachable.
pub fn build_wall_colliders(grid: &Grid) -> CollisionWorld {
    let mut world = CollisionWorld::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = GridPos::new(x, y);
            if !grid.is_floor(pos) && grid.has_floor_neighbor(pos) {
                world.add_collider(
                    Vec3::new(x as f32, 0.0, y as f32),
                    Vec3::new(x as f32 + 1.0, WALL_HEIGHT, y as f32 + 1.0),
                );
            }
        }
    }
    world
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exposed_walls_get_colliders() {
        let grid = Grid::from_rows(&["#####", "#####", "##.##", "#####", "#####"]);
        let world = build_wall_colliders(&grid);
        assert_eq!(world.len(), 4);
        let mins: Vec<_> = world.colliders().iter().map(|c| c.min).collect();
        assert!(mins.contains(&Vec3::new(2.0, 0.0, 1.0)));
        assert!(mins.contains(&Vec3::new(1.0, 0.0, 2.0)));
        assert!(mins.contains(&Vec3::new(3.0, 0.0, 2.0)));
        assert!(mins.contains(&Vec3::new(2.0, 0.0, 3.0)));
    }

    #[test]
    fn collider_spans_cell_and_wall_height() {
        let grid = Grid::from_rows(&["#.", ".."]);
        let world = build_wall_colliders(&grid);
        assert_eq!(world.colliders(), &[BoxCollider::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 1.0))]);
    }

    #[test]
    fn geometry_exposes_matching_bytes() {
        let level = Level::generate(LevelParams::default());
        let geometry = level.geometry();
        assert_eq!(
            geometry.collider_bytes.len(),
            geometry.colliders.len() * std::mem::size_of::<BoxCollider>()
        );
        assert_eq!(geometry.grid.width(), 50);
    }

    #[test]
    fn spawn_cell_is_grid_centre() {
        let level = Level::generate(LevelParams {
            width: 21,
            height: 13,
            seed: "x".into(),
        });
        assert_eq!(level.spawn_cell(), GridPos::new(10, 6));
        assert!(level.grid().is_floor(level.spawn_cell()));
    }
}
