// src/world_lib/mod.rs

pub mod collision;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod level;
pub mod pathfinding;
pub mod random;

pub use collision::{CollisionWorld, WorldRaycast};
pub use generator::GridGenerator;
pub use geometry::{BoxCollider, Capsule, RayHit};
pub use grid::{Cell, Grid, GridPos, MIN_LEVEL_SIZE};
pub use level::{GeometrySink, Level, LevelGeometry, LevelParams};
pub use pathfinding::{PathFinder, PathResult};
pub use random::SeededStream;
