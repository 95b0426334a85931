// src/lib.rs

pub mod app;
pub mod config;
pub mod demo_level;
pub mod engine_lib;
pub mod error;
pub mod world_lib;

pub use config::SimConfig;
pub use engine_lib::{InputState, PortalId, PortalSystem, World};
pub use error::{ConfigError, PortalError};
pub use world_lib::{CollisionWorld, Grid, GridGenerator, GridPos, PathFinder};
