// src/engine_lib/mod.rs

pub mod agent;
pub mod camera;
pub mod controller;
pub mod effects;
pub mod portal;
pub mod scene_logic;
pub mod scene_types; // plain data shared by the other modules

pub use agent::Agent;
pub use camera::Camera;
pub use controller::PlayerController;
pub use effects::{EffectEvent, EffectSink, LogEffects};
pub use portal::{Portal, PortalSystem};
pub use scene_logic::World;
pub use scene_types::{InputState, PortalId, PortalView, Pose, TickReport};
