// src/config.rs

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::engine_lib::scene_logic::DEFAULT_PATH_BUDGET_PER_TICK;
use crate::engine_lib::scene_types::PortalId;
use crate::error::ConfigError;
use crate::world_lib::grid::MIN_LEVEL_SIZE;
use crate::world_lib::level::LevelParams;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSpawn {
    pub x: usize,
    pub y: usize,
}

// A portal placed directly on a surface at startup, without a raycast.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortalPlacement {
    pub id: PortalId,
    pub position: Vec3,
    pub normal: Vec3,
}

// Headless run settings. Every field is optional in the RON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub level: LevelParams,
    pub tick_rate_hz: f32,
    pub ticks: u32,
    pub agents: Vec<AgentSpawn>,
    pub portals: Vec<PortalPlacement>,
    pub path_budget_per_tick: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            level: LevelParams::default(),
            tick_rate_hz: 60.0,
            ticks: 600,
            agents: vec![AgentSpawn { x: 30, y: 30 }],
            portals: vec![
                PortalPlacement {
                    id: PortalId::A,
                    position: Vec3::new(20.0, 1.0, 20.0),
                    normal: Vec3::Z,
                },
                PortalPlacement {
                    id: PortalId::B,
                    position: Vec3::new(30.0, 1.0, 30.0),
                    normal: Vec3::NEG_Z,
                },
            ],
            path_budget_per_tick: DEFAULT_PATH_BUDGET_PER_TICK,
        }
    }
}

impl SimConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    // Rejects settings the simulation core assumes never happen.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.level.width, self.level.height);
        if width < MIN_LEVEL_SIZE || height < MIN_LEVEL_SIZE {
            return Err(ConfigError::InvalidLevelSize {
                width,
                height,
                min: MIN_LEVEL_SIZE,
            });
        }
        if !(self.tick_rate_hz > 0.0 && self.tick_rate_hz.is_finite()) {
            return Err(ConfigError::InvalidTickRate);
        }
        Ok(())
    }

    pub fn tick_interval_secs(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }
}
