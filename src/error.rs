// src/error.rs

use thiserror::Error;

use crate::engine_lib::scene_types::PortalId;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PortalError {
    #[error("portal {0:?} placement rejected: surface normal cannot be normalized")]
    DegenerateNormal(PortalId),
    #[error("portal {0:?} placement found no surface to attach to")]
    NoSurfaceHit(PortalId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("level size {width}x{height} is below the minimum of {min}")]
    InvalidLevelSize {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("tick rate must be positive")]
    InvalidTickRate,
}
