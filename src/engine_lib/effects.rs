// src/engine_lib/effects.rs

use glam::{Quat, Vec3};
use log::debug;

use crate::engine_lib::scene_types::PortalId;

// Fire-and-forget events for particle/audio collaborators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectEvent {
    PortalPlaced {
        id: PortalId,
        position: Vec3,
        orientation: Quat,
    },
    TeleportOccurred {
        position: Vec3,
    },
}

pub trait EffectSink {
    fn emit(&mut self, event: EffectEvent);
}

impl EffectSink for Vec<EffectEvent> {
    fn emit(&mut self, event: EffectEvent) {
        self.push(event);
    }
}

// Sink that only writes events to the debug log.
#[derive(Debug, Default)]
pub struct LogEffects {
    pub emitted: usize,
}

impl EffectSink for LogEffects {
    fn emit(&mut self, event: EffectEvent) {
        self.emitted += 1;
        debug!("effect: {:?}", event);
    }
}
