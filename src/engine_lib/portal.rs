// src/engine_lib/portal.rs

use std::f32::consts::PI;

use glam::{Quat, Vec3};
use log::{debug, info, warn};

use crate::engine_lib::effects::{EffectEvent, EffectSink};
use crate::engine_lib::scene_types::{PortalId, Pose};
use crate::error::PortalError;
use crate::world_lib::collision::WorldRaycast;

// Distance a placed portal sits in front of its surface.
pub const PORTAL_SURFACE_OFFSET: f32 = 0.05;
// Bodies further than this from a portal never cross it.
pub const CROSSING_DISTANCE: f32 = 1.5;
pub const TELEPORT_COOLDOWN_TICKS: u32 = 10;
// Local axis that a placed portal turns towards its surface.
pub const PORTAL_FORWARD: Vec3 = Vec3::Z;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Portal {
    pub id: PortalId,
    pub position: Vec3,
    // Unit surface normal, pointing away from the hosting surface.
    pub normal: Vec3,
    pub orientation: Quat,
    pub active: bool,
}

impl Portal {
    pub fn new(id: PortalId) -> Self {
        Self {
            id,
            position: Vec3::ZERO,
            normal: Vec3::Z,
            orientation: Quat::IDENTITY,
            active: false,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.orientation)
    }
}

#[derive(Clone, Debug)]
pub struct PortalSystem {
    a: Portal,
    b: Portal,
    cooldown: u32,
}

impl Default for PortalSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PortalSystem {
    pub fn new() -> Self {
        Self {
            a: Portal::new(PortalId::A),
            b: Portal::new(PortalId::B),
            cooldown: 0,
        }
    }

    pub fn portal(&self, id: PortalId) -> &Portal {
        match id {
            PortalId::A => &self.a,
            PortalId::B => &self.b,
        }
    }

    fn portal_mut(&mut self, id: PortalId) -> &mut Portal {
        match id {
            PortalId::A => &mut self.a,
            PortalId::B => &mut self.b,
        }
    }

    pub fn both_active(&self) -> bool {
        self.a.active && self.b.active
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn place(
        &mut self,
        id: PortalId,
        position: Vec3,
        normal: Vec3,
        effects: &mut dyn EffectSink,
    ) -> Result<(), PortalError> {
        let Some(normal) = normal.try_normalize() else {
            warn!("rejecting portal {:?} placement with normal {:?}", id, normal);
            return Err(PortalError::DegenerateNormal(id));
        };

        let portal = self.portal_mut(id);
        portal.position = position + normal * PORTAL_SURFACE_OFFSET;
        portal.normal = normal;
        portal.orientation = Quat::from_rotation_arc(PORTAL_FORWARD, -normal);
        portal.active = true;

        info!("portal {:?} placed at {:?} facing {:?}", id, portal.position, normal);
        effects.emit(EffectEvent::PortalPlaced {
            id,
            position: portal.position,
            orientation: portal.orientation,
        });
        Ok(())
    }

    pub fn place_from_ray(
        &mut self,
        id: PortalId,
        origin: Vec3,
        direction: Vec3,
        world: &impl WorldRaycast,
        effects: &mut dyn EffectSink,
    ) -> Result<(), PortalError> {
        let hit = world
            .raycast(origin, direction)
            .ok_or(PortalError::NoSurfaceHit(id))?;
        self.place(id, hit.point, hit.normal, effects)
    }

    pub fn compute_linked_pose(source: &Portal, dest: &Portal, observer: Pose) -> Pose {
        let delta = (dest.orientation * source.orientation.inverse()).normalize();
        let relative = observer.position - source.position;
        Pose::new(
            dest.position + delta * relative,
            (delta * observer.orientation).normalize(),
        )
    }

    // Linked pose flipped 180° about world Y, so the body leaves facing away from `dest`.
    pub fn compute_teleport_pose(source: &Portal, dest: &Portal, observer: Pose) -> Pose {
        let linked = Self::compute_linked_pose(source, dest, observer);
        Pose::new(
            linked.position,
            (Quat::from_rotation_y(PI) * linked.orientation).normalize(),
        )
    }

    pub fn linked_pose(&self, source: PortalId, observer: Pose) -> Option<Pose> {
        self.both_active().then(|| {
            Self::compute_linked_pose(self.portal(source), self.portal(source.other()), observer)
        })
    }

    pub fn detect_crossing(&self, observer_position: Vec3, source: PortalId) -> bool {
        let portal = self.portal(source);
        if !portal.active || self.cooldown > 0 {
            return false;
        }
        if observer_position.distance(portal.position) > CROSSING_DISTANCE {
            return false;
        }
        (portal.position - observer_position).dot(portal.normal) > 0.0
    }

    pub fn teleport(&mut self, observer: &mut Pose, source: PortalId, effects: &mut dyn EffectSink) {
        let from = *self.portal(source);
        let to = *self.portal(source.other());
        *observer = Self::compute_teleport_pose(&from, &to, *observer);
        self.cooldown = TELEPORT_COOLDOWN_TICKS;

        debug!("teleported through {:?} to {:?}", source, observer.position);
        effects.emit(EffectEvent::TeleportOccurred {
            position: observer.position,
        });
    }

    // Only ticks while the pair is linked.
    pub fn advance_cooldown(&mut self) {
        if self.both_active() && self.cooldown > 0 {
            self.cooldown -= 1;
        }
    }

    // Checks a body against A then B and teleports it on the first crossing.
    pub fn check_body(&mut self, observer: &mut Pose, effects: &mut dyn EffectSink) -> Option<PortalId> {
        if !self.both_active() {
            return None;
        }
        for source in [PortalId::A, PortalId::B] {
            if self.detect_crossing(observer.position, source) {
                self.teleport(observer, source, effects);
                return Some(source);
            }
        }
        None
    }
}
