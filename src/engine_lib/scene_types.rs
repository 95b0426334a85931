// src/engine_lib/scene_types.rs
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

// View direction of a body whose orientation is the identity.
pub const VIEW_FORWARD: Vec3 = Vec3::NEG_Z;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalId {
    A,
    B,
}

impl PortalId {
    pub fn other(self) -> PortalId {
        match self {
            PortalId::A => PortalId::B,
            PortalId::B => PortalId::A,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_yaw(position: Vec3, yaw: f32) -> Self {
        Self::new(position, Quat::from_rotation_y(yaw))
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * VIEW_FORWARD
    }

    pub fn yaw(&self) -> f32 {
        let (yaw, _pitch, _roll) = self.orientation.to_euler(glam::EulerRot::YXZ);
        yaw
    }

    // Local -> world transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub jump: bool,
    pub mouse_dx: f32,
    pub mouse_dy: f32,
    pub fire_portal: Option<PortalId>,
}

// Virtual camera for looking through `source` and seeing out of its partner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalView {
    pub source: PortalId,
    pub pose: Pose,
    pub view_matrix: Mat4,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub player_teleported: bool,
    pub agents_teleported: usize,
    pub paths_recomputed: usize,
    pub agents_removed: usize,
    pub portal_views: Vec<PortalView>,
}
