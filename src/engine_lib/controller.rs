// src/engine_lib/controller.rs

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Quat, Vec3};

use crate::engine_lib::scene_types::{InputState, Pose};
use crate::world_lib::geometry::Capsule;

pub const BASE_SPEED: f32 = 3.0;
pub const SPRINT_MULTIPLIER: f32 = 1.5;
pub const ACCELERATION: f32 = 20.0;
pub const DECELERATION: f32 = 10.0;
pub const GRAVITY: f32 = 9.8;
pub const JUMP_SPEED: f32 = 5.0;
// Lowest height of the body origin; stands in for ground contact.
pub const GROUND_HEIGHT: f32 = 1.0;
pub const BODY_HEIGHT: f32 = 1.6;
pub const BODY_RADIUS: f32 = 0.3;
pub const MOUSE_SENSITIVITY: f32 = 0.002;

// First-person body: yaw turns the body, pitch only tilts the eye.
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub position: Vec3,
    pub velocity: Vec3,
    yaw: f32,
    pitch: f32,
    pub on_ground: bool,
    pub mouse_sensitivity: f32,
}

impl PlayerController {
    pub fn new(position: Vec3, initial_yaw_rad: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: wrap_angle(initial_yaw_rad),
            pitch: 0.0,
            on_ground: true,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn advance(&mut self, input: &InputState, dt: f32) {
        self.yaw = wrap_angle(self.yaw - input.mouse_dx * self.mouse_sensitivity);
        self.pitch = (self.pitch - input.mouse_dy * self.mouse_sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);

        let mut local_move = Vec3::ZERO;
        if input.forward {
            local_move.z -= 1.0;
        }
        if input.backward {
            local_move.z += 1.0;
        }
        if input.left {
            local_move.x -= 1.0;
        }
        if input.right {
            local_move.x += 1.0;
        }
        let local_move = local_move.normalize_or_zero();
        let moving = local_move != Vec3::ZERO;

        let mut target_speed = BASE_SPEED;
        if input.sprint && moving {
            target_speed *= SPRINT_MULTIPLIER;
        }

        let target_velocity = Quat::from_rotation_y(self.yaw) * local_move * target_speed;
        let rate = if moving { ACCELERATION } else { DECELERATION };
        let blend = (dt * rate).min(1.0);
        self.velocity.x += (target_velocity.x - self.velocity.x) * blend;
        self.velocity.z += (target_velocity.z - self.velocity.z) * blend;

        if input.jump && self.on_ground {
            self.velocity.y = JUMP_SPEED;
            self.on_ground = false;
        }
        if !self.on_ground {
            self.velocity.y -= GRAVITY * dt;
        }

        self.position += self.velocity * dt;

        if self.position.y <= GROUND_HEIGHT {
            self.position.y = GROUND_HEIGHT;
            self.velocity.y = 0.0;
            self.on_ground = true;
        }
    }

    pub fn capsule(&self) -> Capsule {
        Capsule::upright(self.position, BODY_HEIGHT, BODY_RADIUS)
    }

    pub fn apply_correction(&mut self, displacement: Vec3) {
        self.position += displacement;
    }

    pub fn body_pose(&self) -> Pose {
        Pose::from_yaw(self.position, self.yaw)
    }

    pub fn eye_pose(&self) -> Pose {
        Pose::new(
            self.position,
            Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch),
        )
    }

    // Only the yaw of the orientation is kept.
    pub fn set_body_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.yaw = wrap_angle(pose.yaw());
    }
}

// Wraps an angle into [-PI, PI).
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
