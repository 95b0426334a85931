// src/engine_lib/agent.rs

// Agents recompute their path on a fixed interval and walk cell centre to cell centre.
// An empty path means the agent holds position until the next recompute.

use glam::Vec3;
use log::debug;

use crate::engine_lib::controller::wrap_angle;
use crate::engine_lib::scene_types::Pose;
use crate::world_lib::geometry::Capsule;
use crate::world_lib::grid::Grid;
use crate::world_lib::pathfinding::{PathFinder, PathResult};

pub const AGENT_SPEED: f32 = 2.0;
pub const AGENT_MAX_HEALTH: f32 = 100.0;
pub const PATH_RECOMPUTE_INTERVAL: f32 = 1.0;
// An agent counts as having reached a waypoint within this distance.
pub const WAYPOINT_REACHED_DISTANCE: f32 = 0.1;
pub const TURN_RATE: f32 = 5.0;
pub const AGENT_HEIGHT: f32 = 1.6;
pub const AGENT_RADIUS: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Vec3,
    pub yaw: f32,
    pub health: f32,
    dead: bool,
    path: PathResult,
    path_index: usize,
    path_timer: f32,
}

impl Agent {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            health: AGENT_MAX_HEALTH,
            dead: false,
            path: Vec::new(),
            path_index: 0,
            // Due on the first tick.
            path_timer: PATH_RECOMPUTE_INTERVAL,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn path(&self) -> &PathResult {
        &self.path
    }

    pub fn needs_path(&self) -> bool {
        !self.dead && self.path_timer >= PATH_RECOMPUTE_INTERVAL
    }

    // Marks the agent dead once health runs out; removal happens at the end of the tick.
    pub fn take_damage(&mut self, amount: f32) {
        if self.dead {
            return;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.dead = true;
        }
    }

    // Drops the current path and makes the next recompute due immediately.
    pub fn reset_path(&mut self) {
        self.path.clear();
        self.path_index = 0;
        self.path_timer = PATH_RECOMPUTE_INTERVAL;
    }

    pub fn recompute_path(&mut self, grid: &Grid, target: Vec3) {
        let (Some(start), Some(end)) = (grid.cell_at_world(self.position), grid.cell_at_world(target)) else {
            self.path.clear();
            self.path_index = 0;
            self.path_timer = 0.0;
            return;
        };
        self.path = PathFinder::find_path(grid, start, end);
        if self.path.is_empty() {
            debug!("agent at {:?} has no path to {:?}", start, end);
        }
        self.path_index = 0;
        self.path_timer = 0.0;
    }

    // Advances the recompute timer and walks along the current path.
    pub fn advance(&mut self, dt: f32) {
        if self.dead {
            return;
        }
        self.path_timer += dt;

        let Some(next_cell) = self.path.get(self.path_index) else {
            return;
        };
        let mut waypoint = next_cell.world_center();
        waypoint.y = self.position.y;

        let to_waypoint = waypoint - self.position;
        let distance = to_waypoint.length();
        if distance < WAYPOINT_REACHED_DISTANCE {
            self.path_index += 1;
            return;
        }

        let direction = to_waypoint / distance;
        let step = (AGENT_SPEED * dt).min(distance);
        self.position += direction * step;

        let target_yaw = direction.x.atan2(direction.z);
        let diff = wrap_angle(target_yaw - self.yaw);
        self.yaw = wrap_angle(self.yaw + diff * (TURN_RATE * dt).min(1.0));
    }

    pub fn capsule(&self) -> Capsule {
        Capsule::upright(self.position, AGENT_HEIGHT, AGENT_RADIUS)
    }

    pub fn pose(&self) -> Pose {
        Pose::from_yaw(self.position, self.yaw)
    }

    // A relocated agent's path no longer starts where it stands.
    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.yaw = wrap_angle(pose.yaw());
        self.reset_path();
    }
}
