// src/engine_lib/scene_logic.rs
use glam::Vec3;
use log::{debug, info, warn};

use crate::engine_lib::agent::Agent;
use crate::engine_lib::camera::Camera;
use crate::engine_lib::controller::{PlayerController, GROUND_HEIGHT};
use crate::engine_lib::effects::EffectSink;
use crate::engine_lib::portal::PortalSystem;
use crate::engine_lib::scene_types::{InputState, PortalId, TickReport};
use crate::error::PortalError;
use crate::world_lib::collision::WorldRaycast;
use crate::world_lib::level::{GeometrySink, Level, LevelParams};

// Seconds between two portal shots.
pub const PORTAL_FIRE_COOLDOWN: f32 = 1.0;
pub const DEFAULT_PATH_BUDGET_PER_TICK: usize = 4;

#[derive(Debug)]
pub struct World {
    level: Level,
    pub player: PlayerController,
    agents: Vec<Agent>,
    pub portals: PortalSystem,
    pub camera: Camera,
    path_budget_per_tick: usize,
    portal_fire_timer: f32,
}

impl World {
    pub fn new(level: Level) -> Self {
        let spawn = spawn_position(&level);
        Self {
            level,
            player: PlayerController::new(spawn, 0.0),
            agents: Vec::new(),
            portals: PortalSystem::new(),
            camera: Camera::default(),
            path_budget_per_tick: DEFAULT_PATH_BUDGET_PER_TICK,
            portal_fire_timer: 0.0,
        }
    }

    pub fn with_path_budget(mut self, budget: usize) -> Self {
        self.path_budget_per_tick = budget.max(1);
        self
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn spawn_agent(&mut self, position: Vec3) {
        self.agents.push(Agent::new(position));
    }

    pub fn damage_agent(&mut self, index: usize, amount: f32) {
        if let Some(agent) = self.agents.get_mut(index) {
            agent.take_damage(amount);
        }
    }

    // Swaps grid and colliders together; player respawns, agents replan.
    pub fn regenerate(&mut self, params: LevelParams, sink: &mut dyn GeometrySink) {
        let level = Level::generate(params);
        self.level = level;
        self.player = PlayerController::new(spawn_position(&self.level), self.player.yaw());
        for agent in &mut self.agents {
            agent.reset_path();
        }
        sink.rebuild(self.level.geometry());
    }

    pub fn fire_portal(&mut self, id: PortalId, effects: &mut dyn EffectSink) -> Result<(), PortalError> {
        let eye = self.player.eye_pose();
        self.portals
            .place_from_ray(id, eye.position, eye.forward(), self.level.collision(), effects)
    }

    pub fn look_distance(&self) -> Option<f32> {
        let eye = self.player.eye_pose();
        self.level
            .collision()
            .raycast(eye.position, eye.forward())
            .map(|hit| hit.distance)
    }

    // Order: move bodies, collide, cross portals, fire, recompute paths, compact, portal views.
    pub fn tick(&mut self, dt: f32, input: &InputState, effects: &mut dyn EffectSink) -> TickReport {
        let mut report = TickReport::default();

        self.player.advance(input, dt);
        for agent in &mut self.agents {
            agent.advance(dt);
        }

        let collision = self.level.collision();
        let push = collision.resolve(&self.player.capsule());
        self.player.apply_correction(push);
        for agent in &mut self.agents {
            agent.position += collision.resolve(&agent.capsule());
        }

        self.portals.advance_cooldown();
        let mut body = self.player.body_pose();
        if self.portals.check_body(&mut body, effects).is_some() {
            self.player.set_body_pose(body);
            report.player_teleported = true;
        }
        for agent in &mut self.agents {
            let mut pose = agent.pose();
            if self.portals.check_body(&mut pose, effects).is_some() {
                agent.set_pose(pose);
                report.agents_teleported += 1;
            }
        }

        self.portal_fire_timer = (self.portal_fire_timer - dt).max(0.0);
        if let Some(id) = input.fire_portal {
            if self.portal_fire_timer <= 0.0 {
                self.portal_fire_timer = PORTAL_FIRE_COOLDOWN;
                if let Err(err) = self.fire_portal(id, effects) {
                    warn!("{}", err);
                }
            }
        }

        let target = self.player.position;
        let grid = self.level.grid();
        for agent in &mut self.agents {
            if agent.needs_path() && report.paths_recomputed < self.path_budget_per_tick {
                agent.recompute_path(grid, target);
                report.paths_recomputed += 1;
            }
        }

        let before = self.agents.len();
        self.agents.retain(|agent| !agent.is_dead());
        report.agents_removed = before - self.agents.len();
        if report.agents_removed > 0 {
            info!("removed {} dead agent(s)", report.agents_removed);
        }

        report.portal_views = self.camera.portal_views(&self.portals, self.player.eye_pose());
        if report.player_teleported {
            debug!("player now at {:?}", self.player.position);
        }
        report
    }
}

fn spawn_position(level: &Level) -> Vec3 {
    let mut position = level.spawn_cell().world_center();
    position.y = GROUND_HEIGHT;
    position
}
