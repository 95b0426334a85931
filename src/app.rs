// src/app.rs

use std::fmt;

use glam::Vec3;
use log::info;

use crate::config::SimConfig;
use crate::demo_level;
use crate::engine_lib::effects::LogEffects;
use crate::engine_lib::scene_logic::World;
use crate::engine_lib::scene_types::{InputState, PortalId, TickReport};
use crate::world_lib::level::{GeometrySink, LevelGeometry, LevelParams};

// Longest frame time a single tick will simulate.
pub const MAX_FRAME_DT: f32 = 0.1;

// Walks forward, turns slowly, fires each portal once.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frame: u64,
}

impl ScriptedInput {
    pub fn next_input(&mut self) -> InputState {
        let frame = self.frame;
        self.frame += 1;
        InputState {
            forward: true,
            sprint: (frame / 120) % 2 == 1,
            jump: frame % 180 == 90,
            mouse_dx: 4.0,
            fire_portal: match frame {
                200 => Some(PortalId::A),
                400 => Some(PortalId::B),
                _ => None,
            },
            ..Default::default()
        }
    }
}

// Records geometry rebuilds; a renderer would upload the collider bytes here.
#[derive(Debug, Default)]
pub struct GeometryLog {
    pub rebuilds: usize,
}

impl GeometrySink for GeometryLog {
    fn rebuild(&mut self, geometry: LevelGeometry<'_>) {
        self.rebuilds += 1;
        info!(
            "level geometry: {}x{} cells, {} colliders ({} bytes)",
            geometry.grid.width(),
            geometry.grid.height(),
            geometry.colliders.len(),
            geometry.collider_bytes.len()
        );
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub simulated_secs: f32,
    pub player_teleports: usize,
    pub agent_teleports: usize,
    pub paths_recomputed: usize,
    pub agents_removed: usize,
    pub agents_remaining: usize,
    pub effects_emitted: usize,
    pub player_position: Vec3,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ticks ({:.2}s): {} player / {} agent teleports, {} path searches, {} agents left \
             ({} removed), {} effects, player at ({:.2}, {:.2}, {:.2})",
            self.ticks,
            self.simulated_secs,
            self.player_teleports,
            self.agent_teleports,
            self.paths_recomputed,
            self.agents_remaining,
            self.agents_removed,
            self.effects_emitted,
            self.player_position.x,
            self.player_position.y,
            self.player_position.z
        )
    }
}

pub struct SimulationApp {
    world: World,
    effects: LogEffects,
    geometry: GeometryLog,
    input: ScriptedInput,
    summary: RunSummary,
}

impl SimulationApp {
    pub fn new(config: &SimConfig) -> Self {
        let mut effects = LogEffects::default();
        let world = demo_level::create_demo_world(config, &mut effects);
        let mut geometry = GeometryLog::default();
        geometry.rebuild(world.level().geometry());
        Self {
            world,
            effects,
            geometry,
            input: ScriptedInput::default(),
            summary: RunSummary::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn regenerate(&mut self, params: LevelParams) {
        self.world.regenerate(params, &mut self.geometry);
    }

    pub fn update(&mut self, dt: f32) -> TickReport {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let input = self.input.next_input();
        let report = self.world.tick(dt, &input, &mut self.effects);

        self.summary.ticks += 1;
        self.summary.simulated_secs += dt;
        self.summary.player_teleports += usize::from(report.player_teleported);
        self.summary.agent_teleports += report.agents_teleported;
        self.summary.paths_recomputed += report.paths_recomputed;
        self.summary.agents_removed += report.agents_removed;
        report
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            agents_remaining: self.world.agents().len(),
            effects_emitted: self.effects.emitted,
            player_position: self.world.player.position,
            ..self.summary.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_fires_each_portal_once() {
        let mut input = ScriptedInput::default();
        let fired: Vec<_> = (0..600).filter_map(|_| input.next_input().fire_portal).collect();
        assert_eq!(fired, vec![PortalId::A, PortalId::B]);
    }

    #[test]
    fn update_accumulates_summary() {
        let mut app = SimulationApp::new(&SimConfig::default());
        for _ in 0..30 {
            app.update(1.0 / 60.0);
        }
        let summary = app.summary();
        assert_eq!(summary.ticks, 30);
        assert!((summary.simulated_secs - 0.5).abs() < 1e-3);
        assert!(summary.paths_recomputed >= 1);
        // the two startup portals
        assert!(summary.effects_emitted >= 2);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut app = SimulationApp::new(&SimConfig::default());
        app.update(5.0);
        assert!((app.summary().simulated_secs - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn regenerate_notifies_geometry_sink() {
        let mut app = SimulationApp::new(&SimConfig::default());
        app.regenerate(LevelParams {
            width: 12,
            height: 12,
            seed: "small".into(),
        });
        assert_eq!(app.geometry.rebuilds, 2);
        assert_eq!(app.world().level().grid().width(), 12);
    }
}
