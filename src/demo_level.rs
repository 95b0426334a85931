// src/demo_level.rs

use log::{debug, warn};

use crate::config::SimConfig;
use crate::engine_lib::effects::EffectSink;
use crate::engine_lib::scene_logic::World;
use crate::world_lib::grid::GridPos;
use crate::world_lib::level::Level;

// Builds the startup world: generated level, player at the spawn cell, configured agents and
// the initial portal pair.
pub fn create_demo_world(config: &SimConfig, effects: &mut dyn EffectSink) -> World {
    let level = Level::generate(config.level.clone());
    debug!("minimap:\n{}", level.grid().render_ascii());

    let mut world = World::new(level).with_path_budget(config.path_budget_per_tick);

    for spawn in &config.agents {
        let cell = GridPos::new(spawn.x, spawn.y);
        if world.level().grid().get(cell).is_none() {
            warn!("agent spawn {:?} lies outside the level, skipping", cell);
            continue;
        }
        world.spawn_agent(cell.world_center());
    }

    for placement in &config.portals {
        if let Err(err) = world
            .portals
            .place(placement.id, placement.position, placement.normal, effects)
        {
            warn!("{}", err);
        }
    }

    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgentSpawn;
    use crate::engine_lib::effects::EffectEvent;
    use crate::engine_lib::scene_types::PortalId;

    #[test]
    fn default_world_matches_startup_layout() {
        let mut events: Vec<EffectEvent> = Vec::new();
        let world = create_demo_world(&SimConfig::default(), &mut events);
        assert_eq!(world.level().grid().width(), 50);
        assert_eq!(world.agents().len(), 1);
        assert!(world.portals.both_active());
        assert_eq!(events.len(), 2);
        assert_eq!(world.player.position.x, 25.5);
    }

    #[test]
    fn off_level_agents_and_bad_portals_are_skipped() {
        let config = SimConfig {
            agents: vec![AgentSpawn { x: 500, y: 2 }],
            portals: vec![crate::config::PortalPlacement {
                id: PortalId::B,
                position: glam::Vec3::ONE,
                normal: glam::Vec3::ZERO,
            }],
            ..SimConfig::default()
        };
        let mut events: Vec<EffectEvent> = Vec::new();
        let world = create_demo_world(&config, &mut events);
        assert!(world.agents().is_empty());
        assert!(!world.portals.portal(PortalId::B).active);
        assert!(events.is_empty());
    }
}
