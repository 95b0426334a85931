// src/main.rs

use std::time::{Duration, Instant};

use log::{error, info};
use portal_maze::app::SimulationApp;
use portal_maze::config::SimConfig;
use portal_maze::error::ConfigError;

fn load_config() -> Result<SimConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {}", path);
            SimConfig::load(path)?
        }
        None => SimConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

pub async fn run(config: SimConfig) {
    let mut app_state = SimulationApp::new(&config);
    let mut frame_clock = tokio::time::interval(Duration::from_secs_f32(config.tick_interval_secs()));
    let mut last_time = Instant::now();

    for _ in 0..config.ticks {
        frame_clock.tick().await;
        let now = Instant::now();
        let dt = (now - last_time).as_secs_f32();
        last_time = now;

        let report = app_state.update(dt);
        if report.player_teleported {
            info!("player teleported");
        }
    }

    info!("{}", app_state.summary());
}

#[tokio::main]
async fn main() {
    env_logger::init();

    match load_config() {
        Ok(config) => run(config).await,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}
