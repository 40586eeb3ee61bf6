//! Application entry point.

use std::path::PathBuf;

use winit::event_loop::{ControlFlow, EventLoop};
use log::{info, error};

use ebisan::game::config::DEFAULT_CONFIG_PATH;
use ebisan::{App, GameConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Allows the log level to be set through the RUST_LOG env var.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,ebisan=info")).init();
    info!("Logger initialized");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = GameConfig::load_or_default(&config_path).map_err(|e| {
        error!("{}", e);
        e
    })?;

    let event_loop = EventLoop::new().map_err(|e| {
        error!("Failed to create event loop: {:?}", e);
        e
    })?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Start the main app loop
    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Application error: {:?}", e);
        return Err(Box::new(e));
    }

    Ok(())
}
