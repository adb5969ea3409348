use anyhow::{Context, Result};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use comet::app::App;
use comet::config::HostConfig;
use comet::constants::LOOP_TIME;
use comet::formatter::FrameFormatter;
use comet::save::JsonFileSaveStore;

fn init_tracing() -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().event_format(FrameFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")
}

/// Runs the game headless with the autopilot until it goes home or the demo time runs out.
pub fn main() -> Result<()> {
    init_tracing()?;

    let config = HostConfig::from_env();
    let store = JsonFileSaveStore::new(config.save_path.clone());
    let mut app = App::new(store, &config).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    Ok(())
}
