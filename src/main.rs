//! Headless Color Blocks session (default binary).
//!
//! Owns one grid engine and serves it over the line-JSON adapter. All engine
//! mutation happens on this thread, one queued command at a time.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use color_blocks::adapter::{Adapter, Session};
use color_blocks::config::Config;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "color_blocks=info,color_blocks_adapter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        grid_size = config.engine.grid_size,
        colors = config.engine.palette.len(),
        seed = config.engine.seed,
        settle_on_start = config.engine.settle_on_start,
        "configuration loaded"
    );

    let mut session = Session::new(&config.engine).context("failed to create grid")?;

    if config.adapter_disabled {
        tracing::info!("adapter disabled (COLOR_BLOCKS_DISABLED); nothing to serve");
        for row in session.engine().snapshot().rows() {
            tracing::info!(?row, "grid");
        }
        return Ok(());
    }

    let mut adapter = Adapter::start(config.server)?;
    tracing::info!(addr = %adapter.local_addr(), "session ready");

    while let Some(cmd) = adapter.recv() {
        for msg in session.apply(cmd) {
            adapter.send(msg);
        }
    }

    tracing::info!("adapter closed, shutting down");
    Ok(())
}
