use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shift_engine::api::{AppState, create_router};
use shift_engine::calculation::get_schedule;
use shift_engine::config::ConfigLoader;
use shift_engine::models::ShiftType;
use shift_engine::polling::{CurrentSlotWatcher, SystemClock};

#[derive(Parser)]
#[command(name = "shift-engine")]
#[command(version, about = "Factory shift time slot engine")]
struct Cli {
    /// Directory holding catalog.yaml and shifts/*.yaml
    #[arg(long, default_value = "./config/factory")]
    config: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,

    /// Log the current slot of this shift whenever it changes
    #[arg(long, value_parser = parse_shift_type)]
    watch: Option<ShiftType>,
}

fn parse_shift_type(value: &str) -> Result<ShiftType, String> {
    value.parse().map_err(|err: shift_engine::error::EngineError| err.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading catalog from {}", cli.config.display()))?;
    info!(
        catalog = %config.catalog().metadata().name,
        version = %config.catalog().metadata().version,
        "Loaded shift catalog"
    );

    let state = AppState::new(config);

    if let Some(shift_type) = cli.watch {
        get_schedule(state.catalog(), shift_type)
            .with_context(|| format!("cannot watch {}", shift_type))?;

        let (watcher, mut receiver) = CurrentSlotWatcher::with_catalog_interval(
            state.catalog_handle(),
            shift_type,
            Arc::new(SystemClock),
        );
        let handle = watcher.spawn();
        // The watcher logs each change and stops once its receiver is dropped.
        tokio::spawn(async move { while receiver.changed().await.is_ok() {} });
        tokio::spawn(async move {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!(shift_type = %shift_type, error = %err, "Slot watcher stopped");
                }
                Err(err) => {
                    error!(shift_type = %shift_type, error = %err, "Slot watcher task failed");
                }
            }
        });
    }

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    info!("Listening on http://{}", cli.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
