//! Headless maze client binary.
//!
//! Composition root that loads content from a data directory, starts a
//! [`maze_runtime::Runtime`] on it and drives global ticks at a fixed cadence
//! while interval-driven objects act on their own timers. Every world event is
//! logged as one JSON line.
//!
//! # Examples
//!
//! ```bash
//! # Bundled tutorial map, 20 ticks at 250ms
//! MAZE_TICKS=20 MAZE_TICK_MS=250 cargo run -p maze-client
//!
//! # Only the event stream
//! RUST_LOG=maze_client::events=info cargo run -p maze-client
//! ```

mod config;

use anyhow::{Context, Result};
use maze_content::ContentFactory;
use maze_core::GridMap;
use maze_runtime::{Event, Runtime, RuntimeConfig, RuntimeHandle, Topic};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;

const EVENTS: &str = "maze_client::events";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        content_dir = %config.content_dir.display(),
        map = %config.map,
        ticks = config.ticks,
        tick_ms = config.tick_period.as_millis() as u64,
        "Starting maze client"
    );

    let runtime = build_runtime(&config).await?;
    let loggers = spawn_event_loggers(&runtime.handle());

    let outcome = tokio::select! {
        result = drive(&runtime, &config) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down");
            Ok(())
        }
    };

    let snapshot = runtime.handle().query_world().await?;
    tracing::info!(
        tick = %snapshot.tick,
        live_objects = snapshot.objects.len(),
        active_timers = snapshot.active_timers,
        "Final world state"
    );

    runtime.shutdown().await?;
    for logger in loggers {
        logger.abort();
    }

    outcome
}

async fn build_runtime(config: &ClientConfig) -> Result<Runtime> {
    let factory = ContentFactory::new(&config.content_dir);

    let mut world = factory.load_config()?;
    if let Some(dummy) = config.dummy {
        world.dummy = dummy;
    }
    let definitions = factory.load_definitions()?;
    let layout = factory
        .load_map(&config.map)
        .with_context(|| format!("Failed to load map '{}'", config.map))?;

    tracing::debug!(
        definitions = definitions.len(),
        spawns = layout.spawns.len(),
        dummy = world.dummy,
        "Content loaded"
    );

    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            world,
            event_buffer_size: config.event_buffer,
            ..RuntimeConfig::default()
        })
        .definitions(definitions)
        .layout(layout)
        .build()
        .await
        .context("Failed to start runtime")?;

    Ok(runtime)
}

/// Runs the configured number of ticks, stopping early once the player dies.
async fn drive(runtime: &Runtime, config: &ClientConfig) -> Result<()> {
    let handle = runtime.handle();
    let mut interval = tokio::time::interval(config.tick_period);

    for _ in 0..config.ticks {
        interval.tick().await;
        let tick = runtime.step().await?;
        for line in drain_status(&handle).await? {
            tracing::info!(%tick, "{line}");
        }

        if let Some(cause) = cause_of_death(&handle).await? {
            tracing::info!(%tick, %cause, "Player died");
            return Ok(());
        }
    }

    tracing::info!(ticks = config.ticks, "Tick budget exhausted");
    Ok(())
}

async fn cause_of_death(handle: &RuntimeHandle) -> Result<Option<String>> {
    let cause = handle
        .with_world(|world| {
            world
                .host_as::<GridMap>()
                .and_then(|grid| grid.player_state().cause_of_death().map(str::to_owned))
        })
        .await?;
    Ok(cause)
}

/// Takes the status lines written since the last call, keeping the host's log short.
async fn drain_status(handle: &RuntimeHandle) -> Result<Vec<String>> {
    let lines = handle
        .with_world(|world| {
            world
                .host_as_mut::<GridMap>()
                .map(GridMap::drain_status)
                .unwrap_or_default()
        })
        .await?;
    Ok(lines)
}

fn spawn_event_loggers(handle: &RuntimeHandle) -> Vec<JoinHandle<()>> {
    handle
        .subscribe_multiple(&Topic::ALL)
        .into_iter()
        .map(|(topic, rx)| tokio::spawn(log_events(topic, rx)))
        .collect()
}

async fn log_events(topic: Topic, mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(line) => tracing::info!(target: EVENTS, %topic, "{line}"),
                Err(error) => tracing::warn!(target: EVENTS, %topic, %error, "Unserialisable event"),
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(target: EVENTS, %topic, skipped, "Event logger fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
