//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels and
//! the tokio-backed interval timers, and exposes a builder-based API for
//! clients to drive the world.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use maze_content::{MapLayout, Spawn};
use maze_core::{DefinitionOracle, MapHost, ObjectType, Position, Tick, World, WorldConfig};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::timers::TokioTimers;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub world: WorldConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that owns the world's worker task
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Run one global tick
    pub async fn step(&self) -> Result<Tick> {
        self.handle.tick().await
    }

    /// Run global ticks every `period`, `ticks` times
    ///
    /// Interval-driven objects keep acting between ticks on their own timers.
    pub async fn run_for(&self, ticks: u64, period: std::time::Duration) -> Result<Tick> {
        let mut interval = tokio::time::interval(period);
        let mut last = Tick::ZERO;
        for _ in 0..ticks {
            interval.tick().await;
            last = self.step().await?;
        }
        Ok(last)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Stops the worker even while cloned handles are still alive.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    host: Option<Box<dyn MapHost>>,
    definitions: Option<Arc<dyn DefinitionOracle>>,
    spawns: Vec<Spawn>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            host: None,
            definitions: None,
            spawns: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the world configuration
    pub fn world_config(mut self, world: WorldConfig) -> Self {
        self.config.world = world;
        self
    }

    /// Set the required map host
    pub fn host(mut self, host: impl MapHost + 'static) -> Self {
        self.host = Some(Box::new(host));
        self
    }

    /// Set the required definition oracle
    pub fn definitions(mut self, definitions: impl DefinitionOracle + 'static) -> Self {
        self.definitions = Some(Arc::new(definitions));
        self
    }

    /// Use a loaded layout: its grid becomes the host and its spawns are
    /// queued after any already added
    pub fn layout(mut self, layout: MapLayout) -> Self {
        self.host = Some(Box::new(layout.map));
        self.spawns.extend(layout.spawns);
        self
    }

    /// Queue an object to create when the runtime is built
    pub fn spawn(mut self, object_type: impl Into<ObjectType>, position: Position) -> Self {
        self.spawns.push(Spawn {
            object_type: object_type.into(),
            position,
        });
        self
    }

    /// Build the runtime
    ///
    /// Queued spawns are created in order before the worker starts; their
    /// events are published when it does.
    pub async fn build(self) -> Result<Runtime> {
        let host = self.host.ok_or(RuntimeError::MissingHost)?;
        let definitions = self.definitions.ok_or(RuntimeError::MissingDefinitions)?;
        let (timers, firing_rx) =
            TokioTimers::on_current_runtime().map_err(RuntimeError::NoTokioRuntime)?;

        let mut world = World::new(self.config.world, host, definitions, Box::new(timers));
        maze_content::spawn_all(&self.spawns, &mut world)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(world, command_rx, firing_rx, event_bus);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
