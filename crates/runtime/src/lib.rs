//! Async runtime hosting one maze world.
//!
//! This crate moves a [`maze_core::World`] onto a dedicated worker task, drives
//! interval-driven objects from wall-clock timers and broadcasts world events.
//! Consumers embed [`Runtime`] to drive ticks, subscribe to events and talk to
//! the world through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`timers`] implements interval timers on tokio
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod timers;

mod workers;

pub use api::{ObjectSnapshot, Result, RuntimeError, RuntimeHandle, WorldSnapshot};
pub use events::{Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use timers::TokioTimers;
pub use workers::WorldJob;
