//! Topic-based event bus for runtime events.
//!
//! The simulation worker drains [`WorldEvent`](maze_core::WorldEvent)s after
//! every command and timer firing, stamps them with the current tick and
//! publishes them here. Consumers subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
