//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker is the only task that touches the world; everything
//! else talks to it through channels.

mod simulation;

pub use simulation::{Command, SimulationWorker, WorldJob};
