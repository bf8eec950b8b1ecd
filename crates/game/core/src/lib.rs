//! Deterministic core for dynamic objects living on a grid maze.
//!
//! `maze-core` defines the object model (types, definitions, inventories),
//! the narrow collaborator traits the world depends on (map, player,
//! definitions, timers) and the [`World`](engine::World) registry that runs
//! turns, moves, tile effects and destruction. All state mutation flows
//! through the world; user hooks run behind an isolation boundary and only
//! see an [`ObjectHandle`](engine::ObjectHandle).
pub mod action;
pub mod config;
pub mod definition;
pub mod engine;
pub mod env;
pub mod error;
pub mod schedule;
pub mod state;

pub use action::{Direction, MoveOutcome, resolve_destination};
pub use config::WorldConfig;
pub use definition::{
    Behavior, CallbackError, CallbackResult, CollisionHandler, DeactivateHandler,
    DefinitionKind, DefinitionRegistry, DestroyHandler, ObjectDefinition, ObjectFlags,
};
pub use engine::{CallbackKind, ObjectHandle, ObjectQuery, World, WorldEvent, run_isolated};
pub use env::{
    DefinitionOracle, GridMap, MapDimensions, MapHost, Player, SimplePlayer, Sound, TerrainKind,
};
pub use error::{ErrorSeverity, MazeError, ObjectError, WorldError};
pub use schedule::{IntervalTimers, ManualTimers, TimerHandle};
pub use state::{DynamicObject, Inventory, ObjectId, ObjectType, Position, Tick};
