//! Data-driven maze content and loaders.
//!
//! This crate houses stock behaviors and provides loaders for RON/TOML data files:
//! - Stock behaviors and collision presets (straight line, random walk, ...)
//! - Object definitions (data-driven via RON)
//! - Map layouts with initial spawns (data-driven via RON)
//! - World configuration (data-driven via TOML)
//!
//! All loaders produce maze-core types directly: a `DefinitionRegistry`, a
//! `GridMap` and a `WorldConfig` ready to hand to a `World`.

pub mod behaviors;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use behaviors::{BehaviorSpec, CollisionSpec, RandomWalk, Stationary, StraightLine};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, DefinitionLoader, DefinitionSpec, MapLayout, MapLoader, Spawn,
    spawn_all,
};
