//! Content loaders for reading maze data from files.
//!
//! Definitions and map layouts are RON, world configuration is TOML. Every
//! loader reports failures through [`LoadResult`] with the offending path in
//! the message.

pub mod config;
pub mod definitions;
pub mod factory;
pub mod map;

pub use config::ConfigLoader;
pub use definitions::{DefinitionLoader, DefinitionSpec};
pub use factory::ContentFactory;
pub use map::{MapLayout, MapLoader, Spawn, spawn_all};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
