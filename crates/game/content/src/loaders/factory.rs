//! Content factory for loading a whole maze from a data directory.

use std::path::{Path, PathBuf};

use maze_core::{DefinitionRegistry, WorldConfig};

use crate::loaders::{ConfigLoader, DefinitionLoader, LoadResult, MapLayout, MapLoader};

/// Content factory that loads all maze content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── definitions.ron
/// └── maps/
///     ├── tutorial.ron
///     └── vault.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load world configuration from `config.toml`, or defaults when the file
    /// does not exist.
    pub fn load_config(&self) -> LoadResult<WorldConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(
                target: "maze_content::loaders",
                path = %path.display(),
                "no config file, using defaults"
            );
            return Ok(WorldConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the definition catalog from `definitions.ron`.
    pub fn load_definitions(&self) -> LoadResult<DefinitionRegistry> {
        let path = self.data_dir.join("definitions.ron");
        DefinitionLoader::load(&path)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapLayout> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
