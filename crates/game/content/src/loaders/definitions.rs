//! Object definition catalog loader.
//!
//! ```ron
//! (
//!     definitions: [
//!         (object_type: "redKey", kind: item),
//!         (object_type: "mine", kind: trap, deactivated_by: ["boulder"]),
//!         (
//!             object_type: "boulder",
//!             behavior: Some(Straight(left)),
//!             on_collision: Some(KillPlayer(cause: None)),
//!         ),
//!         (object_type: "dart", projectile: true, interval_ms: 150, behavior: Some(Straight(down))),
//!     ],
//! )
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use maze_core::{DefinitionKind, DefinitionRegistry, ObjectDefinition, ObjectType};
use serde::{Deserialize, Serialize};

use crate::behaviors::{BehaviorSpec, CollisionSpec, status_hook};
use crate::loaders::{LoadResult, read_file};

/// One definition as written in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSpec {
    pub object_type: ObjectType,
    #[serde(default)]
    pub kind: DefinitionKind,
    #[serde(default)]
    pub projectile: bool,
    /// Autonomous cadence in milliseconds; zero means turn-driven.
    #[serde(default)]
    pub interval_ms: u64,
    #[serde(default)]
    pub deactivated_by: Vec<ObjectType>,
    #[serde(default)]
    pub behavior: Option<BehaviorSpec>,
    #[serde(default)]
    pub on_collision: Option<CollisionSpec>,
    /// Status line written when the object is destroyed in game.
    #[serde(default)]
    pub on_destroy: Option<String>,
    /// Status line written when a listed mover disarms the trap.
    #[serde(default)]
    pub on_deactivate: Option<String>,
}

impl DefinitionSpec {
    pub fn build(self) -> ObjectDefinition {
        let mut definition = ObjectDefinition::new(self.object_type, self.kind)
            .deactivated_by(self.deactivated_by);

        if self.projectile {
            definition = definition.projectile();
        }
        if self.interval_ms > 0 {
            definition = definition.with_interval(Duration::from_millis(self.interval_ms));
        }
        if let Some(behavior) = &self.behavior {
            definition = definition.with_behavior(behavior.build());
        }
        if let Some(collision) = &self.on_collision {
            definition = collision.apply(definition);
        }
        if let Some(message) = self.on_destroy {
            definition = definition.on_destroy(status_hook(message));
        }
        if let Some(message) = self.on_deactivate {
            definition = definition.on_deactivate(status_hook(message));
        }

        definition
    }

    fn validate(&self) -> LoadResult<()> {
        let is_trap = self.kind == DefinitionKind::Trap;
        if !is_trap && (!self.deactivated_by.is_empty() || self.on_deactivate.is_some()) {
            anyhow::bail!(
                "'{}' is not a trap but lists deactivation settings",
                self.object_type
            );
        }
        if self.kind != DefinitionKind::Dynamic
            && (self.behavior.is_some() || self.interval_ms > 0 || self.projectile)
        {
            anyhow::bail!(
                "'{}' is a {} tile and cannot move on its own",
                self.object_type,
                self.kind
            );
        }
        Ok(())
    }
}

/// Definition catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionCatalog {
    pub definitions: Vec<DefinitionSpec>,
}

/// Loader for object definitions from RON files.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Load a definition catalog into a registry.
    pub fn load(path: &Path) -> LoadResult<DefinitionRegistry> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<DefinitionRegistry> {
        let catalog: DefinitionCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse definition catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        let mut registry = DefinitionRegistry::new();
        for spec in catalog.definitions {
            if !seen.insert(spec.object_type.clone()) {
                anyhow::bail!("Duplicate definition for '{}'", spec.object_type);
            }
            spec.validate()?;
            registry.register(spec.build());
        }

        tracing::debug!(
            target: "maze_content::loaders",
            definitions = registry.len(),
            "loaded definition catalog"
        );
        Ok(registry)
    }
}
