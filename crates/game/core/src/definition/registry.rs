use std::collections::HashMap;
use std::sync::Arc;

use crate::env::DefinitionOracle;
use crate::state::ObjectType;

use super::ObjectDefinition;

/// In-memory definition store keyed by type name.
#[derive(Clone, Debug, Default)]
pub struct DefinitionRegistry {
    definitions: HashMap<ObjectType, Arc<ObjectDefinition>>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition, replacing any previous one with the same type.
    pub fn register(&mut self, definition: ObjectDefinition) -> Arc<ObjectDefinition> {
        let definition = Arc::new(definition);
        self.definitions
            .insert(definition.object_type.clone(), Arc::clone(&definition));
        definition
    }

    pub fn with(mut self, definition: ObjectDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = &ObjectType> {
        self.definitions.keys()
    }
}

impl DefinitionOracle for DefinitionRegistry {
    fn definition(&self, object_type: &ObjectType) -> Option<Arc<ObjectDefinition>> {
        self.definitions.get(object_type).cloned()
    }
}

impl FromIterator<ObjectDefinition> for DefinitionRegistry {
    fn from_iter<I: IntoIterator<Item = ObjectDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.register(definition);
        }
        registry
    }
}
