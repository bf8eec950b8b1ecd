use std::sync::Arc;

use crate::definition::ObjectDefinition;
use crate::state::ObjectType;

/// Read-only lookup of object definitions by type name.
///
/// Definitions are owned by the oracle; objects and the world only hold
/// shared references to them.
pub trait DefinitionOracle: Send + Sync {
    fn definition(&self, object_type: &ObjectType) -> Option<Arc<ObjectDefinition>>;
}
