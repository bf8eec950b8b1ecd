//! Per-object state owned by the world registry.

use std::sync::Arc;
use std::time::Duration;

use crate::definition::ObjectDefinition;
use crate::schedule::TimerHandle;

use super::common::{ObjectId, ObjectType, Position};

/// Ordered list of item types collected by an object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<ObjectType>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, item: &ObjectType) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectType> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[ObjectType] {
        &self.items
    }

    pub(crate) fn push(&mut self, item: ObjectType) {
        self.items.push(item);
    }

    /// Removes the first occurrence of `item`, returning whether one was held.
    pub(crate) fn take(&mut self, item: &ObjectType) -> bool {
        match self.items.iter().position(|held| held == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

/// A mobile, stateful entity living on the maze grid.
///
/// Instances are created and owned by [`World`](crate::engine::World); callers
/// read them through [`World::object`](crate::engine::World::object) and mutate
/// them only through the world's public operations.
#[derive(Clone, Debug)]
pub struct DynamicObject {
    id: ObjectId,
    object_type: ObjectType,
    definition: Arc<ObjectDefinition>,
    pub(crate) position: Position,
    pub(crate) inventory: Inventory,
    pub(crate) destroyed: bool,
    pub(crate) has_turn: bool,
    pub(crate) timer: Option<TimerHandle>,
    pub(crate) target: Option<ObjectId>,
}

impl DynamicObject {
    pub(crate) fn new(id: ObjectId, position: Position, definition: Arc<ObjectDefinition>) -> Self {
        Self {
            id,
            object_type: definition.object_type.clone(),
            definition,
            position,
            inventory: Inventory::new(),
            destroyed: false,
            has_turn: true,
            timer: None,
            target: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn object_type(&self) -> &ObjectType {
        &self.object_type
    }

    pub fn definition(&self) -> &Arc<ObjectDefinition> {
        &self.definition
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn has_turn(&self) -> bool {
        self.has_turn
    }

    /// Teleport destination, only ever set on teleporters.
    pub fn target(&self) -> Option<ObjectId> {
        self.target
    }

    pub fn is_projectile(&self) -> bool {
        self.definition.is_projectile()
    }

    /// Cadence of autonomous turns, `None` for turn-driven objects.
    pub fn interval(&self) -> Option<Duration> {
        self.definition.autonomous_interval()
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_removes_a_single_occurrence() {
        let key = ObjectType::from("redKey");
        let mut inventory = Inventory::new();
        inventory.push(key.clone());
        inventory.push(ObjectType::from("computer"));
        inventory.push(key.clone());

        assert!(inventory.take(&key));
        assert_eq!(inventory.len(), 2);
        assert!(inventory.contains(&key));
        assert_eq!(inventory.as_slice()[0], "computer");
    }

    #[test]
    fn take_missing_item_leaves_inventory_untouched() {
        let mut inventory = Inventory::new();
        inventory.push(ObjectType::from("computer"));

        assert!(!inventory.take(&ObjectType::from("redKey")));
        assert_eq!(inventory.len(), 1);
    }
}
