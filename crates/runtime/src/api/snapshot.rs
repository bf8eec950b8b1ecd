//! Owned, serialisable views of the world handed out by the runtime.

use maze_core::{DynamicObject, ObjectId, ObjectType, Position, Tick, World};
use serde::{Deserialize, Serialize};

/// Read-only copy of one live object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub object_type: ObjectType,
    pub position: Position,
    pub inventory: Vec<ObjectType>,
    pub has_turn: bool,
    pub target: Option<ObjectId>,
}

impl From<&DynamicObject> for ObjectSnapshot {
    fn from(object: &DynamicObject) -> Self {
        Self {
            id: object.id(),
            object_type: object.object_type().clone(),
            position: object.position(),
            inventory: object.inventory().as_slice().to_vec(),
            has_turn: object.has_turn(),
            target: object.target(),
        }
    }
}

/// Read-only copy of the registry between two commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub objects: Vec<ObjectSnapshot>,
    pub active_timers: usize,
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            tick: world.current_tick(),
            objects: world.live_objects().map(ObjectSnapshot::from).collect(),
            active_timers: world.timers().active(),
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&ObjectSnapshot> {
        self.objects.iter().find(|object| object.id == id)
    }
}
