use crate::state::{ObjectId, ObjectType, Position, Tick};

use super::isolation::CallbackKind;

/// Observable change recorded by the world, in causal order.
///
/// Events accumulate inside [`World`](super::World) until a driver calls
/// [`World::drain_events`](super::World::drain_events).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum WorldEvent {
    TickStarted {
        tick: Tick,
    },
    Spawned {
        id: ObjectId,
        object_type: ObjectType,
        position: Position,
    },
    Moved {
        id: ObjectId,
        from: Position,
        to: Position,
    },
    PlayerKilled {
        by: ObjectId,
        cause: String,
    },
    ItemPickedUp {
        id: ObjectId,
        item: ObjectType,
        at: Position,
    },
    ItemGiven {
        id: ObjectId,
        item: ObjectType,
    },
    TrapDeactivated {
        by: ObjectId,
        trap: ObjectType,
        at: Position,
    },
    Destroyed {
        id: ObjectId,
        object_type: ObjectType,
        on_map_reset: bool,
    },
    CallbackFailed {
        id: ObjectId,
        kind: CallbackKind,
        message: String,
    },
}

impl WorldEvent {
    /// Object the event is about, if any.
    pub fn subject(&self) -> Option<ObjectId> {
        match self {
            Self::TickStarted { .. } => None,
            Self::Spawned { id, .. }
            | Self::Moved { id, .. }
            | Self::ItemPickedUp { id, .. }
            | Self::ItemGiven { id, .. }
            | Self::Destroyed { id, .. }
            | Self::CallbackFailed { id, .. } => Some(*id),
            Self::PlayerKilled { by, .. } | Self::TrapDeactivated { by, .. } => Some(*by),
        }
    }
}
