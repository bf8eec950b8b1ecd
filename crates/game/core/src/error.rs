//! Error types surfaced by maze-core.
//!
//! Two separate channels exist:
//!
//! - **Precondition errors** ([`ObjectError`], [`WorldError`]) are returned
//!   synchronously to whoever called a public operation.
//! - **Callback faults** ([`CallbackError`](crate::definition::CallbackError)
//!   and panics raised inside user hooks) never reach the caller; the isolation
//!   boundary in [`engine`](crate::engine) turns them into status messages.

use crate::state::{ObjectId, ObjectType};

/// Severity level of an error, used for categorization and logging.
///
/// - **Validation**: the caller broke a precondition and should not retry unchanged
/// - **Internal**: the caller referenced state that does not exist (stale handle,
///   unknown definition); usually a bug in the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for maze-core errors.
pub trait MazeError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, handy for metrics and assertions.
    fn error_code(&self) -> &'static str;
}

/// Rejected call to one of an object's public operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectError {
    #[error("`{0}` is not a direction (expected up, down, left or right)")]
    InvalidDirection(String),

    #[error("{object_type} {id} cannot move outside of its turn")]
    NotYourTurn { id: ObjectId, object_type: ObjectType },

    #[error("{object_type} {id} can only hand over items while touching the player")]
    NotAdjacent { id: ObjectId, object_type: ObjectType },

    #[error("{object_type} {id} does not hold {item}")]
    ItemNotHeld {
        id: ObjectId,
        object_type: ObjectType,
        item: ObjectType,
    },

    #[error("set_target is only available on teleporters, not on {object_type} {id}")]
    WrongObjectType { id: ObjectId, object_type: ObjectType },

    #[error("teleporter {0} cannot target itself")]
    SelfTarget(ObjectId),

    #[error("object {0} does not exist")]
    UnknownObject(ObjectId),

    #[error("object {0} has been destroyed")]
    Destroyed(ObjectId),
}

impl MazeError for ObjectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownObject(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDirection(_) => "invalid_direction",
            Self::NotYourTurn { .. } => "not_your_turn",
            Self::NotAdjacent { .. } => "not_adjacent",
            Self::ItemNotHeld { .. } => "item_not_held",
            Self::WrongObjectType { .. } => "wrong_object_type",
            Self::SelfTarget(_) => "self_target",
            Self::UnknownObject(_) => "unknown_object",
            Self::Destroyed(_) => "destroyed",
        }
    }
}

/// Failure of a registry-level operation on [`World`](crate::engine::World).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("no definition registered for object type `{0}`")]
    UnknownDefinition(ObjectType),
}

impl MazeError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDefinition(_) => "unknown_definition",
        }
    }
}
