//! Capability traits attached to object definitions.
//!
//! A definition carries any subset of the four hooks below. Each is a plain
//! trait with a blanket implementation for matching closures, so content can
//! register either a named type or an inline `|me| { ... }` closure.
//!
//! Hooks report failure through [`CallbackResult`]. Errors and panics never
//! escape to the caller: the world runs every hook inside its isolation
//! boundary and turns faults into status messages.

use crate::engine::ObjectHandle;
use crate::error::ObjectError;

/// Fault reported by a user-supplied hook.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ObjectError> for CallbackError {
    fn from(error: ObjectError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<&str> for CallbackError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for CallbackError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

pub type CallbackResult = Result<(), CallbackError>;

/// Autonomous behavior run once per turn (or per interval firing).
pub trait Behavior: Send + Sync {
    fn act(&self, me: &mut ObjectHandle<'_>) -> CallbackResult;
}

/// Runs when the player and the object meet on the same cell.
///
/// The player is reachable through [`ObjectHandle::player_mut`].
pub trait CollisionHandler: Send + Sync {
    fn on_collision(&self, me: &mut ObjectHandle<'_>) -> CallbackResult;
}

/// Runs once after the object has been destroyed in game (never on map reset).
pub trait DestroyHandler: Send + Sync {
    fn on_destroy(&self, me: &mut ObjectHandle<'_>) -> CallbackResult;
}

/// Runs on a trap definition when a mover listed in `deactivated_by` steps on it.
///
/// `mover` is the object that disarmed the trap.
pub trait DeactivateHandler: Send + Sync {
    fn on_deactivate(&self, mover: &mut ObjectHandle<'_>) -> CallbackResult;
}

impl<F> Behavior for F
where
    F: Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync,
{
    fn act(&self, me: &mut ObjectHandle<'_>) -> CallbackResult {
        self(me)
    }
}

impl<F> CollisionHandler for F
where
    F: Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync,
{
    fn on_collision(&self, me: &mut ObjectHandle<'_>) -> CallbackResult {
        self(me)
    }
}

impl<F> DestroyHandler for F
where
    F: Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync,
{
    fn on_destroy(&self, me: &mut ObjectHandle<'_>) -> CallbackResult {
        self(me)
    }
}

impl<F> DeactivateHandler for F
where
    F: Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync,
{
    fn on_deactivate(&self, mover: &mut ObjectHandle<'_>) -> CallbackResult {
        self(mover)
    }
}
