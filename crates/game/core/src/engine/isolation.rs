//! Isolation boundary around user-supplied hooks.
//!
//! Hooks are arbitrary code. Whatever they do, a failing hook must not abort
//! the tick for other objects, so both returned errors and panics are caught
//! here and reported as plain messages.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::definition::CallbackResult;

/// Which hook a fault came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum CallbackKind {
    Behavior,
    Collision,
    Destroy,
    Deactivate,
}

/// Runs `callback`, converting an error or a panic into a diagnostic message.
pub fn run_isolated<F>(callback: F) -> Result<(), String>
where
    F: FnOnce() -> CallbackResult,
{
    match catch_unwind(AssertUnwindSafe(callback)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(error.message().to_owned()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked with a non-string payload".to_owned()
    }
}
