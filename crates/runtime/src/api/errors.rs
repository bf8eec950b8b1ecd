//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and from the world itself so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use maze_core::{ObjectError, WorldError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a map host before building")]
    MissingHost,

    #[error("runtime requires object definitions before building")]
    MissingDefinitions,

    #[error("runtime must be built from within a tokio runtime")]
    NoTokioRuntime(#[source] tokio::runtime::TryCurrentError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Object(#[from] ObjectError),
}
