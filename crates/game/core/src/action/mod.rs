//! Movement vocabulary shared by the world and object callbacks.
//!
//! - [`Direction`]: the four compass steps an object may take
//! - [`resolve_destination`]: pure mapping from a cell and a direction to a cell
//! - [`MoveOutcome`]: what a committed `move` call ended up doing
pub mod movement;

pub use movement::{Direction, MoveOutcome, resolve_destination};
