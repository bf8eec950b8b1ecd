//! Object state representation.
//!
//! Plain data types shared by every layer: identifiers, grid positions, the
//! global tick counter and the per-object record kept by the world registry.
pub mod types;

pub use types::{DynamicObject, Inventory, ObjectId, ObjectType, Position, Tick};
