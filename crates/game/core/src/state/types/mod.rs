pub mod common;
pub mod object;

pub use common::{ObjectId, ObjectType, Position, Tick};
pub use object::{DynamicObject, Inventory};
