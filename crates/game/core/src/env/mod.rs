//! Collaborator interfaces the world depends on.
//!
//! The world never owns map storage, input handling, audio or definition
//! loading. It reaches them through the narrow traits re-exported here:
//!
//! - [`MapHost`]: terrain queries, the background layer, sounds and status
//! - [`Player`]: position, kills and item hand-overs
//! - [`DefinitionOracle`]: shared object-type metadata
//!
//! [`GridMap`] and [`SimplePlayer`] are plain in-memory implementations used
//! by the runtime, the content loaders and tests.
mod definitions;
mod grid;
mod map;
mod player;

pub use definitions::DefinitionOracle;
pub use grid::GridMap;
pub use map::{MapDimensions, MapHost, Sound, TerrainKind};
pub use player::{Player, SimplePlayer};
