use std::any::Any;

use crate::state::{ObjectType, Position};

use super::Player;

/// Sound effects requested by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Sound {
    Pickup,
    Explosion,
}

/// Map authority the world talks to.
///
/// Grid storage, rendering, the player and audio all live behind this trait;
/// the world only needs the narrow set of queries and effects below.
pub trait MapHost: Send {
    fn player(&self) -> &dyn Player;

    fn player_mut(&mut self) -> &mut dyn Player;

    /// Whether terrain at `position` lets an object of `object_type` enter.
    fn can_move_to(&self, position: Position, object_type: &ObjectType) -> bool;

    /// Type of the static/background tile at `position`, if any.
    fn background_at(&self, position: Position) -> Option<ObjectType>;

    /// Removes an item or trap from the background layer.
    fn remove_item_from_map(&mut self, position: Position, object_type: &ObjectType);

    /// Nearest static tile of the given type, used by nearest-object queries.
    fn find_nearest_static(&self, _object_type: &ObjectType, _from: Position) -> Option<Position> {
        None
    }

    fn play_sound(&mut self, sound: Sound);

    /// Diagnostic channel shown to the person writing object code.
    fn write_status(&mut self, message: &str);

    /// Called after an object left the live registry.
    fn refresh_dynamic_objects(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Canonical terrain classes for grid cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    Water,
    Void,
}

impl TerrainKind {
    /// Terrain any object can cross regardless of its type.
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }
}
