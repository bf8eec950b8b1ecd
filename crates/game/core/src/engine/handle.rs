use crate::action::{Direction, MoveOutcome};
use crate::env::Player;
use crate::error::ObjectError;
use crate::state::{Inventory, ObjectId, ObjectType, Position};

use super::{ObjectQuery, World};

/// One object's view of the world, handed to hooks.
///
/// The handle borrows the world mutably for as long as the hook runs, so a
/// hook reaches the player and other objects only through the methods below.
/// Read accessors keep working after the object destroyed itself during the
/// current tick.
pub struct ObjectHandle<'w> {
    world: &'w mut World,
    id: ObjectId,
}

impl<'w> ObjectHandle<'w> {
    pub(crate) fn new(world: &'w mut World, id: ObjectId) -> Self {
        Self { world, id }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    // ===== operations =====

    /// Moves one step; see [`World::move_object`].
    pub fn move_to(&mut self, direction: Direction) -> Result<MoveOutcome, ObjectError> {
        self.world.move_object(self.id, direction)
    }

    /// Moves one step using a direction name such as `"left"`.
    pub fn move_named(&mut self, direction: &str) -> Result<MoveOutcome, ObjectError> {
        let direction = Direction::parse(direction)?;
        self.move_to(direction)
    }

    pub fn can_move(&self, direction: Direction) -> Result<bool, ObjectError> {
        self.world.can_move(self.id, direction)
    }

    /// Nearest match to this object, never the object itself.
    pub fn find_nearest(&self, query: impl Into<ObjectQuery>) -> Option<Position> {
        let position = self.world.object(self.id)?.position();
        self.world
            .find_nearest(&query.into(), position, Some(self.id))
    }

    pub fn give_item_to(&mut self, item: impl Into<ObjectType>) -> Result<(), ObjectError> {
        self.world.give_item_to(self.id, &item.into())
    }

    pub fn set_target(&mut self, target: ObjectId) -> Result<(), ObjectError> {
        self.world.set_target(self.id, target)
    }

    /// Destroys this object; returns `false` if it was already gone.
    pub fn destroy(&mut self) -> bool {
        self.world.destroy(self.id, false)
    }

    // ===== state =====

    /// `None` when the id never named an object or was retired before this tick.
    pub fn position(&self) -> Option<Position> {
        self.world.object(self.id).map(|object| object.position())
    }

    pub fn x(&self) -> Option<i32> {
        self.position().map(|position| position.x)
    }

    pub fn y(&self) -> Option<i32> {
        self.position().map(|position| position.y)
    }

    pub fn object_type(&self) -> Option<&ObjectType> {
        self.world.object(self.id).map(|object| object.object_type())
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.world.object(self.id).map(|object| object.inventory())
    }

    pub fn has_turn(&self) -> bool {
        self.world
            .object(self.id)
            .is_some_and(|object| object.has_turn())
    }

    pub fn target(&self) -> Option<ObjectId> {
        self.world.object(self.id).and_then(|object| object.target())
    }

    pub fn is_destroyed(&self) -> bool {
        !self.world.is_live(self.id)
    }

    // ===== surroundings =====

    pub fn player(&self) -> &dyn Player {
        self.world.host().player()
    }

    pub fn player_mut(&mut self) -> &mut dyn Player {
        self.world.host_mut().player_mut()
    }

    pub fn write_status(&mut self, message: &str) {
        self.world.host_mut().write_status(message);
    }

    /// Read-only access to the rest of the world.
    pub fn world(&self) -> &World {
        &*self.world
    }
}
