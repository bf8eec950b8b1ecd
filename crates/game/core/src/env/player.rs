//! Player collaborator interface and a plain in-memory implementation.

use crate::definition::ObjectDefinition;
use crate::state::{ObjectType, Position};

/// The player as seen by dynamic objects.
///
/// Input handling and the player's own movement live outside this crate; the
/// world only reads the position and reports kills and item hand-overs.
pub trait Player {
    fn position(&self) -> Position;

    fn at_location(&self, position: Position) -> bool {
        self.position() == position
    }

    /// Kills the player; `cause` reads like `"a boulder"`.
    fn killed_by(&mut self, cause: &str);

    /// Receives an item handed over by an object.
    fn pick_up_item(&mut self, item: &ObjectType, definition: Option<&ObjectDefinition>);
}

/// Minimal player used by [`GridMap`](super::GridMap) and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimplePlayer {
    position: Position,
    cause_of_death: Option<String>,
    items: Vec<ObjectType>,
}

impl SimplePlayer {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn is_alive(&self) -> bool {
        self.cause_of_death.is_none()
    }

    pub fn cause_of_death(&self) -> Option<&str> {
        self.cause_of_death.as_deref()
    }

    pub fn items(&self) -> &[ObjectType] {
        &self.items
    }
}

impl Player for SimplePlayer {
    fn position(&self) -> Position {
        self.position
    }

    fn killed_by(&mut self, cause: &str) {
        // First death sticks; later causes are ignored.
        if self.cause_of_death.is_none() {
            self.cause_of_death = Some(cause.to_owned());
        }
    }

    fn pick_up_item(&mut self, item: &ObjectType, _definition: Option<&ObjectDefinition>) {
        self.items.push(item.clone());
    }
}
