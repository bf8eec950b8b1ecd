use std::str::FromStr;

use crate::error::ObjectError;
use crate::state::{ObjectId, Position};

/// Compass direction accepted by [`World::move_object`](crate::engine::World::move_object).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parses a direction name, rejecting anything outside the four compass points.
    pub fn parse(name: &str) -> Result<Self, ObjectError> {
        Self::from_str(name.trim()).map_err(|_| ObjectError::InvalidDirection(name.to_owned()))
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Cell reached by taking one step from `origin` towards `direction`.
pub fn resolve_destination(origin: Position, direction: Direction) -> Position {
    let (dx, dy) = direction.delta();
    Position::new(origin.x + dx, origin.y + dy)
}

/// What a single `move` call ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    /// Position committed; tile side effects have been applied.
    Moved { from: Position, to: Position },
    /// The player was at the destination and the collision handler ran.
    Collided { at: Position },
    /// A projectile ran into the player.
    KilledPlayer { at: Position },
    /// Destination refused; the object stays where it is.
    Blocked { at: Position },
    /// A blocked projectile was destroyed, taking `victim` with it if present.
    Absorbed {
        at: Position,
        victim: Option<ObjectId>,
    },
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}
