//! Stock movement patterns and hook presets for data-driven definitions.
//!
//! Enough to make a maze feel alive from a data file; there is no
//! path-finding. Anything smarter is registered from code
//! through [`ObjectDefinition::behavior`](maze_core::ObjectDefinition::behavior).

use std::sync::{Arc, Mutex};

use maze_core::{
    Behavior, CallbackError, CallbackResult, Direction, ObjectDefinition, ObjectHandle,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Does nothing; the object only reacts to collisions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stationary;

impl Behavior for Stationary {
    fn act(&self, _me: &mut ObjectHandle<'_>) -> CallbackResult {
        Ok(())
    }
}

/// Keeps stepping in one direction. Projectiles using it fly until they hit
/// something; other objects simply stop at the first obstacle.
#[derive(Clone, Copy, Debug)]
pub struct StraightLine {
    pub direction: Direction,
}

impl Behavior for StraightLine {
    fn act(&self, me: &mut ObjectHandle<'_>) -> CallbackResult {
        me.move_to(self.direction)?;
        Ok(())
    }
}

/// Steps towards a random open neighbour, reproducibly for a given seed.
#[derive(Debug)]
pub struct RandomWalk {
    rng: Mutex<StdRng>,
}

impl RandomWalk {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Behavior for RandomWalk {
    fn act(&self, me: &mut ObjectHandle<'_>) -> CallbackResult {
        let mut open = Vec::with_capacity(Direction::ALL.len());
        for direction in Direction::ALL {
            if me.can_move(direction)? {
                open.push(direction);
            }
        }

        let choice = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| CallbackError::new("random walk generator poisoned"))?;
            open.choose(&mut *rng).copied()
        };

        if let Some(direction) = choice {
            me.move_to(direction)?;
        }
        Ok(())
    }
}

/// Behavior named in a definition file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorSpec {
    Stationary,
    Straight(Direction),
    RandomWalk { seed: u64 },
}

impl BehaviorSpec {
    pub fn build(&self) -> Arc<dyn Behavior> {
        match self {
            Self::Stationary => Arc::new(Stationary),
            Self::Straight(direction) => Arc::new(StraightLine {
                direction: *direction,
            }),
            Self::RandomWalk { seed } => Arc::new(RandomWalk::new(*seed)),
        }
    }
}

/// What happens when the player and the object share a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionSpec {
    /// Kills the player; `cause` defaults to `"a <type>"`.
    KillPlayer { cause: Option<String> },
    /// Shows a message on the status line.
    Status(String),
    /// The object disappears (with its destroy hook, if any).
    Vanish,
}

impl CollisionSpec {
    /// Attaches the collision hook to `definition`.
    pub fn apply(&self, definition: ObjectDefinition) -> ObjectDefinition {
        match self.clone() {
            Self::KillPlayer { cause } => {
                let cause = cause.unwrap_or_else(|| format!("a {}", definition.object_type));
                definition.on_collision(move |me| {
                    me.player_mut().killed_by(&cause);
                    Ok(())
                })
            }
            Self::Status(message) => definition.on_collision(move |me| {
                me.write_status(&message);
                Ok(())
            }),
            Self::Vanish => definition.on_collision(|me| {
                me.destroy();
                Ok(())
            }),
        }
    }
}

/// Destroy or deactivate hook that writes a status line.
pub fn status_hook(
    message: String,
) -> impl Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync + 'static {
    move |me| {
        me.write_status(&message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use maze_core::{
        DefinitionRegistry, GridMap, ManualTimers, MapDimensions, Position, World, WorldConfig,
    };

    use super::*;

    fn world_with(definition: ObjectDefinition) -> World {
        World::new(
            WorldConfig::new(),
            Box::new(GridMap::new(MapDimensions::new(5, 5), Position::new(4, 4))),
            Arc::new(DefinitionRegistry::new().with(definition)),
            Box::new(ManualTimers::new()),
        )
    }

    #[test]
    fn straight_line_keeps_its_heading() {
        let definition = ObjectDefinition::dynamic("cart")
            .with_behavior(BehaviorSpec::Straight(Direction::Down).build());
        let mut world = world_with(definition);
        let cart = world.spawn("cart", Position::new(1, 0)).unwrap();

        for _ in 0..3 {
            world.tick();
        }

        assert_eq!(world.object(cart).unwrap().position(), Position::new(1, 3));
    }

    #[test]
    fn random_walk_is_reproducible() {
        let run = |seed| {
            let definition = ObjectDefinition::dynamic("rat")
                .with_behavior(BehaviorSpec::RandomWalk { seed }.build());
            let mut world = world_with(definition);
            let rat = world.spawn("rat", Position::new(2, 2)).unwrap();
            (0..10)
                .map(|_| {
                    world.tick();
                    world.object(rat).unwrap().position()
                })
                .collect::<Vec<_>>()
        };

        let first = run(7);
        assert_eq!(first, run(7));
        assert!(
            first
                .windows(2)
                .all(|pair| pair[0].manhattan_distance(pair[1]) == 1)
        );
    }

    #[test]
    fn random_walk_stays_put_when_boxed_in() {
        let definition =
            ObjectDefinition::dynamic("rat").with_behavior(BehaviorSpec::RandomWalk { seed: 1 }.build());
        let mut world = World::new(
            WorldConfig::new(),
            Box::new(GridMap::new(MapDimensions::new(1, 1), Position::new(4, 4))),
            Arc::new(DefinitionRegistry::new().with(definition)),
            Box::new(ManualTimers::new()),
        );
        let rat = world.spawn("rat", Position::ORIGIN).unwrap();

        world.tick();

        assert_eq!(world.object(rat).unwrap().position(), Position::ORIGIN);
        assert!(world.object(rat).unwrap().has_turn());
    }

    #[test]
    fn kill_player_defaults_cause_to_type() {
        let definition =
            CollisionSpec::KillPlayer { cause: None }.apply(ObjectDefinition::dynamic("wolf"));
        let mut world = world_with(definition);
        world.spawn("wolf", Position::new(4, 4)).unwrap();

        world.tick();

        let map = world.host_as::<GridMap>().unwrap();
        assert_eq!(map.player_state().cause_of_death(), Some("a wolf"));
    }
}
