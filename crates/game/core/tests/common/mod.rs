#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use maze_core::{
    DefinitionRegistry, GridMap, ManualTimers, MapDimensions, Position, World, WorldConfig,
};

/// Player start used by most tests, far away from the objects.
pub const PLAYER_HOME: Position = Position::new(9, 9);

pub fn open_map() -> GridMap {
    GridMap::new(MapDimensions::new(10, 10), PLAYER_HOME)
}

pub fn world(definitions: DefinitionRegistry, map: GridMap) -> World {
    world_with(WorldConfig::new(), definitions, map)
}

pub fn world_with(config: WorldConfig, definitions: DefinitionRegistry, map: GridMap) -> World {
    World::new(
        config,
        Box::new(map),
        Arc::new(definitions),
        Box::new(ManualTimers::new()),
    )
}

pub fn grid(world: &World) -> &GridMap {
    world.host_as::<GridMap>().expect("tests install a GridMap host")
}

pub fn grid_mut(world: &mut World) -> &mut GridMap {
    world
        .host_as_mut::<GridMap>()
        .expect("tests install a GridMap host")
}

pub fn place_player(world: &mut World, position: Position) {
    grid_mut(world).player_state_mut().set_position(position);
}

/// Shared, clonable log hooks can write into.
#[derive(Clone, Default)]
pub struct Trace<T>(Arc<Mutex<Vec<T>>>);

impl<T: Clone> Trace<T> {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    pub fn push(&self, entry: T) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<T> {
        self.0.lock().unwrap().clone()
    }
}
