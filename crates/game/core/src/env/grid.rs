//! In-memory map authority backed by a terrain grid.
//!
//! `GridMap` is the reference [`MapHost`]: a rectangular terrain grid, a sparse
//! background layer holding items, traps and other static tiles, and a
//! [`SimplePlayer`]. Sounds, status lines and registry refreshes are recorded
//! so drivers and tests can inspect what the world asked for. The sound and
//! status logs keep the latest [`LOG_CAPACITY`] entries; drivers that run for
//! long drain them.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use crate::state::{ObjectType, Position};

use super::{MapDimensions, MapHost, Player, SimplePlayer, Sound, TerrainKind};

/// Entries kept in each of the sound and status logs.
pub const LOG_CAPACITY: usize = 256;

fn push_bounded<T>(log: &mut Vec<T>, entry: T) {
    if log.len() >= LOG_CAPACITY {
        log.remove(0);
    }
    log.push(entry);
}

#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    terrain: Vec<TerrainKind>,
    background: BTreeMap<Position, ObjectType>,
    /// Extra terrain an object type may enter on top of plain floor.
    crossings: HashMap<ObjectType, Vec<TerrainKind>>,
    player: SimplePlayer,
    sounds: Vec<Sound>,
    status: Vec<String>,
    refreshes: usize,
}

impl GridMap {
    /// Creates an all-floor map with the player standing at `player_start`.
    pub fn new(dimensions: MapDimensions, player_start: Position) -> Self {
        Self {
            dimensions,
            terrain: vec![TerrainKind::Floor; dimensions.area()],
            background: BTreeMap::new(),
            crossings: HashMap::new(),
            player: SimplePlayer::new(player_start),
            sounds: Vec::new(),
            status: Vec::new(),
            refreshes: 0,
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    /// Terrain at `position`; cells outside the map read as [`TerrainKind::Void`].
    pub fn terrain_at(&self, position: Position) -> TerrainKind {
        self.index(position)
            .map_or(TerrainKind::Void, |index| self.terrain[index])
    }

    /// Sets the terrain of a cell. Out-of-bounds positions are ignored.
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) {
        if let Some(index) = self.index(position) {
            self.terrain[index] = terrain;
        }
    }

    pub fn with_wall(mut self, position: Position) -> Self {
        self.set_terrain(position, TerrainKind::Wall);
        self
    }

    /// Places a static tile (item, trap, exit, ...) on the background layer.
    pub fn place(&mut self, position: Position, object_type: impl Into<ObjectType>) {
        self.background.insert(position, object_type.into());
    }

    pub fn with_background(mut self, position: Position, object_type: impl Into<ObjectType>) -> Self {
        self.place(position, object_type);
        self
    }

    /// Lets objects of `object_type` enter `terrain` in addition to floor.
    pub fn allow_crossing(&mut self, object_type: impl Into<ObjectType>, terrain: TerrainKind) {
        self.crossings
            .entry(object_type.into())
            .or_default()
            .push(terrain);
    }

    pub fn player_state(&self) -> &SimplePlayer {
        &self.player
    }

    pub fn player_state_mut(&mut self) -> &mut SimplePlayer {
        &mut self.player
    }

    pub fn sounds(&self) -> &[Sound] {
        &self.sounds
    }

    pub fn status_log(&self) -> &[String] {
        &self.status
    }

    pub fn drain_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }

    pub fn drain_status(&mut self) -> Vec<String> {
        std::mem::take(&mut self.status)
    }

    /// Number of registry refresh notifications received.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }
}

impl MapHost for GridMap {
    fn player(&self) -> &dyn Player {
        &self.player
    }

    fn player_mut(&mut self) -> &mut dyn Player {
        &mut self.player
    }

    fn can_move_to(&self, position: Position, object_type: &ObjectType) -> bool {
        if !self.dimensions.contains(position) {
            return false;
        }
        let terrain = self.terrain_at(position);
        terrain.is_passable()
            || self
                .crossings
                .get(object_type)
                .is_some_and(|allowed| allowed.contains(&terrain))
    }

    fn background_at(&self, position: Position) -> Option<ObjectType> {
        self.background.get(&position).cloned()
    }

    fn remove_item_from_map(&mut self, position: Position, object_type: &ObjectType) {
        if self.background.get(&position) == Some(object_type) {
            self.background.remove(&position);
        }
    }

    fn find_nearest_static(&self, object_type: &ObjectType, from: Position) -> Option<Position> {
        self.background
            .iter()
            .filter(|(_, tile)| *tile == object_type)
            .map(|(position, _)| *position)
            .min_by_key(|position| (position.manhattan_distance(from), *position))
    }

    fn play_sound(&mut self, sound: Sound) {
        push_bounded(&mut self.sounds, sound);
    }

    fn write_status(&mut self, message: &str) {
        push_bounded(&mut self.status, message.to_owned());
    }

    fn refresh_dynamic_objects(&mut self) {
        self.refreshes += 1;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> GridMap {
        GridMap::new(MapDimensions::new(4, 3), Position::ORIGIN)
    }

    #[test]
    fn walls_and_bounds_block_movement() {
        let map = map().with_wall(Position::new(1, 1));
        let drone = ObjectType::from("drone");

        assert!(map.can_move_to(Position::new(0, 1), &drone));
        assert!(!map.can_move_to(Position::new(1, 1), &drone));
        assert!(!map.can_move_to(Position::new(-1, 0), &drone));
        assert!(!map.can_move_to(Position::new(4, 0), &drone));
    }

    #[test]
    fn crossings_are_per_type() {
        let mut map = map();
        map.set_terrain(Position::new(2, 2), TerrainKind::Water);
        map.allow_crossing("fish", TerrainKind::Water);

        assert!(map.can_move_to(Position::new(2, 2), &ObjectType::from("fish")));
        assert!(!map.can_move_to(Position::new(2, 2), &ObjectType::from("drone")));
    }

    #[test]
    fn remove_only_matching_background() {
        let mut map = map().with_background(Position::new(2, 0), "computer");

        map.remove_item_from_map(Position::new(2, 0), &ObjectType::from("redKey"));
        assert_eq!(map.background_at(Position::new(2, 0)), Some("computer".into()));

        map.remove_item_from_map(Position::new(2, 0), &ObjectType::from("computer"));
        assert_eq!(map.background_at(Position::new(2, 0)), None);
    }

    #[test]
    fn nearest_static_prefers_shorter_distance() {
        let map = map()
            .with_background(Position::new(3, 2), "exit")
            .with_background(Position::new(1, 0), "exit");

        assert_eq!(
            map.find_nearest_static(&ObjectType::from("exit"), Position::new(0, 0)),
            Some(Position::new(1, 0))
        );
        assert_eq!(
            map.find_nearest_static(&ObjectType::from("phone"), Position::new(0, 0)),
            None
        );
    }

    #[test]
    fn logs_keep_the_latest_entries_and_drain() {
        let mut map = map();
        for n in 0..LOG_CAPACITY + 3 {
            map.write_status(&format!("line {n}"));
            map.play_sound(Sound::Pickup);
        }

        assert_eq!(map.status_log().len(), LOG_CAPACITY);
        assert_eq!(map.status_log()[0], "line 3");
        assert_eq!(map.sounds().len(), LOG_CAPACITY);

        let drained = map.drain_status();
        assert_eq!(drained.last().map(String::as_str), Some("line 258"));
        assert!(map.status_log().is_empty());
        assert_eq!(map.drain_sounds().len(), LOG_CAPACITY);
        assert!(map.sounds().is_empty());
    }
}
