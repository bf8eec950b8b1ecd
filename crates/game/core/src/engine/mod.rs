//! The world registry and every operation on dynamic objects.
//!
//! [`World`] is the authority for one map. It owns the live objects, talks to
//! the map through [`MapHost`], looks definitions up through
//! [`DefinitionOracle`] and schedules autonomous objects through
//! [`IntervalTimers`]. Everything is synchronous; drivers decide when ticks
//! happen and when timers fire.
//!
//! The operations are split by concern:
//!
//! - `turns`: global tick, turn executor, interval firings
//! - `movement`: `move`, `can_move`, nearest-object queries
//! - `post_move`: item pickup and trap deactivation after a committed move
//! - `lifecycle`: destruction, map reset, item hand-over, teleporter targets
//!
//! Hooks receive an [`ObjectHandle`], a short-lived `(&mut World, id)` pair.

mod events;
mod handle;
mod isolation;
mod lifecycle;
mod movement;
mod post_move;
mod query;
mod turns;

pub use events::WorldEvent;
pub use handle::ObjectHandle;
pub use isolation::{CallbackKind, run_isolated};
pub use query::ObjectQuery;

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::WorldConfig;
use crate::definition::CallbackResult;
use crate::env::{DefinitionOracle, MapHost};
use crate::error::{ObjectError, WorldError};
use crate::schedule::IntervalTimers;
use crate::state::{DynamicObject, ObjectId, ObjectType, Position, Tick};

const TARGET: &str = "maze_core::world";

/// Registry of dynamic objects on one map.
pub struct World {
    config: WorldConfig,
    host: Box<dyn MapHost>,
    definitions: Arc<dyn DefinitionOracle>,
    timers: Box<dyn IntervalTimers>,
    objects: BTreeMap<ObjectId, DynamicObject>,
    /// Objects destroyed during the current tick, still readable by handles.
    retired: BTreeMap<ObjectId, DynamicObject>,
    next_id: u32,
    tick: Tick,
    events: Vec<WorldEvent>,
}

impl World {
    pub fn new(
        config: WorldConfig,
        host: Box<dyn MapHost>,
        definitions: Arc<dyn DefinitionOracle>,
        timers: Box<dyn IntervalTimers>,
    ) -> Self {
        Self {
            config,
            host,
            definitions,
            timers,
            objects: BTreeMap::new(),
            retired: BTreeMap::new(),
            next_id: 0,
            tick: Tick::ZERO,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn is_dummy(&self) -> bool {
        self.config.dummy
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Creates an object of `object_type` at `position`.
    ///
    /// Interval-driven objects start their timer immediately unless the world
    /// is a dummy.
    pub fn spawn(
        &mut self,
        object_type: impl Into<ObjectType>,
        position: Position,
    ) -> Result<ObjectId, WorldError> {
        let object_type = object_type.into();
        let definition = self
            .definitions
            .definition(&object_type)
            .ok_or_else(|| WorldError::UnknownDefinition(object_type.clone()))?;

        let id = ObjectId(self.next_id);
        self.next_id += 1;

        self.objects
            .insert(id, DynamicObject::new(id, position, definition));
        self.events.push(WorldEvent::Spawned {
            id,
            object_type: object_type.clone(),
            position,
        });
        tracing::debug!(target: TARGET, %id, %object_type, %position, "spawned object");

        if !self.config.dummy {
            self.activate(id);
        }

        Ok(id)
    }

    /// Short-lived handle used to drive one object from outside a hook.
    pub fn handle(&mut self, id: ObjectId) -> ObjectHandle<'_> {
        ObjectHandle::new(self, id)
    }

    // ===== queries =====

    /// Looks up an object, including ones destroyed during the current tick.
    pub fn object(&self, id: ObjectId) -> Option<&DynamicObject> {
        self.objects.get(&id).or_else(|| self.retired.get(&id))
    }

    /// Live objects in ascending id order.
    pub fn live_objects(&self) -> impl Iterator<Item = &DynamicObject> {
        self.objects.values()
    }

    pub fn live_ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_live(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn is_point_occupied(&self, position: Position) -> bool {
        self.find_dynamic_object_at(position).is_some()
    }

    /// Lowest-id live object standing on `position`.
    pub fn find_dynamic_object_at(&self, position: Position) -> Option<ObjectId> {
        self.objects
            .values()
            .find(|object| object.position == position)
            .map(DynamicObject::id)
    }

    // ===== collaborators =====

    pub fn host(&self) -> &dyn MapHost {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> &mut dyn MapHost {
        self.host.as_mut()
    }

    /// Concrete host, when the caller knows which implementation it installed.
    pub fn host_as<T: Any>(&self) -> Option<&T> {
        self.host.as_any().downcast_ref::<T>()
    }

    pub fn host_as_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.host.as_any_mut().downcast_mut::<T>()
    }

    pub fn timers(&self) -> &dyn IntervalTimers {
        self.timers.as_ref()
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[WorldEvent] {
        &self.events
    }

    // ===== internals shared by the operation modules =====

    fn live(&self, id: ObjectId) -> Result<&DynamicObject, ObjectError> {
        match self.objects.get(&id) {
            Some(object) => Ok(object),
            None => Err(self.missing(id)),
        }
    }

    fn live_mut(&mut self, id: ObjectId) -> Result<&mut DynamicObject, ObjectError> {
        match self.objects.get_mut(&id) {
            Some(object) => Ok(object),
            None => Err(missing_from(&self.retired, id)),
        }
    }

    fn missing(&self, id: ObjectId) -> ObjectError {
        missing_from(&self.retired, id)
    }

    /// Runs a hook for `id` inside the isolation boundary and reports faults.
    fn invoke<F>(&mut self, id: ObjectId, kind: CallbackKind, callback: F)
    where
        F: FnOnce(&mut ObjectHandle<'_>) -> CallbackResult,
    {
        let result = {
            let mut handle = ObjectHandle::new(self, id);
            run_isolated(|| callback(&mut handle))
        };

        if let Err(message) = result {
            self.report_fault(id, kind, message);
        }
    }

    fn report_fault(&mut self, id: ObjectId, kind: CallbackKind, message: String) {
        let subject = match self.object(id) {
            Some(object) => format!("{} {}", object.object_type(), id),
            None => format!("object {id}"),
        };
        tracing::warn!(target: TARGET, %id, %kind, %message, "callback failed");
        self.host
            .write_status(&format!("{subject}: {kind} failed: {message}"));
        self.events
            .push(WorldEvent::CallbackFailed { id, kind, message });
    }
}

fn missing_from(retired: &BTreeMap<ObjectId, DynamicObject>, id: ObjectId) -> ObjectError {
    if retired.contains_key(&id) {
        ObjectError::Destroyed(id)
    } else {
        ObjectError::UnknownObject(id)
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("tick", &self.tick)
            .field("objects", &self.objects.len())
            .field("retired", &self.retired.len())
            .field("timers", &self.timers.active())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::definition::{DefinitionRegistry, ObjectDefinition};
    use crate::env::{GridMap, MapDimensions};
    use crate::schedule::ManualTimers;

    fn world(config: WorldConfig) -> World {
        let definitions = DefinitionRegistry::new()
            .with(ObjectDefinition::dynamic("drone"))
            .with(ObjectDefinition::dynamic("arrow").with_interval(Duration::from_millis(50)));
        World::new(
            config,
            Box::new(GridMap::new(MapDimensions::new(8, 8), Position::ORIGIN)),
            Arc::new(definitions),
            Box::new(ManualTimers::new()),
        )
    }

    #[test]
    fn spawn_assigns_increasing_ids() {
        let mut world = world(WorldConfig::new());
        let first = world.spawn("drone", Position::new(1, 1)).unwrap();
        let second = world.spawn("drone", Position::new(2, 1)).unwrap();

        assert!(first < second);
        assert_eq!(world.live_ids(), vec![first, second]);
        assert_eq!(world.find_dynamic_object_at(Position::new(2, 1)), Some(second));
        assert!(!world.is_point_occupied(Position::new(3, 1)));
    }

    #[test]
    fn spawn_unknown_type_fails() {
        let mut world = world(WorldConfig::new());
        let error = world.spawn("ghost", Position::ORIGIN).unwrap_err();
        assert_eq!(error, WorldError::UnknownDefinition("ghost".into()));
        assert_eq!(world.live_count(), 0);
    }

    #[test]
    fn interval_objects_start_timers_unless_dummy() {
        let mut live = world(WorldConfig::new());
        let arrow = live.spawn("arrow", Position::ORIGIN).unwrap();
        assert!(live.object(arrow).unwrap().has_timer());
        assert_eq!(live.timers().active(), 1);

        let mut dummy = world(WorldConfig::dummy());
        let arrow = dummy.spawn("arrow", Position::ORIGIN).unwrap();
        assert!(!dummy.object(arrow).unwrap().has_timer());
        assert_eq!(dummy.timers().active(), 0);
    }

    #[test]
    fn host_downcast_reaches_grid_map() {
        let world = world(WorldConfig::new());
        assert!(world.host_as::<GridMap>().is_some());
    }
}
