//! Global ticks, the turn executor and interval firings.

use std::sync::Arc;
use std::time::Duration;

use crate::state::{ObjectId, ObjectType, Tick};

use super::{CallbackKind, TARGET, World, WorldEvent};

impl World {
    /// Runs one global turn.
    ///
    /// Objects act in ascending id order over the ids live when the tick
    /// started. Turn-driven objects run the full turn executor; interval-driven
    /// objects only get their timer (re)started and a proximity check, since
    /// their behavior runs on their own cadence.
    pub fn tick(&mut self) -> Tick {
        self.tick = self.tick.next();
        self.retired.clear();
        self.events.push(WorldEvent::TickStarted { tick: self.tick });

        for id in self.live_ids() {
            let Some(object) = self.objects.get(&id) else {
                continue;
            };

            if object.interval().is_some() {
                if !self.config.dummy {
                    self.activate(id);
                }
                self.check_proximity(id);
            } else {
                self.execute_turn(id);
            }
        }

        self.tick
    }

    /// Handles one timer firing. Firings for objects that are gone are dropped.
    pub fn fire_interval(&mut self, id: ObjectId) -> bool {
        if !self.is_live(id) {
            tracing::trace!(target: TARGET, %id, "dropped stale interval firing");
            return false;
        }
        self.execute_turn(id);
        true
    }

    /// Advances the timer driver's clock and runs every firing that became due.
    ///
    /// Returns the number of firings that reached a live object.
    pub fn advance_time(&mut self, elapsed: Duration) -> usize {
        self.retired.clear();
        let due = self.timers.advance(elapsed);
        due.into_iter().filter(|id| self.fire_interval(*id)).count()
    }

    /// Starts the interval timer of `id` if it has an interval and no timer yet.
    ///
    /// Returns whether a timer was started.
    pub fn activate(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.objects.get(&id) else {
            return false;
        };
        if object.timer.is_some() {
            return false;
        }
        let Some(every) = object.interval() else {
            return false;
        };

        let handle = self.timers.start(id, every);
        if let Some(object) = self.objects.get_mut(&id) {
            object.timer = Some(handle);
        }
        tracing::debug!(target: TARGET, %id, ?every, "started interval timer");
        true
    }

    /// One turn of one object: collision with a player standing on it, then
    /// its behavior.
    fn execute_turn(&mut self, id: ObjectId) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        object.has_turn = true;
        let position = object.position;
        let definition = Arc::clone(object.definition());

        // The player has already moved this tick; checking before the object
        // moves keeps the two from passing through each other.
        if self.host.player().at_location(position) {
            if let Some(handler) = &definition.hooks.on_collision {
                self.invoke(id, CallbackKind::Collision, |me| handler.on_collision(me));
            }
        }

        if !self.is_live(id) {
            return;
        }

        if let Some(behavior) = &definition.hooks.behavior {
            self.invoke(id, CallbackKind::Behavior, |me| behavior.act(me));
        }
    }

    /// Per-tick contact check for interval-driven objects. Does not run the
    /// behavior and leaves `has_turn` alone.
    fn check_proximity(&mut self, id: ObjectId) {
        let Some(object) = self.objects.get(&id) else {
            return;
        };
        let position = object.position;
        let definition = Arc::clone(object.definition());

        if !self.host.player().at_location(position) {
            return;
        }

        if definition.is_projectile() {
            self.kill_player(id, &definition.object_type);
        } else if let Some(handler) = &definition.hooks.on_collision {
            self.invoke(id, CallbackKind::Collision, |me| handler.on_collision(me));
        }
    }

    pub(super) fn kill_player(&mut self, by: ObjectId, object_type: &ObjectType) {
        let cause = self.config.projectile_cause_for(object_type.as_str());
        self.host.player_mut().killed_by(&cause);
        tracing::debug!(target: TARGET, %by, %cause, "player killed");
        self.events.push(WorldEvent::PlayerKilled { by, cause });
    }
}
