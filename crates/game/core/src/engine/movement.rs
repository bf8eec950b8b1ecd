//! Movement controller and nearest-object queries.

use std::sync::Arc;

use crate::action::{Direction, MoveOutcome, resolve_destination};
use crate::error::ObjectError;
use crate::state::{ObjectId, Position};

use super::{CallbackKind, ObjectQuery, TARGET, World, WorldEvent};

impl World {
    /// Moves `id` one step towards `direction`, consuming its turn.
    ///
    /// The turn is spent as soon as the precondition passes, whatever the
    /// outcome. A player standing on the destination is hit instead of
    /// entered (when the object can hit at all); otherwise the object moves if
    /// the terrain lets its type in and no other object is there. Blocked
    /// projectiles destroy themselves and whatever blocked them.
    pub fn move_object(
        &mut self,
        id: ObjectId,
        direction: Direction,
    ) -> Result<MoveOutcome, ObjectError> {
        let object = self.live_mut(id)?;
        if !object.has_turn {
            return Err(ObjectError::NotYourTurn {
                id,
                object_type: object.object_type().clone(),
            });
        }
        object.has_turn = false;

        let from = object.position;
        let definition = Arc::clone(object.definition());
        let destination = resolve_destination(from, direction);

        let hits_player = definition.is_projectile() || definition.hooks.on_collision.is_some();
        if hits_player && self.host.player().at_location(destination) {
            if definition.is_projectile() {
                self.kill_player(id, &definition.object_type);
                return Ok(MoveOutcome::KilledPlayer { at: destination });
            }
            if let Some(handler) = &definition.hooks.on_collision {
                self.invoke(id, CallbackKind::Collision, |me| handler.on_collision(me));
            }
            return Ok(MoveOutcome::Collided { at: destination });
        }

        if self.host.can_move_to(destination, &definition.object_type)
            && !self.is_point_occupied(destination)
        {
            if let Some(object) = self.objects.get_mut(&id) {
                object.position = destination;
            }
            tracing::debug!(target: TARGET, %id, %from, to = %destination, "object moved");
            self.events.push(WorldEvent::Moved {
                id,
                from,
                to: destination,
            });
            self.resolve_tile(id, destination);
            return Ok(MoveOutcome::Moved {
                from,
                to: destination,
            });
        }

        if definition.is_projectile() {
            self.destroy(id, false);
            let victim = self.find_dynamic_object_at(destination);
            if let Some(victim) = victim {
                self.destroy(victim, false);
            }
            return Ok(MoveOutcome::Absorbed {
                at: destination,
                victim,
            });
        }

        Ok(MoveOutcome::Blocked { at: destination })
    }

    /// Whether `id` could step towards `direction` without running into a
    /// twin of its own type. Read-only: the turn is not consumed.
    pub fn can_move(&self, id: ObjectId, direction: Direction) -> Result<bool, ObjectError> {
        let object = self.live(id)?;
        let destination = resolve_destination(object.position, direction);

        if !self.host.can_move_to(destination, object.object_type()) {
            return Ok(false);
        }

        let twin = self.find_nearest(
            &ObjectQuery::OfType(object.object_type().clone()),
            object.position,
            Some(id),
        );
        Ok(twin != Some(destination))
    }

    /// Position of the match closest to `from` by Manhattan distance.
    ///
    /// Ties between objects go to the lowest id; a static tile only wins when
    /// strictly closer than every matching object.
    pub fn find_nearest(
        &self,
        query: &ObjectQuery,
        from: Position,
        exclude: Option<ObjectId>,
    ) -> Option<Position> {
        let dynamic = self
            .nearest_object(query, from, exclude)
            .and_then(|id| self.objects.get(&id))
            .map(|object| object.position);

        let fixed = match query {
            ObjectQuery::AnyDynamic => None,
            ObjectQuery::OfType(object_type) => self.host.find_nearest_static(object_type, from),
        };

        match (dynamic, fixed) {
            (Some(dynamic), Some(fixed)) => {
                if fixed.manhattan_distance(from) < dynamic.manhattan_distance(from) {
                    Some(fixed)
                } else {
                    Some(dynamic)
                }
            }
            (dynamic, fixed) => dynamic.or(fixed),
        }
    }

    /// Id of the live object closest to `from` that matches `query`.
    pub fn nearest_object(
        &self,
        query: &ObjectQuery,
        from: Position,
        exclude: Option<ObjectId>,
    ) -> Option<ObjectId> {
        self.objects
            .values()
            .filter(|object| Some(object.id()) != exclude && query.matches(object))
            .min_by_key(|object| (object.position.manhattan_distance(from), object.id()))
            .map(|object| object.id())
    }
}
