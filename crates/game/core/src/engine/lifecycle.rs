//! Destruction, map reset and the remaining public object operations.

use std::sync::Arc;

use crate::env::Sound;
use crate::error::ObjectError;
use crate::state::{ObjectId, ObjectType};

use super::{CallbackKind, TARGET, World, WorldEvent};

impl World {
    /// Destroys `id`. Returns `false` if it was already destroyed or unknown.
    ///
    /// The timer is cancelled and the object leaves the live registry before
    /// any hook runs. `on_map_reset` suppresses the explosion and the destroy
    /// hook.
    pub fn destroy(&mut self, id: ObjectId, on_map_reset: bool) -> bool {
        let Some(mut object) = self.objects.remove(&id) else {
            return false;
        };

        object.destroyed = true;
        if let Some(timer) = object.timer.take() {
            self.timers.cancel(timer);
        }

        let definition = Arc::clone(object.definition());
        let object_type = object.object_type().clone();
        self.retired.insert(id, object);
        self.host.refresh_dynamic_objects();

        tracing::debug!(target: TARGET, %id, %object_type, on_map_reset, "object destroyed");
        self.events.push(WorldEvent::Destroyed {
            id,
            object_type,
            on_map_reset,
        });

        if on_map_reset {
            return true;
        }

        if let Some(handler) = &definition.hooks.on_destroy {
            if !definition.is_projectile() {
                self.host.play_sound(Sound::Explosion);
            }
            self.invoke(id, CallbackKind::Destroy, |me| handler.on_destroy(me));
        }

        true
    }

    /// Silently destroys every live object. Returns how many were removed.
    pub fn reset_map(&mut self) -> usize {
        let ids = self.live_ids();
        let removed = ids
            .into_iter()
            .filter(|&id| self.destroy(id, true))
            .count();
        tracing::debug!(target: TARGET, removed, "map reset");
        removed
    }

    /// Hands one `item` from `id`'s inventory to the player.
    ///
    /// Holding the item is checked before adjacency, so an empty-handed object
    /// always reports [`ObjectError::ItemNotHeld`].
    pub fn give_item_to(&mut self, id: ObjectId, item: &ObjectType) -> Result<(), ObjectError> {
        let object = self.live(id)?;

        if !object.inventory.contains(item) {
            return Err(ObjectError::ItemNotHeld {
                id,
                object_type: object.object_type().clone(),
                item: item.clone(),
            });
        }

        if !object.position.touches(self.host.player().position()) {
            return Err(ObjectError::NotAdjacent {
                id,
                object_type: object.object_type().clone(),
            });
        }

        let definition = self.definitions.definition(item);
        self.live_mut(id)?.inventory.take(item);
        self.host
            .player_mut()
            .pick_up_item(item, definition.as_deref());

        tracing::debug!(target: TARGET, %id, %item, "item handed to player");
        self.events.push(WorldEvent::ItemGiven {
            id,
            item: item.clone(),
        });
        Ok(())
    }

    /// Points teleporter `id` at another live object.
    pub fn set_target(&mut self, id: ObjectId, target: ObjectId) -> Result<(), ObjectError> {
        let object = self.live(id)?;

        if !object.object_type().is_teleporter() {
            return Err(ObjectError::WrongObjectType {
                id,
                object_type: object.object_type().clone(),
            });
        }
        if target == id {
            return Err(ObjectError::SelfTarget(id));
        }
        if !self.is_live(target) {
            return Err(ObjectError::UnknownObject(target));
        }

        self.live_mut(id)?.target = Some(target);
        Ok(())
    }
}
