//! Tile side effects after a committed move.

use crate::definition::DefinitionKind;
use crate::env::Sound;
use crate::state::{ObjectId, Position};

use super::{CallbackKind, TARGET, World, WorldEvent};

impl World {
    /// Applies the background tile under a mover that just arrived at `at`.
    ///
    /// Items are picked up by anything except projectiles. Traps are disarmed
    /// and removed when the mover's type is listed in `deactivated_by`. Other
    /// tiles, and tiles without a definition, do nothing.
    pub(super) fn resolve_tile(&mut self, id: ObjectId, at: Position) {
        let Some(tile) = self.host.background_at(at) else {
            return;
        };
        let Some(tile_definition) = self.definitions.definition(&tile) else {
            return;
        };
        let Some(mover) = self.objects.get(&id) else {
            return;
        };
        let mover_type = mover.object_type().clone();
        let is_projectile = mover.is_projectile();

        match tile_definition.kind {
            DefinitionKind::Item if !is_projectile => {
                if let Some(mover) = self.objects.get_mut(&id) {
                    mover.inventory.push(tile.clone());
                }
                self.host.remove_item_from_map(at, &tile);
                self.host.play_sound(Sound::Pickup);
                tracing::debug!(target: TARGET, %id, item = %tile, "item picked up");
                self.events.push(WorldEvent::ItemPickedUp {
                    id,
                    item: tile,
                    at,
                });
            }
            DefinitionKind::Trap if tile_definition.is_deactivated_by(&mover_type) => {
                if let Some(handler) = &tile_definition.hooks.on_deactivate {
                    self.invoke(id, CallbackKind::Deactivate, |mover| {
                        handler.on_deactivate(mover)
                    });
                }
                self.host.remove_item_from_map(at, &tile);
                tracing::debug!(target: TARGET, %id, trap = %tile, "trap deactivated");
                self.events.push(WorldEvent::TrapDeactivated {
                    by: id,
                    trap: tile,
                    at,
                });
            }
            _ => {}
        }
    }
}
