//! Shared, read-only metadata describing object types.
//!
//! An [`ObjectDefinition`] is created once per type and shared between every
//! instance of that type through an `Arc`. Behavior is expressed as a set of
//! optional capability trait objects (see [`hooks`]); a missing hook simply
//! means the capability is absent.
//!
//! ```
//! use std::time::Duration;
//! use maze_core::definition::ObjectDefinition;
//! use maze_core::Direction;
//!
//! let arrow = ObjectDefinition::dynamic("arrow")
//!     .projectile()
//!     .with_interval(Duration::from_millis(100))
//!     .behavior(|me| {
//!         me.move_to(Direction::Right)?;
//!         Ok(())
//!     });
//!
//! assert!(arrow.is_projectile());
//! assert_eq!(arrow.autonomous_interval(), Some(Duration::from_millis(100)));
//! ```

pub mod hooks;
mod registry;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bitflags::bitflags;

pub use hooks::{
    Behavior, CallbackError, CallbackResult, CollisionHandler, DeactivateHandler, DestroyHandler,
};
pub use registry::DefinitionRegistry;

use crate::engine::ObjectHandle;
use crate::state::ObjectType;

/// Broad category of a definition, as seen by the post-move resolver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DefinitionKind {
    /// Mobile object living in the world registry.
    #[default]
    Dynamic,
    /// Background tile that movers pick up.
    Item,
    /// Background tile that certain movers disarm.
    Trap,
    /// Any other background tile (walls, exits, decorations).
    Static,
}

bitflags! {
    /// Boolean traits of a definition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ObjectFlags: u8 {
        /// Kills the player on contact, is destroyed when blocked and
        /// destroys whatever dynamic object blocked it.
        const PROJECTILE = 1 << 0;
    }
}

/// Optional hooks attached to a definition.
#[derive(Clone, Default)]
pub struct DefinitionHooks {
    pub behavior: Option<Arc<dyn Behavior>>,
    pub on_collision: Option<Arc<dyn CollisionHandler>>,
    pub on_destroy: Option<Arc<dyn DestroyHandler>>,
    pub on_deactivate: Option<Arc<dyn DeactivateHandler>>,
}

impl fmt::Debug for DefinitionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionHooks")
            .field("behavior", &self.behavior.is_some())
            .field("on_collision", &self.on_collision.is_some())
            .field("on_destroy", &self.on_destroy.is_some())
            .field("on_deactivate", &self.on_deactivate.is_some())
            .finish()
    }
}

/// Metadata shared by every object of one type.
#[derive(Clone, Debug)]
pub struct ObjectDefinition {
    pub object_type: ObjectType,
    pub kind: DefinitionKind,
    pub flags: ObjectFlags,
    /// Cadence of autonomous turns. `None` or zero means the object is
    /// driven by the global turn clock instead.
    pub interval: Option<Duration>,
    /// Types that disarm this definition when it is a trap.
    pub deactivated_by: Vec<ObjectType>,
    pub hooks: DefinitionHooks,
}

impl ObjectDefinition {
    pub fn new(object_type: impl Into<ObjectType>, kind: DefinitionKind) -> Self {
        Self {
            object_type: object_type.into(),
            kind,
            flags: ObjectFlags::empty(),
            interval: None,
            deactivated_by: Vec::new(),
            hooks: DefinitionHooks::default(),
        }
    }

    pub fn dynamic(object_type: impl Into<ObjectType>) -> Self {
        Self::new(object_type, DefinitionKind::Dynamic)
    }

    pub fn item(object_type: impl Into<ObjectType>) -> Self {
        Self::new(object_type, DefinitionKind::Item)
    }

    pub fn trap(object_type: impl Into<ObjectType>) -> Self {
        Self::new(object_type, DefinitionKind::Trap)
    }

    pub fn is_projectile(&self) -> bool {
        self.flags.contains(ObjectFlags::PROJECTILE)
    }

    /// Interval for timer-driven objects; zero intervals count as absent.
    pub fn autonomous_interval(&self) -> Option<Duration> {
        self.interval.filter(|interval| !interval.is_zero())
    }

    pub fn is_deactivated_by(&self, mover: &ObjectType) -> bool {
        self.deactivated_by.contains(mover)
    }

    pub fn projectile(mut self) -> Self {
        self.flags |= ObjectFlags::PROJECTILE;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn deactivated_by<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ObjectType>,
    {
        self.deactivated_by.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn behavior<F>(self, behavior: F) -> Self
    where
        F: Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        self.with_behavior(Arc::new(behavior))
    }

    pub fn with_behavior(mut self, behavior: Arc<dyn Behavior>) -> Self {
        self.hooks.behavior = Some(behavior);
        self
    }

    pub fn on_collision<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        self.hooks.on_collision = Some(Arc::new(handler));
        self
    }

    pub fn on_destroy<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        self.hooks.on_destroy = Some(Arc::new(handler));
        self
    }

    pub fn on_deactivate<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut ObjectHandle<'_>) -> CallbackResult + Send + Sync + 'static,
    {
        self.hooks.on_deactivate = Some(Arc::new(handler));
        self
    }
}
