//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the world or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use maze_core::{Direction, MoveOutcome, ObjectId, ObjectType, Position, Tick, World};

use super::errors::{Result, RuntimeError};
use super::snapshot::WorldSnapshot;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Run one global tick and return its number
    pub async fn tick(&self) -> Result<Tick> {
        self.request(|reply| Command::Tick { reply }).await
    }

    /// Create an object of `object_type` at `position`
    pub async fn spawn(
        &self,
        object_type: impl Into<ObjectType>,
        position: Position,
    ) -> Result<ObjectId> {
        let object_type = object_type.into();
        Ok(self
            .request(|reply| Command::Spawn {
                object_type,
                position,
                reply,
            })
            .await??)
    }

    /// Move an object that currently holds its turn
    ///
    /// Outside hooks objects rarely hold their turn, so this mostly returns
    /// [`ObjectError::NotYourTurn`](maze_core::ObjectError::NotYourTurn).
    pub async fn move_object(&self, id: ObjectId, direction: Direction) -> Result<MoveOutcome> {
        Ok(self
            .request(|reply| Command::Move {
                id,
                direction,
                reply,
            })
            .await??)
    }

    /// Destroy an object, running its destroy hook
    ///
    /// Returns `false` if the object was already gone.
    pub async fn destroy(&self, id: ObjectId) -> Result<bool> {
        self.request(|reply| Command::Destroy { id, reply }).await
    }

    /// Destroy every live object without hooks or sounds
    pub async fn reset_map(&self) -> Result<usize> {
        self.request(|reply| Command::ResetMap { reply }).await
    }

    /// Hand `item` from an object's inventory to the player
    pub async fn give_item_to(&self, id: ObjectId, item: impl Into<ObjectType>) -> Result<()> {
        let item = item.into();
        Ok(self
            .request(|reply| Command::GiveItem { id, item, reply })
            .await??)
    }

    /// Point a teleporter at another object
    pub async fn set_target(&self, id: ObjectId, target: ObjectId) -> Result<()> {
        Ok(self
            .request(|reply| Command::SetTarget { id, target, reply })
            .await??)
    }

    /// Query the live registry (read-only snapshot)
    pub async fn query_world(&self) -> Result<WorldSnapshot> {
        self.request(|reply| Command::QueryWorld { reply }).await
    }

    /// Run `f` against the world on the worker task and return its result
    ///
    /// Events raised by `f` are published once it returns.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let alive = handle
    ///     .with_world(|world| world.host().player().position())
    ///     .await?;
    /// ```
    pub async fn with_world<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut World) -> T + Send + 'static,
        T: Send + 'static,
    {
        self.request(|reply| Command::WithWorld {
            job: Box::new(move |world| {
                // The caller may have given up waiting; the work is done either way.
                let _ = reply.send(f(world));
            }),
        })
        .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Ticks` - Global tick boundaries
    /// - `Topic::Objects` - Spawns, moves, pickups, destruction
    /// - `Topic::Player` - Deaths and items handed over
    /// - `Topic::Diagnostics` - Failed object callbacks
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Ask the worker to stop; later requests fail with `CommandChannelClosed`
    pub async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
