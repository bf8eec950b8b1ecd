//! Simulation worker that owns the authoritative [`maze_core::World`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle) and timer
//! firings from [`TokioTimers`](crate::TokioTimers), applies them to the world
//! one at a time and publishes the resulting events to the EventBus.

use tokio::sync::{mpsc, oneshot};

use maze_core::{
    Direction, MoveOutcome, ObjectError, ObjectId, ObjectType, Position, Tick, World, WorldError,
};
use tracing::{debug, trace};

use crate::api::WorldSnapshot;
use crate::events::{Event, EventBus};

const TARGET: &str = "maze_runtime::worker";

/// Closure run against the world on the worker task.
pub type WorldJob = Box<dyn FnOnce(&mut World) + Send>;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Run one global tick.
    Tick { reply: oneshot::Sender<Tick> },
    /// Create a dynamic object.
    Spawn {
        object_type: ObjectType,
        position: Position,
        reply: oneshot::Sender<Result<ObjectId, WorldError>>,
    },
    /// Move an object that currently holds its turn.
    Move {
        id: ObjectId,
        direction: Direction,
        reply: oneshot::Sender<Result<MoveOutcome, ObjectError>>,
    },
    /// Destroy an object (not a map reset).
    Destroy {
        id: ObjectId,
        reply: oneshot::Sender<bool>,
    },
    /// Destroy every live object silently.
    ResetMap { reply: oneshot::Sender<usize> },
    /// Hand an item from an object's inventory to the player.
    GiveItem {
        id: ObjectId,
        item: ObjectType,
        reply: oneshot::Sender<Result<(), ObjectError>>,
    },
    /// Point a teleporter at another object.
    SetTarget {
        id: ObjectId,
        target: ObjectId,
        reply: oneshot::Sender<Result<(), ObjectError>>,
    },
    /// Copy the live registry.
    QueryWorld {
        reply: oneshot::Sender<WorldSnapshot>,
    },
    /// Run arbitrary code against the world.
    WithWorld { job: WorldJob },
    /// Stop the worker even if handles are still alive.
    Shutdown,
}

/// Background task that serialises commands and timer firings.
///
/// Firings that are already queued are applied before the next command, so a
/// command never observes a world that is behind wall-clock time.
pub struct SimulationWorker {
    world: World,
    command_rx: mpsc::Receiver<Command>,
    firing_rx: mpsc::UnboundedReceiver<ObjectId>,
    event_bus: EventBus,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        world: World,
        command_rx: mpsc::Receiver<Command>,
        firing_rx: mpsc::UnboundedReceiver<ObjectId>,
        event_bus: EventBus,
    ) -> Self {
        tracing::info!(
            target: TARGET,
            live_objects = world.live_count(),
            dummy = world.is_dummy(),
            "simulation worker initialized"
        );

        Self {
            world,
            command_rx,
            firing_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Ends when the command channel closes or a shutdown command arrives.
    /// The firing channel never closes on its own since the world's timers
    /// hold its sender.
    pub async fn run(mut self) {
        self.publish_events();

        loop {
            tokio::select! {
                biased;

                Some(id) = self.firing_rx.recv() => {
                    self.handle_firing(id);
                }
                command = self.command_rx.recv() => {
                    match command {
                        Some(Command::Shutdown) | None => break,
                        Some(command) => self.handle_command(command),
                    }
                }
            }
            self.publish_events();
        }

        debug!(target: TARGET, "simulation worker stopped");
    }

    fn handle_firing(&mut self, id: ObjectId) {
        if !self.world.fire_interval(id) {
            trace!(target: TARGET, %id, "ignored firing for a dead object");
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Tick { reply } => {
                let tick = self.world.tick();
                if reply.send(tick).is_err() {
                    debug!(target: TARGET, "Tick reply channel closed (caller dropped)");
                }
            }
            Command::Spawn {
                object_type,
                position,
                reply,
            } => {
                let result = self.world.spawn(object_type, position);
                if reply.send(result).is_err() {
                    debug!(target: TARGET, "Spawn reply channel closed (caller dropped)");
                }
            }
            Command::Move {
                id,
                direction,
                reply,
            } => {
                let result = self.world.move_object(id, direction);
                if reply.send(result).is_err() {
                    debug!(target: TARGET, "Move reply channel closed (caller dropped)");
                }
            }
            Command::Destroy { id, reply } => {
                let destroyed = self.world.destroy(id, false);
                if reply.send(destroyed).is_err() {
                    debug!(target: TARGET, "Destroy reply channel closed (caller dropped)");
                }
            }
            Command::ResetMap { reply } => {
                let removed = self.world.reset_map();
                if reply.send(removed).is_err() {
                    debug!(target: TARGET, "ResetMap reply channel closed (caller dropped)");
                }
            }
            Command::GiveItem { id, item, reply } => {
                let result = self.world.give_item_to(id, &item);
                if reply.send(result).is_err() {
                    debug!(target: TARGET, "GiveItem reply channel closed (caller dropped)");
                }
            }
            Command::SetTarget { id, target, reply } => {
                let result = self.world.set_target(id, target);
                if reply.send(result).is_err() {
                    debug!(target: TARGET, "SetTarget reply channel closed (caller dropped)");
                }
            }
            Command::QueryWorld { reply } => {
                if reply.send(WorldSnapshot::capture(&self.world)).is_err() {
                    debug!(target: TARGET, "QueryWorld reply channel closed (caller dropped)");
                }
            }
            Command::WithWorld { job } => job(&mut self.world),
            Command::Shutdown => {}
        }
    }

    fn publish_events(&mut self) {
        let tick = self.world.current_tick();
        for event in self.world.drain_events() {
            self.event_bus.publish(Event::new(tick, event));
        }
    }
}
