use std::time::Duration;

use maze_core::{
    CallbackError, CallbackKind, DefinitionRegistry, Direction, GridMap, MapDimensions,
    ObjectDefinition, ObjectError, Position, Tick, WorldConfig, WorldError, WorldEvent,
};
use maze_runtime::{Event, Runtime, RuntimeError, Topic};
use tokio::sync::broadcast;

const CADENCE: Duration = Duration::from_millis(100);

fn definitions() -> DefinitionRegistry {
    DefinitionRegistry::new()
        .with(ObjectDefinition::dynamic("crawler").behavior(|me| {
            me.move_to(Direction::Right)?;
            Ok(())
        }))
        .with(
            ObjectDefinition::dynamic("dart")
                .projectile()
                .with_interval(CADENCE)
                .behavior(|me| {
                    me.move_to(Direction::Right)?;
                    Ok(())
                }),
        )
        .with(
            ObjectDefinition::dynamic("sulk")
                .behavior(|_| Err(CallbackError::new("not today"))),
        )
}

fn map(player: Position) -> GridMap {
    GridMap::new(MapDimensions::new(10, 10), player)
}

async fn start(player: Position) -> Runtime {
    Runtime::builder()
        .host(map(player))
        .definitions(definitions())
        .build()
        .await
        .expect("runtime should start")
}

/// Receives until an event matches, skipping anything published earlier.
async fn next_matching(
    rx: &mut broadcast::Receiver<Event>,
    predicate: impl Fn(&WorldEvent) -> bool,
) -> Event {
    loop {
        let event = rx.recv().await.expect("event stream should stay open");
        if predicate(&event.event) {
            return event;
        }
    }
}

#[tokio::test]
async fn ticks_drive_turn_objects_and_publish_moves() {
    let runtime = start(Position::new(9, 9)).await;
    let handle = runtime.handle();
    let mut objects = runtime.subscribe(Topic::Objects);

    let crawler = handle.spawn("crawler", Position::new(0, 0)).await.unwrap();
    assert_eq!(runtime.step().await.unwrap(), Tick(1));
    assert_eq!(handle.tick().await.unwrap(), Tick(2));

    let first = next_matching(&mut objects, |e| matches!(e, WorldEvent::Moved { .. })).await;
    assert_eq!(first.tick, Tick(1));
    assert_eq!(
        first.event,
        WorldEvent::Moved {
            id: crawler,
            from: Position::new(0, 0),
            to: Position::new(1, 0),
        }
    );

    let snapshot = handle.query_world().await.unwrap();
    assert_eq!(snapshot.tick, Tick(2));
    let object = snapshot.object(crawler).unwrap();
    assert_eq!(object.position, Position::new(2, 0));
    assert!(!object.has_turn);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn interval_projectile_kills_player_on_wall_clock() {
    let runtime = start(Position::new(3, 0)).await;
    let handle = runtime.handle();
    let mut player = runtime.subscribe(Topic::Player);

    let dart = handle.spawn("dart", Position::new(0, 0)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(350)).await;

    let killed = next_matching(&mut player, |e| matches!(e, WorldEvent::PlayerKilled { .. })).await;
    assert_eq!(
        killed.event,
        WorldEvent::PlayerKilled {
            by: dart,
            cause: "a dart".into(),
        }
    );

    let cause = handle
        .with_world(|world| {
            world
                .host_as::<GridMap>()
                .and_then(|grid| grid.player_state().cause_of_death().map(str::to_owned))
        })
        .await
        .unwrap();
    assert_eq!(cause.as_deref(), Some("a dart"));
}

#[tokio::test(start_paused = true)]
async fn destroying_an_object_stops_its_timer() {
    let runtime = start(Position::new(9, 9)).await;
    let handle = runtime.handle();

    let dart = handle.spawn("dart", Position::new(0, 5)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    let snapshot = handle.query_world().await.unwrap();
    assert_eq!(snapshot.object(dart).unwrap().position, Position::new(1, 5));
    assert_eq!(snapshot.active_timers, 1);

    let mut objects = runtime.subscribe(Topic::Objects);
    assert!(handle.destroy(dart).await.unwrap());
    assert!(!handle.destroy(dart).await.unwrap());
    tokio::time::sleep(Duration::from_secs(1)).await;

    let snapshot = handle.query_world().await.unwrap();
    assert!(snapshot.objects.is_empty());
    assert_eq!(snapshot.active_timers, 0);

    let destroyed = objects.recv().await.unwrap();
    assert!(matches!(
        destroyed.event,
        WorldEvent::Destroyed { id, on_map_reset: false, .. } if id == dart
    ));
    assert!(objects.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn dummy_worlds_never_schedule_timers() {
    let runtime = Runtime::builder()
        .host(map(Position::new(9, 9)))
        .definitions(definitions())
        .world_config(WorldConfig::dummy())
        .spawn("dart", Position::new(0, 0))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.tick().await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let snapshot = handle.query_world().await.unwrap();
    assert_eq!(snapshot.active_timers, 0);
    assert_eq!(snapshot.objects[0].position, Position::new(0, 0));
}

#[tokio::test]
async fn world_errors_surface_through_the_handle() {
    let runtime = start(Position::new(9, 9)).await;
    let handle = runtime.handle();
    let crawler = handle.spawn("crawler", Position::new(0, 0)).await.unwrap();

    assert!(matches!(
        handle.spawn("ghost", Position::new(1, 1)).await,
        Err(RuntimeError::World(WorldError::UnknownDefinition(_)))
    ));
    assert!(
        handle
            .move_object(crawler, Direction::Right)
            .await
            .unwrap()
            .moved()
    );
    assert!(matches!(
        handle.move_object(crawler, Direction::Right).await,
        Err(RuntimeError::Object(ObjectError::NotYourTurn { .. }))
    ));
    assert!(matches!(
        handle.give_item_to(crawler, "redKey").await,
        Err(RuntimeError::Object(ObjectError::ItemNotHeld { .. }))
    ));
    assert!(matches!(
        handle.set_target(crawler, crawler).await,
        Err(RuntimeError::Object(ObjectError::WrongObjectType { .. }))
    ));
}

#[tokio::test]
async fn callback_failures_reach_diagnostics() {
    let runtime = start(Position::new(9, 9)).await;
    let handle = runtime.handle();
    let mut diagnostics = runtime.subscribe(Topic::Diagnostics);

    let sulk = handle.spawn("sulk", Position::new(4, 4)).await.unwrap();
    handle.tick().await.unwrap();

    let failure = diagnostics.recv().await.unwrap();
    assert_eq!(
        failure.event,
        WorldEvent::CallbackFailed {
            id: sulk,
            kind: CallbackKind::Behavior,
            message: "not today".into(),
        }
    );

    let json = serde_json::to_value(&failure).unwrap();
    assert_eq!(json["event"], "callback_failed");
    assert_eq!(json["tick"], 1);
}

#[tokio::test]
async fn map_reset_destroys_everything_silently() {
    let runtime = Runtime::builder()
        .host(map(Position::new(9, 9)))
        .definitions(definitions())
        .spawn("crawler", Position::new(0, 0))
        .spawn("crawler", Position::new(0, 1))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut objects = runtime.subscribe(Topic::Objects);

    assert_eq!(handle.reset_map().await.unwrap(), 2);

    for _ in 0..2 {
        let event = next_matching(&mut objects, |e| matches!(e, WorldEvent::Destroyed { .. })).await;
        assert!(matches!(
            event.event,
            WorldEvent::Destroyed {
                on_map_reset: true,
                ..
            }
        ));
    }
    let sounds = handle
        .with_world(|world| world.host_as::<GridMap>().map(|grid| grid.sounds().len()))
        .await
        .unwrap();
    assert_eq!(sounds, Some(0));
}

#[tokio::test]
async fn builder_requires_host_and_definitions() {
    assert!(matches!(
        Runtime::builder().definitions(definitions()).build().await,
        Err(RuntimeError::MissingHost)
    ));
    assert!(matches!(
        Runtime::builder().host(map(Position::new(0, 0))).build().await,
        Err(RuntimeError::MissingDefinitions)
    ));
    assert!(matches!(
        Runtime::builder()
            .host(map(Position::new(0, 0)))
            .definitions(definitions())
            .spawn("ghost", Position::new(1, 1))
            .build()
            .await,
        Err(RuntimeError::World(_))
    ));
}

#[tokio::test]
async fn shutdown_stops_the_worker_while_handles_live() {
    let runtime = start(Position::new(9, 9)).await;
    let handle = runtime.handle();

    runtime.shutdown().await.unwrap();

    assert!(matches!(
        handle.tick().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}
