mod common;

use common::{Trace, grid, open_map, place_player, world};
use maze_core::{
    DefinitionRegistry, Direction, ObjectDefinition, ObjectError, ObjectId, ObjectType, Position,
    Sound, WorldEvent,
};

fn definitions(destroyed: &Trace<(ObjectId, Position)>) -> DefinitionRegistry {
    let on_bomb = destroyed.clone();
    let on_rocket = destroyed.clone();
    DefinitionRegistry::new()
        .with(ObjectDefinition::dynamic("drone"))
        .with(ObjectDefinition::dynamic("teleporter"))
        .with(ObjectDefinition::item("computer"))
        .with(ObjectDefinition::dynamic("bomb").on_destroy(move |me| {
            on_bomb.push((me.id(), me.position().unwrap()));
            Ok(())
        }))
        .with(
            ObjectDefinition::dynamic("rocket")
                .projectile()
                .on_destroy(move |me| {
                    on_rocket.push((me.id(), me.position().unwrap()));
                    Ok(())
                }),
        )
}

#[test]
fn destroy_plays_explosion_and_runs_hook() {
    let destroyed = Trace::new();
    let mut world = world(definitions(&destroyed), open_map());
    let bomb = world.spawn("bomb", Position::new(3, 4)).unwrap();

    assert!(world.destroy(bomb, false));

    assert_eq!(destroyed.entries(), vec![(bomb, Position::new(3, 4))]);
    assert_eq!(grid(&world).sounds(), &[Sound::Explosion]);
    assert_eq!(grid(&world).refresh_count(), 1);
    assert!(!world.is_live(bomb));
}

#[test]
fn destroy_is_idempotent() {
    let destroyed = Trace::new();
    let mut world = world(definitions(&destroyed), open_map());
    let bomb = world.spawn("bomb", Position::new(3, 4)).unwrap();

    assert!(world.destroy(bomb, false));
    assert!(!world.destroy(bomb, false));
    assert!(!world.destroy(ObjectId(99), false));

    assert_eq!(destroyed.entries().len(), 1);
    assert_eq!(grid(&world).sounds().len(), 1);
}

#[test]
fn map_reset_is_silent() {
    let destroyed = Trace::new();
    let mut world = world(definitions(&destroyed), open_map());
    let bomb = world.spawn("bomb", Position::new(1, 1)).unwrap();
    let drone = world.spawn("drone", Position::new(2, 1)).unwrap();
    world.drain_events();

    assert_eq!(world.reset_map(), 2);

    assert!(destroyed.entries().is_empty());
    assert!(grid(&world).sounds().is_empty());
    assert_eq!(world.live_count(), 0);
    assert_eq!(
        world.drain_events(),
        vec![
            WorldEvent::Destroyed {
                id: bomb,
                object_type: "bomb".into(),
                on_map_reset: true,
            },
            WorldEvent::Destroyed {
                id: drone,
                object_type: "drone".into(),
                on_map_reset: true,
            },
        ]
    );
}

#[test]
fn projectile_destruction_skips_only_the_explosion() {
    let destroyed = Trace::new();
    let mut world = world(definitions(&destroyed), open_map().with_wall(Position::new(0, 1)));
    let rocket = world.spawn("rocket", Position::new(0, 0)).unwrap();

    world.move_object(rocket, Direction::Down).unwrap();

    assert_eq!(destroyed.entries(), vec![(rocket, Position::new(0, 0))]);
    assert!(grid(&world).sounds().is_empty());
}

#[test]
fn destroy_hook_sees_final_state_but_cannot_move() {
    let attempts = Trace::new();
    let log = attempts.clone();
    let definitions = DefinitionRegistry::new().with(ObjectDefinition::dynamic("ghost").on_destroy(
        move |me| {
            log.push((me.move_to(Direction::Up), me.position(), me.is_destroyed()));
            Ok(())
        },
    ));
    let mut world = world(definitions, open_map());
    let ghost = world.spawn("ghost", Position::new(4, 4)).unwrap();

    world.destroy(ghost, false);

    assert_eq!(
        attempts.entries(),
        vec![(Err(ObjectError::Destroyed(ghost)), Some(Position::new(4, 4)), true)]
    );
}

#[test]
fn give_item_checks_inventory_before_adjacency() {
    let destroyed = Trace::new();
    let map = open_map().with_background(Position::new(1, 0), "computer");
    let mut world = world(definitions(&destroyed), map);
    let drone = world.spawn("drone", Position::new(0, 0)).unwrap();
    let computer = ObjectType::from("computer");

    // Adjacent but empty-handed.
    place_player(&mut world, Position::new(0, 1));
    assert!(matches!(
        world.give_item_to(drone, &computer),
        Err(ObjectError::ItemNotHeld { .. })
    ));

    // Far away but empty-handed.
    place_player(&mut world, Position::new(9, 9));
    assert!(matches!(
        world.give_item_to(drone, &computer),
        Err(ObjectError::ItemNotHeld { .. })
    ));

    world.move_object(drone, Direction::Right).unwrap();
    assert!(world.object(drone).unwrap().inventory().contains(&computer));

    // Holding it but far away.
    assert!(matches!(
        world.give_item_to(drone, &computer),
        Err(ObjectError::NotAdjacent { .. })
    ));

    place_player(&mut world, Position::new(2, 0));
    world.give_item_to(drone, &computer).unwrap();

    assert!(world.object(drone).unwrap().inventory().is_empty());
    assert_eq!(grid(&world).player_state().items(), &[computer.clone()]);
    assert!(matches!(
        world.give_item_to(drone, &computer),
        Err(ObjectError::ItemNotHeld { .. })
    ));
}

#[test]
fn player_on_the_same_cell_counts_as_touching() {
    let destroyed = Trace::new();
    let map = open_map().with_background(Position::new(5, 6), "computer");
    let mut world = world(definitions(&destroyed), map);
    let drone = world.spawn("drone", Position::new(5, 5)).unwrap();
    world.move_object(drone, Direction::Down).unwrap();
    place_player(&mut world, Position::new(5, 6));

    let mut handle = world.handle(drone);
    assert_eq!(handle.give_item_to("computer"), Ok(()));
}

#[test]
fn teleporter_targets() {
    let destroyed = Trace::new();
    let mut world = world(definitions(&destroyed), open_map());
    let a = world.spawn("teleporter", Position::new(1, 1)).unwrap();
    let b = world.spawn("teleporter", Position::new(8, 8)).unwrap();
    let drone = world.spawn("drone", Position::new(4, 4)).unwrap();

    assert_eq!(world.set_target(a, a), Err(ObjectError::SelfTarget(a)));
    assert!(matches!(
        world.set_target(drone, b),
        Err(ObjectError::WrongObjectType { id, .. }) if id == drone
    ));
    assert_eq!(
        world.set_target(a, ObjectId(42)),
        Err(ObjectError::UnknownObject(ObjectId(42)))
    );

    world.set_target(a, b).unwrap();
    assert_eq!(world.object(a).unwrap().target(), Some(b));
    assert_eq!(world.handle(a).target(), Some(b));
}

#[test]
fn stale_handles_have_no_position() {
    let destroyed = Trace::new();
    let mut world = world(definitions(&destroyed), open_map());
    let drone = world.spawn("drone", Position::new(3, 2)).unwrap();

    world.destroy(drone, false);
    assert_eq!(world.handle(drone).position(), Some(Position::new(3, 2)));

    world.tick();
    let handle = world.handle(drone);
    assert_eq!(handle.position(), None);
    assert_eq!((handle.x(), handle.y()), (None, None));
    assert_eq!(world.handle(ObjectId(77)).position(), None);
}
