//! Integration tests for movement controls driven through the ECS world.
//!
//! These tests spawn controlled entities, run the per-frame schedule, and
//! trigger input/attach/detach events the way the binary does.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test controls_integration
//! ```

use bevy_ecs::prelude::*;
use glam::Vec2;

use aberredcontrols::components::mapposition::MapPosition;
use aberredcontrols::components::movementcontrols::{
    Direction, MovementControls, MovementControlsConfig,
};
use aberredcontrols::components::rigidbody::RigidBody;
use aberredcontrols::components::sprite::Sprite;
use aberredcontrols::events::controls::{AttachControlsEvent, DetachControlsEvent};
use aberredcontrols::events::input::InputEvent;
use aberredcontrols::game::{setup_world, spawn_wizard, update_schedule};
use aberredcontrols::resources::actionmap::ActionMap;
use aberredcontrols::resources::gameconfig::GameConfig;
use aberredcontrols::resources::input::InputBinding;
use aberredcontrols::resources::inputscript::InputScript;
use aberredcontrols::systems::input::replay_input;
use aberredcontrols::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world() -> World {
    setup_world(&GameConfig::new())
}

fn tick(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

fn press(world: &mut World, key: &str) {
    world.trigger(InputEvent::pressed(InputBinding::keyboard(key)));
    world.flush();
}

fn release(world: &mut World, key: &str) {
    world.trigger(InputEvent::released(InputBinding::keyboard(key)));
    world.flush();
}

fn velocity(world: &World, entity: Entity) -> Vec2 {
    world.get::<RigidBody>(entity).unwrap().velocity
}

fn bound_routes(world: &World) -> usize {
    world.resource::<ActionMap>().binding_count()
}

fn spawn_controlled(world: &mut World, config: MovementControlsConfig) -> Entity {
    world
        .spawn((
            MapPosition::new(0.0, 0.0),
            RigidBody::new(),
            Sprite::new("test", 1.0, 1.0),
            MovementControls::new(config),
        ))
        .id()
}

// =============================================================================
// Attach
// =============================================================================

#[test]
fn added_controls_attach_on_first_tick() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();

    assert_eq!(bound_routes(&world), 0);
    tick(&mut world, &mut schedule, 0.0);

    assert_eq!(bound_routes(&world), 4);
    let controls = world.get::<MovementControls>(wizard).unwrap();
    assert_eq!(controls.bound_count(), 4);
    assert_eq!(controls.attached_to(), Some(wizard));
}

#[test]
fn attach_is_not_repeated_on_later_ticks() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);

    press(&mut world, "right");
    tick(&mut world, &mut schedule, 0.0);

    // A second attach would have reset the held key.
    assert!(approx_eq(velocity(&world, wizard).x, 20.0));
    assert_eq!(bound_routes(&world), 4);
}

#[test]
fn attach_without_action_map_stays_inert() {
    let mut world = make_world();
    world.remove_resource::<ActionMap>();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();

    tick(&mut world, &mut schedule, 0.0);
    press(&mut world, "right");

    let controls = world.get::<MovementControls>(wizard).unwrap();
    assert_eq!(controls.bound_count(), 0);
    for d in Direction::ALL {
        assert_eq!(controls.intensity(d), 0.0);
    }
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);

    world.trigger(DetachControlsEvent { entity: wizard });
    world.flush();
    let controls = world.get::<MovementControls>(wizard).unwrap();
    assert_eq!(controls.bound_count(), 0);
}

#[test]
fn attach_without_rigidbody_registers_nothing() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let entity = world
        .spawn((MapPosition::new(0.0, 0.0), MovementControls::default()))
        .id();

    tick(&mut world, &mut schedule, 0.0);

    assert_eq!(bound_routes(&world), 0);
    let controls = world.get::<MovementControls>(entity).unwrap();
    assert_eq!(controls.bound_count(), 0);
    assert!(controls.attached_to().is_none());
}

// =============================================================================
// Input routing
// =============================================================================

#[test]
fn right_then_left_sets_and_cancels_velocity() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);

    press(&mut world, "right");
    assert_eq!(velocity(&world, wizard), Vec2::new(20.0, 0.0));

    press(&mut world, "left");
    assert_eq!(velocity(&world, wizard), Vec2::new(0.0, 0.0));

    release(&mut world, "right");
    assert_eq!(velocity(&world, wizard), Vec2::new(-20.0, 0.0));

    press(&mut world, "up");
    assert_eq!(velocity(&world, wizard), Vec2::new(-20.0, 20.0));

    press(&mut world, "down");
    release(&mut world, "left");
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);
}

#[test]
fn unbound_input_is_ignored() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);

    press(&mut world, "space");
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);
}

#[test]
fn analog_binding_passes_value_through() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let stick: InputBinding = "joystick0 xaxis".parse().unwrap();
    let entity = spawn_controlled(
        &mut world,
        MovementControlsConfig {
            right_binding: stick.clone(),
            horizontal_speed: 10.0,
            ..Default::default()
        },
    );
    tick(&mut world, &mut schedule, 0.0);

    world.trigger(InputEvent::new(stick.clone(), 0.25));
    world.flush();
    assert!(approx_eq(velocity(&world, entity).x, 2.5));

    world.trigger(InputEvent::new(stick, 1.5));
    world.flush();
    assert!(approx_eq(velocity(&world, entity).x, 15.0));
}

#[test]
fn shared_binding_drives_every_controller() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let a = spawn_controlled(&mut world, MovementControlsConfig::default());
    let b = spawn_controlled(
        &mut world,
        MovementControlsConfig {
            horizontal_speed: 5.0,
            ..Default::default()
        },
    );
    tick(&mut world, &mut schedule, 0.0);
    assert_eq!(bound_routes(&world), 8);

    press(&mut world, "right");
    assert_eq!(velocity(&world, a), Vec2::new(20.0, 0.0));
    assert_eq!(velocity(&world, b), Vec2::new(5.0, 0.0));
}

#[test]
fn facing_flag_follows_net_horizontal_intent() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let entity = spawn_controlled(
        &mut world,
        MovementControlsConfig {
            flip_facing: true,
            ..Default::default()
        },
    );
    tick(&mut world, &mut schedule, 0.0);
    let flipped = |world: &World| world.get::<Sprite>(entity).unwrap().flip_h;

    press(&mut world, "left");
    assert!(flipped(&world));

    press(&mut world, "right");
    assert!(!flipped(&world));

    release(&mut world, "left");
    assert!(!flipped(&world));
}

#[test]
fn facing_flag_untouched_when_disabled() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let entity = spawn_controlled(&mut world, MovementControlsConfig::default());
    tick(&mut world, &mut schedule, 0.0);

    press(&mut world, "left");
    assert!(!world.get::<Sprite>(entity).unwrap().flip_h);
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn held_key_moves_entity_over_time() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);

    press(&mut world, "right");
    press(&mut world, "up");
    tick(&mut world, &mut schedule, 0.5);

    let pos = world.get::<MapPosition>(wizard).unwrap().pos;
    assert!(approx_eq(pos.x, 10.0));
    assert!(approx_eq(pos.y, 10.0));

    release(&mut world, "right");
    release(&mut world, "up");
    tick(&mut world, &mut schedule, 0.5);
    let pos = world.get::<MapPosition>(wizard).unwrap().pos;
    assert!(approx_eq(pos.x, 10.0));
    assert!(approx_eq(pos.y, 10.0));
}

#[test]
fn frozen_body_keeps_position() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);

    press(&mut world, "down");
    world.get_mut::<RigidBody>(wizard).unwrap().freeze();
    tick(&mut world, &mut schedule, 1.0);

    assert_eq!(world.get::<MapPosition>(wizard).unwrap().pos, Vec2::ZERO);
    assert_eq!(velocity(&world, wizard), Vec2::new(0.0, -20.0));
}

#[test]
fn replayed_script_walks_the_wizard() {
    let script = InputScript::from_json(
        r#"{ "steps": [
            { "frame": 0, "binding": "keyboard right", "value": 1.0 },
            { "frame": 2, "binding": "keyboard right", "value": 0.0 }
        ] }"#,
    )
    .unwrap();
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();

    // Same order as the headless runner: tick, then feed the frame's input.
    for frame in 0..4 {
        tick(&mut world, &mut schedule, 0.25);
        replay_input(&mut world, &script, frame);
    }

    // Moving during ticks 1 and 2 only: 2 * 0.25s * 20.
    let pos = world.get::<MapPosition>(wizard).unwrap().pos;
    assert!(approx_eq(pos.x, 10.0));
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);
}

// =============================================================================
// Detach
// =============================================================================

#[test]
fn detach_releases_bindings_and_stops() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);

    press(&mut world, "right");
    press(&mut world, "up");
    world.trigger(DetachControlsEvent { entity: wizard });
    world.flush();

    assert_eq!(bound_routes(&world), 0);
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);
    let controls = world.get::<MovementControls>(wizard).unwrap();
    for d in Direction::ALL {
        assert_eq!(controls.intensity(d), 0.0);
    }

    // Input after detach no longer reaches the entity.
    press(&mut world, "left");
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);
}

#[test]
fn double_detach_matches_single_detach() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);
    press(&mut world, "left");

    world.trigger(DetachControlsEvent { entity: wizard });
    world.flush();
    let once = world.get::<MovementControls>(wizard).unwrap().clone();

    world.trigger(DetachControlsEvent { entity: wizard });
    world.flush();
    let twice = world.get::<MovementControls>(wizard).unwrap();

    assert_eq!(twice.bound_count(), once.bound_count());
    assert_eq!(twice.velocity(), once.velocity());
    assert_eq!(bound_routes(&world), 0);
}

#[test]
fn detach_while_map_is_missing_is_released_later() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);
    press(&mut world, "right");

    let map = world.remove_resource::<ActionMap>().unwrap();
    world.trigger(DetachControlsEvent { entity: wizard });
    world.flush();
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);
    world.insert_resource(map);

    // The stale routes no longer move the detached entity.
    press(&mut world, "right");
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);

    world.trigger(DetachControlsEvent { entity: wizard });
    world.flush();
    assert_eq!(bound_routes(&world), 0);
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);
    let controls = world.get::<MovementControls>(wizard).unwrap();
    assert_eq!(controls.bound_count(), 0);
    assert!(controls.attached_to().is_none());
}

#[test]
fn attach_while_map_is_missing_stops_held_input() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);
    press(&mut world, "right");
    assert!(approx_eq(velocity(&world, wizard).x, 20.0));

    let map = world.remove_resource::<ActionMap>().unwrap();
    world.trigger(AttachControlsEvent { entity: wizard });
    world.flush();

    let controls = world.get::<MovementControls>(wizard).unwrap();
    assert_eq!(controls.velocity(), Vec2::ZERO);
    assert_eq!(velocity(&world, wizard), Vec2::ZERO);

    // Routes from the first attach are still owned and released on detach.
    world.insert_resource(map);
    assert_eq!(bound_routes(&world), 4);
    world.trigger(DetachControlsEvent { entity: wizard });
    world.flush();
    assert_eq!(bound_routes(&world), 0);
}

#[test]
fn attach_detach_attach_restores_bindings() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let wizard = spawn_wizard(&mut world, &MovementControlsConfig::default()).unwrap();
    tick(&mut world, &mut schedule, 0.0);
    let first: Vec<_> = world
        .get::<MovementControls>(wizard)
        .unwrap()
        .bound()
        .to_vec();

    press(&mut world, "down");
    world.trigger(DetachControlsEvent { entity: wizard });
    world.trigger(AttachControlsEvent { entity: wizard });
    world.flush();

    let controls = world.get::<MovementControls>(wizard).unwrap();
    assert_eq!(controls.bound(), first.as_slice());
    for d in Direction::ALL {
        assert_eq!(controls.intensity(d), 0.0);
    }
    assert_eq!(bound_routes(&world), 4);

    press(&mut world, "down");
    assert_eq!(velocity(&world, wizard), Vec2::new(0.0, -20.0));
}

#[test]
fn despawn_drops_routes() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let keep = spawn_controlled(&mut world, MovementControlsConfig::default());
    let gone = spawn_controlled(&mut world, MovementControlsConfig::default());
    tick(&mut world, &mut schedule, 0.0);
    assert_eq!(bound_routes(&world), 8);

    world.despawn(gone);
    tick(&mut world, &mut schedule, 0.0);

    assert_eq!(bound_routes(&world), 4);
    press(&mut world, "right");
    assert_eq!(velocity(&world, keep), Vec2::new(20.0, 0.0));
}

#[test]
fn removing_component_drops_routes() {
    let mut world = make_world();
    let mut schedule = update_schedule();
    let entity = spawn_controlled(&mut world, MovementControlsConfig::default());
    tick(&mut world, &mut schedule, 0.0);

    world.entity_mut(entity).remove::<MovementControls>();
    tick(&mut world, &mut schedule, 0.0);

    assert_eq!(bound_routes(&world), 0);
    press(&mut world, "up");
    assert_eq!(velocity(&world, entity), Vec2::ZERO);
}
