//! Demo scene setup.
//!
//! Builds the ECS world used by the binary and the integration tests: the
//! resources, the observers that wire input to movement controls, the
//! per-frame schedule, and the controllable wizard sprite.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::mapposition::MapPosition;
use crate::components::movementcontrols::{MovementControls, MovementControlsConfig};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::error::ControlsError;
use crate::events::controls::{attach_controls_observer, detach_controls_observer};
use crate::resources::actionmap::ActionMap;
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::controls::{
    attach_added_controls, route_input_observer, unbind_removed_controls,
};
use crate::systems::movement::movement;

/// Animation the wizard spawns with.
pub const WIZARD_SPAWN_ANIMATION: &str = "wizard_walk_west";

/// Animations known for the wizard sprite.
pub const WIZARD_ANIMATIONS: [&str; 4] = [
    "wizard_death",
    "wizard_walk_north",
    "wizard_walk_south",
    "wizard_walk_west",
];

/// Size in world units of a wizard animation.
pub fn wizard_size(anim: &str) -> Option<Vec2> {
    WIZARD_ANIMATIONS
        .contains(&anim)
        .then_some(Vec2::new(7.5, 15.0))
}

/// Create a world with the resources and observers movement controls need.
///
/// The [`ActionMap`] is inserted here; remove it to run without input
/// routing.
pub fn setup_world(config: &GameConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(ActionMap::new());
    world.insert_resource(config.clone());

    world.spawn(Observer::new(attach_controls_observer));
    world.spawn(Observer::new(detach_controls_observer));
    world.spawn(Observer::new(route_input_observer));
    // Ensure the observers are registered before anything triggers events.
    world.flush();
    world
}

/// Per-frame schedule: attach new controls, drop stale routes, move.
pub fn update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(attach_added_controls);
    update.add_systems(unbind_removed_controls);
    update.add_systems(
        movement
            .after(attach_added_controls)
            .after(unbind_removed_controls),
    );
    update
}

/// Spawn the wizard sprite at the origin with movement controls.
///
/// The controls attach on the next schedule run.
pub fn spawn_wizard(
    world: &mut World,
    controls: &MovementControlsConfig,
) -> Result<Entity, ControlsError> {
    let controls = MovementControls::from_config(controls)?;
    let size = wizard_size(WIZARD_SPAWN_ANIMATION).unwrap_or(Vec2::ONE);

    let entity = world
        .spawn((
            Sprite::new(WIZARD_SPAWN_ANIMATION, size.x, size.y),
            MapPosition::new(0.0, 0.0),
            RigidBody::new(),
            controls,
        ))
        .id();
    log::info!("Spawned wizard {:?}", entity);
    Ok(entity)
}
