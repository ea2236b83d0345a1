//! Movement controls systems.
//!
//! - [`attach_added_controls`] triggers
//!   [`AttachControlsEvent`](crate::events::controls::AttachControlsEvent) for
//!   every newly added [`MovementControls`].
//! - [`route_input_observer`] delivers each
//!   [`InputEvent`](crate::events::input::InputEvent) to the controllers the
//!   [`ActionMap`] routes its binding to.
//! - [`unbind_removed_controls`] drops the routes of entities whose
//!   controls were removed or despawned.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::movementcontrols::{ControlledOwner, MovementControls};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::events::controls::AttachControlsEvent;
use crate::events::input::InputEvent;
use crate::resources::actionmap::ActionMap;

/// Attach controllers added since the last run.
pub fn attach_added_controls(
    query: Query<Entity, Added<MovementControls>>,
    mut commands: Commands,
) {
    for entity in query.iter() {
        commands.trigger(AttachControlsEvent { entity });
    }
}

/// Observer that feeds an input change to every routed controller.
///
/// Targets that lost their controls or their `RigidBody` are skipped, as are
/// controllers detached while the map was unavailable.
pub fn route_input_observer(
    trigger: On<InputEvent>,
    action_map: Option<Res<ActionMap>>,
    mut query: Query<(&mut MovementControls, &mut RigidBody, Option<&mut Sprite>)>,
) {
    let Some(action_map) = action_map else {
        return;
    };
    let event = trigger.event();

    for &(target, direction) in action_map.routes(&event.binding) {
        let Ok((mut controls, mut body, mut sprite)) = query.get_mut(target) else {
            debug!(
                "Skipping {} for {:?}: no controls or body",
                event.binding, target
            );
            continue;
        };
        if !controls.is_active() {
            continue;
        }
        let mut owner = ControlledOwner {
            body: &mut body,
            sprite: sprite.as_deref_mut(),
        };
        controls.set(direction, event.value, &mut owner);
    }
}

/// Drop routes of entities whose `MovementControls` went away.
pub fn unbind_removed_controls(
    mut removed: RemovedComponents<MovementControls>,
    action_map: Option<ResMut<ActionMap>>,
) {
    let Some(mut action_map) = action_map else {
        for _ in removed.read() {}
        return;
    };
    for entity in removed.read() {
        debug!("Unbinding removed movement controls of {:?}", entity);
        action_map.unbind_target(entity);
    }
}
