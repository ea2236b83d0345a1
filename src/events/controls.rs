//! Attach and detach events for movement controls.
//!
//! Triggering [`AttachControlsEvent`] registers an entity's
//! [`MovementControls`] bindings with the
//! [`ActionMap`](crate::resources::actionmap::ActionMap); triggering
//! [`DetachControlsEvent`] releases them and stops the entity. The
//! [`attach_added_controls`](crate::systems::controls::attach_added_controls)
//! system triggers the attach automatically for newly added components.
//!
//! Both observers degrade to local state changes when the `ActionMap`
//! resource is missing, and report a missing owner (`RigidBody`) as an
//! error.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, warn};

use crate::components::movementcontrols::{ControlledOwner, MovementControls};
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::resources::actionmap::{ActionMap, InputRouter};

/// Event used to attach the movement controls of `entity`.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttachControlsEvent {
    pub entity: Entity,
}

/// Event used to detach the movement controls of `entity`.
#[derive(Event, Debug, Clone, Copy)]
pub struct DetachControlsEvent {
    pub entity: Entity,
}

/// Observer that attaches an entity's movement controls.
///
/// - Without an `ActionMap`, the controls stay inert and a warning is logged.
/// - Without a `RigidBody`, attach fails and the error is logged.
pub fn attach_controls_observer(
    trigger: On<AttachControlsEvent>,
    mut action_map: Option<ResMut<ActionMap>>,
    mut query: Query<(
        &mut MovementControls,
        Option<&mut RigidBody>,
        Option<&mut Sprite>,
    )>,
) {
    let entity = trigger.event().entity;
    let Ok((mut controls, body, mut sprite)) = query.get_mut(entity) else {
        debug!("AttachControlsEvent for {:?} without MovementControls", entity);
        return;
    };

    if action_map.is_none() {
        warn!(
            "Input routing unavailable, movement controls on {:?} stay inert",
            entity
        );
    }
    let router = action_map
        .as_deref_mut()
        .map(|map| map as &mut dyn InputRouter);

    let result = match body {
        Some(mut body) => {
            let mut owner = ControlledOwner {
                body: &mut body,
                sprite: sprite.as_deref_mut(),
            };
            controls.attach(entity, router, Some(&mut owner))
        }
        None => controls.attach(entity, router, None),
    };

    match result {
        Ok(count) => debug!("Attached {} input bindings to {:?}", count, entity),
        Err(e) => error!("Cannot attach movement controls to {:?}: {}", entity, e),
    }
}

/// Observer that detaches an entity's movement controls.
///
/// Releases all bindings, resets the intensities, and pushes the resulting
/// zero velocity to the owner when it has a `RigidBody`. Detaching twice is
/// harmless.
pub fn detach_controls_observer(
    trigger: On<DetachControlsEvent>,
    mut action_map: Option<ResMut<ActionMap>>,
    mut query: Query<(
        &mut MovementControls,
        Option<&mut RigidBody>,
        Option<&mut Sprite>,
    )>,
) {
    let entity = trigger.event().entity;
    let Ok((mut controls, body, mut sprite)) = query.get_mut(entity) else {
        debug!("DetachControlsEvent for {:?} without MovementControls", entity);
        return;
    };

    let router = action_map
        .as_deref_mut()
        .map(|map| map as &mut dyn InputRouter);

    match body {
        Some(mut body) => {
            let mut owner = ControlledOwner {
                body: &mut body,
                sprite: sprite.as_deref_mut(),
            };
            controls.detach(router, Some(&mut owner));
        }
        None => controls.detach(router, None),
    }
    debug!("Detached movement controls from {:?}", entity);
}
