//! Position integration.
//!
//! Advances [`MapPosition`] by each [`RigidBody`] velocity scaled by the frame
//! delta from [`WorldTime`]. Frozen bodies are left where they are.
use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

pub fn movement(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        position.pos += rigidbody.velocity * time.delta;
    }
}
