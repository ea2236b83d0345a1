//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity of an entity. It is the
//! velocity capability that
//! [`MovementControls`](super::movementcontrols::MovementControls) writes to
//! and that the [`movement`](crate::systems::movement::movement) system reads
//! to advance [`MapPosition`](super::mapposition::MapPosition).
//!
//! The `frozen` flag allows temporarily disabling integration, useful when an
//! entity's position is controlled externally.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::movementcontrols::Movable;

/// Kinematic body storing velocity.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::new();
/// rb.set_velocity_x(20.0);
///
/// // Freeze position (e.g., during a cutscene)
/// rb.freeze();
/// ```
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// When true, movement system skips this entity.
    pub frozen: bool,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            frozen: false,
        }
    }

    /// Set only the horizontal component.
    pub fn set_velocity_x(&mut self, vx: f32) {
        self.velocity.x = vx;
    }

    /// Set only the vertical component.
    pub fn set_velocity_y(&mut self, vy: f32) {
        self.velocity.y = vy;
    }

    /// Freeze the rigid body, preventing movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing movement system to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

impl Movable for RigidBody {
    fn set_velocity_x(&mut self, vx: f32) {
        RigidBody::set_velocity_x(self, vx);
    }

    fn set_velocity_y(&mut self, vy: f32) {
        RigidBody::set_velocity_y(self, vy);
    }
}
