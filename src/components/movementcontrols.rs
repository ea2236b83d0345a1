//! Input-driven movement controls.
//!
//! [`MovementControls`] accumulates four directional intensities
//! (up/down/left/right) fed by an input router and pushes the derived velocity
//! to its owner every time one of them changes:
//!
//! ```text
//! vx = (right - left) * horizontal_speed
//! vy = (up - down)    * vertical_speed
//! ```
//!
//! The owner is reached through the [`Movable`] capability only, so the
//! component never needs the full entity. In the ECS the owner is the entity
//! carrying the component and [`ControlledOwner`] wraps its
//! [`RigidBody`](super::rigidbody::RigidBody) and optional
//! [`Sprite`](super::sprite::Sprite).
//!
//! Systems in [`crate::systems::controls`] and observers in
//! [`crate::events::controls`] drive attach, detach, and input routing.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::error::ControlsError;
use crate::resources::actionmap::InputRouter;
use crate::resources::input::InputBinding;

const DEFAULT_SPEED: f32 = 20.0;

/// One of the four directional inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in binding order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Capability view of an entity that can be moved by a controller.
///
/// Controllers only write through this trait; they never read back.
pub trait Movable {
    fn set_velocity_x(&mut self, vx: f32);
    fn set_velocity_y(&mut self, vy: f32);
    /// Mirror the owner horizontally. Owners without an orientation ignore it.
    fn set_facing_flipped(&mut self, _flipped: bool) {}
}

/// Owner view over the components a controlled entity exposes.
pub struct ControlledOwner<'a> {
    pub body: &'a mut RigidBody,
    pub sprite: Option<&'a mut Sprite>,
}

impl Movable for ControlledOwner<'_> {
    fn set_velocity_x(&mut self, vx: f32) {
        self.body.set_velocity_x(vx);
    }

    fn set_velocity_y(&mut self, vy: f32) {
        self.body.set_velocity_y(vy);
    }

    fn set_facing_flipped(&mut self, flipped: bool) {
        if let Some(sprite) = self.sprite.as_deref_mut() {
            sprite.flip_h = flipped;
        }
    }
}

/// Options recognized by [`MovementControls`].
#[derive(Debug, Clone, PartialEq)]
pub struct MovementControlsConfig {
    pub up_binding: InputBinding,
    pub down_binding: InputBinding,
    pub left_binding: InputBinding,
    pub right_binding: InputBinding,
    pub vertical_speed: f32,
    pub horizontal_speed: f32,
    /// Push a facing flag to the owner (`true` while net horizontal intent is negative).
    pub flip_facing: bool,
}

impl Default for MovementControlsConfig {
    fn default() -> Self {
        Self {
            up_binding: InputBinding::keyboard("up"),
            down_binding: InputBinding::keyboard("down"),
            left_binding: InputBinding::keyboard("left"),
            right_binding: InputBinding::keyboard("right"),
            vertical_speed: DEFAULT_SPEED,
            horizontal_speed: DEFAULT_SPEED,
            flip_facing: false,
        }
    }
}

impl MovementControlsConfig {
    /// Reject speeds that would poison the velocity (NaN or infinite).
    ///
    /// Negative speeds are allowed and invert the axis.
    pub fn validate(&self) -> Result<(), ControlsError> {
        if !self.vertical_speed.is_finite() {
            return Err(ControlsError::InvalidSpeed {
                axis: "vertical",
                value: self.vertical_speed,
            });
        }
        if !self.horizontal_speed.is_finite() {
            return Err(ControlsError::InvalidSpeed {
                axis: "horizontal",
                value: self.horizontal_speed,
            });
        }
        Ok(())
    }

    /// Binding configured for a direction.
    pub fn binding(&self, direction: Direction) -> &InputBinding {
        match direction {
            Direction::Up => &self.up_binding,
            Direction::Down => &self.down_binding,
            Direction::Left => &self.left_binding,
            Direction::Right => &self.right_binding,
        }
    }
}

/// Directional input accumulator driving an owner's velocity.
///
/// Intensities are private so every change goes through a mutator, which
/// keeps the owner's velocity equal to the derived value after each call.
#[derive(Component, Clone, Debug)]
pub struct MovementControls {
    up: f32,
    down: f32,
    left: f32,
    right: f32,
    /// Speed applied to net vertical intent.
    pub vertical_speed: f32,
    /// Speed applied to net horizontal intent.
    pub horizontal_speed: f32,
    /// Whether the facing flag is pushed to the owner.
    pub flip_facing: bool,
    bindings: [InputBinding; 4],
    bound: ArrayVec<(InputBinding, Direction), 4>,
    attached_to: Option<Entity>,
    active: bool,
}

impl Default for MovementControls {
    fn default() -> Self {
        Self::new(MovementControlsConfig::default())
    }
}

impl MovementControls {
    /// Build a controller from an already validated config.
    pub fn new(config: MovementControlsConfig) -> Self {
        let MovementControlsConfig {
            up_binding,
            down_binding,
            left_binding,
            right_binding,
            vertical_speed,
            horizontal_speed,
            flip_facing,
        } = config;
        Self {
            up: 0.0,
            down: 0.0,
            left: 0.0,
            right: 0.0,
            vertical_speed,
            horizontal_speed,
            flip_facing,
            bindings: [up_binding, down_binding, left_binding, right_binding],
            bound: ArrayVec::new(),
            attached_to: None,
            active: false,
        }
    }

    /// Validate `config` and build a controller from it.
    pub fn from_config(config: &MovementControlsConfig) -> Result<Self, ControlsError> {
        config.validate()?;
        Ok(Self::new(config.clone()))
    }

    /// Register the four bindings with `router`, routing them to `target`.
    ///
    /// Returns the number of bindings registered. Without a router nothing is
    /// registered, the intensities reset and `Ok(0)` is returned; routes held
    /// from an earlier attach are kept so a later detach can release them.
    /// Without an owner the attach fails before anything is registered.
    pub fn attach(
        &mut self,
        target: Entity,
        router: Option<&mut dyn InputRouter>,
        owner: Option<&mut dyn Movable>,
    ) -> Result<usize, ControlsError> {
        let Some(owner) = owner else {
            return Err(ControlsError::MissingOwner);
        };
        let Some(router) = router else {
            self.reset();
            self.update_movement(owner);
            return Ok(0);
        };

        // Re-attaching replaces the previous registration.
        self.release(router);
        self.reset();

        for (binding, direction) in self.bindings.iter().zip(Direction::ALL) {
            router.bind(binding, direction, target);
            self.bound.push((binding.clone(), direction));
        }
        self.attached_to = Some(target);
        self.active = true;
        self.update_movement(owner);
        Ok(self.bound.len())
    }

    /// Unregister every bound input and reset the intensities.
    ///
    /// Safe to call any number of times, with or without a router. Without a
    /// router the controller only goes inactive and keeps its routes for the
    /// next detach or attach that has one. When an owner is given it receives
    /// the reset (zero) velocity.
    pub fn detach(&mut self, router: Option<&mut dyn InputRouter>, owner: Option<&mut dyn Movable>) {
        if let Some(router) = router {
            self.release(router);
        }
        self.active = false;
        self.reset();
        if let Some(owner) = owner {
            self.update_movement(owner);
        }
    }

    pub fn set_up<M: Movable + ?Sized>(&mut self, value: f32, owner: &mut M) {
        self.up = value;
        self.update_movement(owner);
    }

    pub fn set_down<M: Movable + ?Sized>(&mut self, value: f32, owner: &mut M) {
        self.down = value;
        self.update_movement(owner);
    }

    pub fn set_left<M: Movable + ?Sized>(&mut self, value: f32, owner: &mut M) {
        self.left = value;
        self.update_movement(owner);
    }

    pub fn set_right<M: Movable + ?Sized>(&mut self, value: f32, owner: &mut M) {
        self.right = value;
        self.update_movement(owner);
    }

    /// Dispatch to the mutator for `direction`.
    pub fn set<M: Movable + ?Sized>(&mut self, direction: Direction, value: f32, owner: &mut M) {
        match direction {
            Direction::Up => self.set_up(value, owner),
            Direction::Down => self.set_down(value, owner),
            Direction::Left => self.set_left(value, owner),
            Direction::Right => self.set_right(value, owner),
        }
    }

    /// Current intensity of a direction.
    pub fn intensity(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Velocity derived from the current intensities.
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(
            (self.right - self.left) * self.horizontal_speed,
            (self.up - self.down) * self.vertical_speed,
        )
    }

    /// `true` exactly when net horizontal intent is negative.
    pub fn facing_left(&self) -> bool {
        self.right - self.left < 0.0
    }

    /// Number of bindings currently registered with a router.
    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// Bindings currently registered, with their directions.
    pub fn bound(&self) -> &[(InputBinding, Direction)] {
        &self.bound
    }

    /// Whether routed input should reach this controller.
    ///
    /// Set by a successful attach, cleared by any detach.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Entity the bindings route to, if attached.
    pub fn attached_to(&self) -> Option<Entity> {
        self.attached_to
    }

    /// Binding configured for a direction.
    pub fn binding(&self, direction: Direction) -> &InputBinding {
        &self.bindings[direction as usize]
    }

    fn release(&mut self, router: &mut dyn InputRouter) {
        if let Some(target) = self.attached_to.take() {
            for (binding, _) in self.bound.drain(..) {
                router.unbind(&binding, target);
            }
        }
        self.bound.clear();
    }

    fn reset(&mut self) {
        self.up = 0.0;
        self.down = 0.0;
        self.left = 0.0;
        self.right = 0.0;
    }

    fn update_movement<M: Movable + ?Sized>(&self, owner: &mut M) {
        let velocity = self.velocity();
        if self.flip_facing {
            owner.set_facing_flipped(self.facing_left());
        }
        owner.set_velocity_x(velocity.x);
        owner.set_velocity_y(velocity.y);
    }
}
