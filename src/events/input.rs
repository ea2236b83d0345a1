//! Input events.
//!
//! This module defines [`InputEvent`], triggered by input sources whenever a
//! bound key or axis changes state. The
//! [`route_input_observer`](crate::systems::controls::route_input_observer)
//! forwards it to every controller the
//! [`ActionMap`](crate::resources::actionmap::ActionMap) routes the binding to.

use bevy_ecs::prelude::*;

use crate::resources::input::InputBinding;

/// Event emitted when an input changes intensity.
///
/// Digital keys report `1.0` on press and `0.0` on release. Analog axes
/// report whatever magnitude the device delivers.
#[derive(Event, Debug, Clone)]
pub struct InputEvent {
    /// The physical input that changed.
    pub binding: InputBinding,
    /// New intensity of the input.
    pub value: f32,
}

impl InputEvent {
    pub fn new(binding: InputBinding, value: f32) -> Self {
        Self { binding, value }
    }

    /// Key press: intensity `1.0`.
    pub fn pressed(binding: InputBinding) -> Self {
        Self::new(binding, 1.0)
    }

    /// Key release: intensity `0.0`.
    pub fn released(binding: InputBinding) -> Self {
        Self::new(binding, 0.0)
    }
}
