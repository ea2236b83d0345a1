//! Input systems.
//!
//! - [`replay_input`] triggers the
//!   [`InputEvent`](crate::events::input::InputEvent)s an [`InputScript`] holds
//!   for a frame.
//! - [`poll_keyboard`] (feature `raylib`) reads hardware keys from Raylib and
//!   triggers press/release events for every keyboard binding present in the
//!   [`ActionMap`](crate::resources::actionmap::ActionMap).
use bevy_ecs::prelude::*;

use crate::resources::inputscript::InputScript;

/// Trigger the scripted input changes of `frame`.
///
/// Observers run immediately, so controllers have their new velocity when
/// this returns.
pub fn replay_input(world: &mut World, script: &InputScript, frame: u32) {
    for event in script.events_for(frame) {
        world.trigger(event);
    }
    world.flush();
}

#[cfg(feature = "raylib")]
pub use keyboard::{keyboard_key, poll_keyboard};

#[cfg(feature = "raylib")]
mod keyboard {
    use bevy_ecs::prelude::*;
    use raylib::ffi::KeyboardKey;

    use crate::events::input::InputEvent;
    use crate::resources::actionmap::ActionMap;

    /// Map a keyboard event name to a Raylib key.
    pub fn keyboard_key(event: &str) -> Option<KeyboardKey> {
        let key = match event {
            "up" => KeyboardKey::KEY_UP,
            "down" => KeyboardKey::KEY_DOWN,
            "left" => KeyboardKey::KEY_LEFT,
            "right" => KeyboardKey::KEY_RIGHT,
            "space" => KeyboardKey::KEY_SPACE,
            "enter" | "return" => KeyboardKey::KEY_ENTER,
            "escape" => KeyboardKey::KEY_ESCAPE,
            "w" => KeyboardKey::KEY_W,
            "a" => KeyboardKey::KEY_A,
            "s" => KeyboardKey::KEY_S,
            "d" => KeyboardKey::KEY_D,
            "q" => KeyboardKey::KEY_Q,
            "e" => KeyboardKey::KEY_E,
            "i" => KeyboardKey::KEY_I,
            "j" => KeyboardKey::KEY_J,
            "k" => KeyboardKey::KEY_K,
            "l" => KeyboardKey::KEY_L,
            _ => return None,
        };
        Some(key)
    }

    /// Poll Raylib for bound keys and trigger input events on change.
    pub fn poll_keyboard(
        rl: NonSend<raylib::RaylibHandle>,
        action_map: Option<Res<ActionMap>>,
        mut commands: Commands,
    ) {
        let Some(action_map) = action_map else {
            return;
        };
        for binding in action_map.bindings() {
            if !binding.device.is_keyboard() {
                continue;
            }
            let Some(key) = keyboard_key(&binding.event) else {
                continue;
            };
            if rl.is_key_pressed(key) {
                commands.trigger(InputEvent::pressed(binding.clone()));
            }
            if rl.is_key_released(key) {
                commands.trigger(InputEvent::released(binding.clone()));
            }
        }
    }
}
