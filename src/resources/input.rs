//! Input binding descriptors.
//!
//! An [`InputBinding`] names one physical input as a `(device, event)` pair,
//! written in text form as two words, for example `"keyboard up"` or
//! `"joystick0 xaxis"`. Bindings are the keys of the
//! [`ActionMap`](crate::resources::actionmap::ActionMap) router and the values
//! of [`MovementControlsConfig`](crate::components::movementcontrols::MovementControlsConfig).
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ControlsError;

/// Physical device an input event comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDevice {
    Keyboard,
    Mouse(u8),
    Joystick(u8),
    Gamepad(u8),
}

impl InputDevice {
    /// Whether events of this device are digital keys (0.0 or 1.0 only).
    pub fn is_keyboard(&self) -> bool {
        matches!(self, InputDevice::Keyboard)
    }
}

impl fmt::Display for InputDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputDevice::Keyboard => write!(f, "keyboard"),
            InputDevice::Mouse(n) => write!(f, "mouse{}", n),
            InputDevice::Joystick(n) => write!(f, "joystick{}", n),
            InputDevice::Gamepad(n) => write!(f, "gamepad{}", n),
        }
    }
}

impl FromStr for InputDevice {
    type Err = ControlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.to_ascii_lowercase();
        if word == "keyboard" {
            return Ok(InputDevice::Keyboard);
        }
        // Indexed devices accept an optional numeric suffix: "mouse", "mouse1"
        let indexed: [(&str, fn(u8) -> InputDevice); 3] = [
            ("mouse", InputDevice::Mouse),
            ("joystick", InputDevice::Joystick),
            ("gamepad", InputDevice::Gamepad),
        ];
        for (prefix, make) in indexed {
            if let Some(rest) = word.strip_prefix(prefix) {
                if rest.is_empty() {
                    return Ok(make(0));
                }
                return rest
                    .parse::<u8>()
                    .map(make)
                    .map_err(|_| ControlsError::InvalidBinding(s.to_string()));
            }
        }
        Err(ControlsError::InvalidBinding(s.to_string()))
    }
}

/// A `(device, event)` pair identifying one bindable input.
///
/// Event names are stored lower-cased so `"keyboard UP"` and `"keyboard up"`
/// name the same binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InputBinding {
    pub device: InputDevice,
    pub event: String,
}

impl InputBinding {
    pub fn new(device: InputDevice, event: impl Into<String>) -> Self {
        Self {
            device,
            event: event.into().to_ascii_lowercase(),
        }
    }

    /// Shorthand for a keyboard key binding.
    pub fn keyboard(event: impl Into<String>) -> Self {
        Self::new(InputDevice::Keyboard, event)
    }
}

impl fmt::Display for InputBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.device, self.event)
    }
}

impl FromStr for InputBinding {
    type Err = ControlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let (Some(device), Some(event), None) = (words.next(), words.next(), words.next()) else {
            return Err(ControlsError::InvalidBinding(s.to_string()));
        };
        let device = device
            .parse::<InputDevice>()
            .map_err(|_| ControlsError::InvalidBinding(s.to_string()))?;
        Ok(InputBinding::new(device, event))
    }
}

impl TryFrom<String> for InputBinding {
    type Error = ControlsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InputBinding> for String {
    fn from(binding: InputBinding) -> Self {
        binding.to_string()
    }
}
