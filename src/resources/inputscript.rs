//! Scripted input replay.
//!
//! An [`InputScript`] is a JSON list of input changes keyed by frame number.
//! The headless runner feeds it through
//! [`replay_input`](crate::systems::input::replay_input) so scenes can be
//! driven without a window or keyboard.
//!
//! ```json
//! {
//!   "steps": [
//!     { "frame": 0,  "binding": "keyboard right", "value": 1.0 },
//!     { "frame": 30, "binding": "keyboard right", "value": 0.0 }
//!   ]
//! }
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::events::input::InputEvent;
use crate::resources::input::InputBinding;

/// One input change at a given frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputStep {
    pub frame: u32,
    pub binding: InputBinding,
    pub value: f32,
}

/// Ordered list of input changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub steps: Vec<InputStep>,
}

impl InputScript {
    /// Parse a script from JSON text. Steps are sorted by frame, keeping the
    /// file order within a frame.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut script: InputScript =
            serde_json::from_str(text).map_err(|e| ConfigError::Script(e.to_string()))?;
        script.steps.sort_by_key(|s| s.frame);
        Ok(script)
    }

    /// Read and parse a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Script(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    /// Input events scheduled for `frame`, in script order.
    pub fn events_for(&self, frame: u32) -> impl Iterator<Item = InputEvent> + '_ {
        self.steps
            .iter()
            .filter(move |s| s.frame == frame)
            .map(|s| InputEvent::new(s.binding.clone(), s.value))
    }

    /// Frame of the last step, if any.
    pub fn last_frame(&self) -> Option<u32> {
        self.steps.iter().map(|s| s.frame).max()
    }
}
