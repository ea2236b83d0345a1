//! Error types for movement controls and configuration.
//!
//! - [`ControlsError`] – failures attaching or configuring a
//!   [`MovementControls`](crate::components::movementcontrols::MovementControls)
//! - [`ConfigError`] – failures loading or saving configuration and input scripts

use thiserror::Error;

/// Errors raised by the movement controls component and its configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlsError {
    /// The owner has no velocity capability (no `RigidBody` on the entity).
    #[error("movement controls have no owner with a velocity to drive")]
    MissingOwner,
    /// A binding descriptor could not be parsed as `"<device> <event>"`.
    #[error("invalid input binding: {0:?}")]
    InvalidBinding(String),
    /// A configured speed is NaN or infinite.
    #[error("invalid {axis} speed: {value}")]
    InvalidSpeed { axis: &'static str, value: f32 },
}

/// Errors raised while reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Load(String),
    #[error("failed to save config file: {0}")]
    Save(String),
    #[error(transparent)]
    Controls(#[from] ControlsError),
    #[error("invalid input script: {0}")]
    Script(String),
}
