//! Aberred controls library.
//!
//! This module exposes the ECS components, resources, systems, and events
//! that bind directional input to entity movement, for use by the demo
//! binary, integration tests, and host games.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
