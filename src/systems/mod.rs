//! Engine systems.
//!
//! Submodules overview
//! - [`controls`] – attach new movement controls, route input, drop stale routes
//! - [`input`] – feed scripted or hardware input as events
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`time`] – update simulation time and delta

pub mod controls;
pub mod input;
pub mod movement;
pub mod time;
