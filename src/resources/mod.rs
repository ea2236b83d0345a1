//! ECS resources made available to systems, and the data they are built from.
//!
//! Overview
//! - `actionmap` – input router mapping bindings to controlled entities
//! - `gameconfig` – INI-backed window and controls settings
//! - `input` – `(device, event)` binding descriptors
//! - `inputscript` – scripted input for headless runs
//! - `worldtime` – simulation time and delta
pub mod actionmap;
pub mod gameconfig;
pub mod input;
pub mod inputscript;
pub mod worldtime;
