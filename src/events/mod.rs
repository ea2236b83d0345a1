//! Event types and observers used by the engine.
//!
//! Events provide a decoupled way for input sources, hosts, and controllers
//! to communicate.
//!
//! Submodules:
//! - [`controls`] – attach/detach requests for movement controls
//! - [`input`] – input intensity changes delivered by input sources
pub mod controls;
pub mod input;
