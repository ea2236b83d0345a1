//! ECS components for entities.
//!
//! Submodules overview:
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`movementcontrols`] – input-driven directional movement and the owner capability
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`sprite`] – 2D sprite size and orientation

pub mod mapposition;
pub mod movementcontrols;
pub mod rigidbody;
pub mod sprite;
