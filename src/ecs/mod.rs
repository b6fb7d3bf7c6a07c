//! hecs integration: step a [`hecs::World`] whose entities carry [`RigidBody`]
//! components.
//!
//! [`RigidBody`]: crate::physics::rigid_body::RigidBody

pub mod bridge;

pub use bridge::spawn_body;
