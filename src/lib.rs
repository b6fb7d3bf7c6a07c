//! Rein 2D
//!
//! A 2D rigid-body collision engine: separating-axis collision detection for
//! circles and convex polygons, impulse-based response with rotation and
//! Coulomb friction, and positional correction.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **physics::geometry** - Projections, edge normals, interval overlap
//! 2. **physics::narrowphase** - Collision manifolds for shape pairs
//! 3. **physics::solver** - Impulse resolution and positional correction
//! 4. **physics** - Body storage and the stepping world
//! 5. **ecs** - hecs integration (feature = "ecs")

pub mod error;
pub mod physics;

#[cfg(feature = "ecs")]
pub mod ecs;

// Re-export commonly used types
pub use error::PhysicsError;

pub use physics::body_set::{BodyHandle, BodySet, BodyStore};
pub use physics::collider::Shape;
pub use physics::contact::Manifold;
pub use physics::narrowphase::{detect_collision, detect_collision_with_epsilon};
pub use physics::rigid_body::{RigidBody, RigidBodyType, SurfaceMaterial};
pub use physics::solver::PositionCorrection;
pub use physics::{ContactPair, PhysicsConfig, PhysicsWorld};

#[cfg(feature = "ecs")]
pub use ecs::spawn_body;

// Re-export glam for convenience
pub use glam;
