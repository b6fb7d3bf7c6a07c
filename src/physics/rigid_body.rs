//! Rigid body state and integration.

use glam::{Affine2, Vec2};

use crate::error::PhysicsError;

use super::collider::Shape;
use super::solver::ContactBody;

/// Rigid body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigidBodyType {
    /// Integrated every step and moved by collisions.
    Dynamic,
    /// Immovable. Never integrated; infinite mass and inertia.
    Static,
}

/// Friction properties of a body surface.
///
/// Each body carries its own coefficients; a contact uses the average of both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterial {
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            static_friction: 0.6,
            dynamic_friction: 0.4,
        }
    }
}

impl SurfaceMaterial {
    /// Frictionless surface.
    pub const FRICTIONLESS: Self = Self {
        static_friction: 0.0,
        dynamic_friction: 0.0,
    };

    /// Static friction coefficient between this material and another.
    #[inline]
    pub fn static_friction_with(&self, other: &Self) -> f32 {
        (self.static_friction + other.static_friction) * 0.5
    }

    /// Dynamic friction coefficient between this material and another.
    #[inline]
    pub fn dynamic_friction_with(&self, other: &Self) -> f32 {
        (self.dynamic_friction + other.dynamic_friction) * 0.5
    }
}

/// A 2D rigid body.
///
/// `inv_mass` and `inv_inertia` are never negative. A value of 0 makes the body
/// immovable along that degree of freedom, so static bodies need no special
/// casing in the solver.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub body_type: RigidBodyType,
    pub shape: Shape,
    /// Center of mass in world space.
    pub position: Vec2,
    /// Rotation in radians.
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub linear_acceleration: Vec2,
    pub angular_acceleration: f32,
    pub inv_mass: f32,
    pub inv_inertia: f32,
    pub material: SurfaceMaterial,
}

impl RigidBody {
    /// Create a dynamic body. Inertia is derived from the shape and mass.
    pub fn new_dynamic(shape: Shape, position: Vec2, mass: f32) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }

        let inertia = shape.moment_of_inertia(mass);
        let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };

        Ok(Self::with_inverse_mass(
            RigidBodyType::Dynamic,
            shape,
            position,
            1.0 / mass,
            inv_inertia,
        ))
    }

    /// Create a static body.
    pub fn new_static(shape: Shape, position: Vec2) -> Self {
        Self::with_inverse_mass(RigidBodyType::Static, shape, position, 0.0, 0.0)
    }

    fn with_inverse_mass(
        body_type: RigidBodyType,
        shape: Shape,
        position: Vec2,
        inv_mass: f32,
        inv_inertia: f32,
    ) -> Self {
        Self {
            body_type,
            shape,
            position,
            orientation: 0.0,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            linear_acceleration: Vec2::ZERO,
            angular_acceleration: 0.0,
            inv_mass,
            inv_inertia,
            material: SurfaceMaterial::default(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_orientation(mut self, orientation: f32) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.linear_acceleration = acceleration;
        self
    }

    pub fn with_angular_acceleration(mut self, angular_acceleration: f32) -> Self {
        self.angular_acceleration = angular_acceleration;
        self
    }

    pub fn with_material(mut self, material: SurfaceMaterial) -> Self {
        self.material = material;
        self
    }

    /// Lock rotation: collisions no longer change the angular velocity.
    pub fn with_fixed_rotation(mut self) -> Self {
        self.inv_inertia = 0.0;
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.body_type == RigidBodyType::Static
    }

    pub fn mass(&self) -> f32 {
        if self.inv_mass > 0.0 {
            1.0 / self.inv_mass
        } else {
            f32::INFINITY
        }
    }

    /// World transform, `translate(position) * rotate(orientation)`.
    ///
    /// Built from the current fields, so direct edits to `position` or
    /// `orientation` are seen by the next collision test.
    #[inline]
    pub fn transform(&self) -> Affine2 {
        Affine2::from_angle_translation(self.orientation, self.position)
    }

    /// Borrow the state the impulse solver reads and writes.
    pub fn contact_body(&mut self) -> ContactBody<'_> {
        ContactBody {
            center: self.position,
            linear_velocity: &mut self.linear_velocity,
            angular_velocity: &mut self.angular_velocity,
            inv_mass: self.inv_mass,
            inv_inertia: self.inv_inertia,
            material: self.material,
        }
    }

    /// Advance the body by `dt` seconds.
    ///
    /// Position and orientation move with the current velocities, then the
    /// velocities decay by `damping^dt` and pick up the accelerations.
    /// Static bodies are left untouched.
    pub fn integrate(&mut self, dt: f32, damping: f32, gravity: Vec2) {
        if self.is_static() {
            return;
        }

        self.position += self.linear_velocity * dt;
        self.orientation += self.angular_velocity * dt;

        let decay = damping.powf(dt);
        self.linear_velocity =
            self.linear_velocity * decay + (self.linear_acceleration + gravity) * dt;
        self.angular_velocity = self.angular_velocity * decay + self.angular_acceleration * dt;
    }
}
