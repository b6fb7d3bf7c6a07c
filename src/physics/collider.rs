//! Collider shapes and their mass properties.

use glam::{Affine2, Vec2};

use crate::error::PhysicsError;

/// Collider shape, defined in body-local space around the center of mass.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        radius: f32,
    },
    /// Convex polygon with at least three vertices in a consistent winding.
    /// Boxes are polygons with four vertices.
    Polygon {
        vertices: Vec<Vec2>,
    },
}

impl Shape {
    /// Create a circle. The radius must be finite and non-negative.
    pub fn circle(radius: f32) -> Result<Self, PhysicsError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(PhysicsError::InvalidRadius(radius));
        }
        Ok(Shape::Circle { radius })
    }

    /// Create a convex polygon from local-space vertices.
    ///
    /// The local origin is the body's center of mass: inertia and contact
    /// lever arms are measured from it, so vertices should be given relative
    /// to the polygon's centroid.
    pub fn polygon(vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        if vertices.len() < 3 {
            return Err(PhysicsError::TooFewVertices(vertices.len()));
        }
        Ok(Shape::Polygon { vertices })
    }

    /// Create a box centered on the origin, vertices in counter-clockwise order.
    pub fn rectangle(width: f32, height: f32) -> Result<Self, PhysicsError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PhysicsError::InvalidDimensions { width, height });
        }
        let hw = width * 0.5;
        let hh = height * 0.5;
        Ok(Shape::Polygon {
            vertices: vec![
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
        })
    }

    pub fn area(&self) -> f32 {
        match self {
            Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
            Shape::Polygon { vertices } => {
                let twice_area: f32 = super::geometry::edges(vertices)
                    .map(|(a, b)| a.perp_dot(b))
                    .sum();
                twice_area.abs() * 0.5
            }
        }
    }

    /// Moment of inertia about the local origin for the given mass.
    ///
    /// Polygons are split into a triangle fan around the origin; for a
    /// centered `w x h` box this gives `m (w² + h²) / 12`.
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        match self {
            Shape::Circle { radius } => 0.5 * mass * radius * radius,
            Shape::Polygon { vertices } => {
                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for (a, b) in super::geometry::edges(vertices) {
                    let cross = a.perp_dot(b).abs();
                    numerator += cross * (a.dot(a) + a.dot(b) + b.dot(b));
                    denominator += cross;
                }
                if denominator <= f32::EPSILON {
                    return 0.0;
                }
                mass / 6.0 * numerator / denominator
            }
        }
    }

    /// Polygon vertices in world space. Circles have no vertices.
    pub fn world_vertices(&self, transform: &Affine2) -> Vec<Vec2> {
        match self {
            Shape::Circle { .. } => Vec::new(),
            Shape::Polygon { vertices } => vertices
                .iter()
                .map(|v| transform.transform_point2(*v))
                .collect(),
        }
    }
}
