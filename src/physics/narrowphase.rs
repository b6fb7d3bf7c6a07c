//! Narrowphase collision detection: separating axis tests and manifold building.

use glam::{Affine2, Vec2};

use super::collider::Shape;
use super::contact::{
    closest_vertex, contact_point_circle_circle, contact_point_circle_polygon,
    contact_points_polygon_polygon, Manifold,
};
use super::geometry::{edge_axis, edges, project_circle_onto_axis, project_onto_axis};
use super::rigid_body::RigidBody;

/// Default tolerance for merging polygon contact points.
///
/// Compared against squared distances, so it depends on the scene scale.
pub const DEFAULT_CONTACT_EPSILON: f32 = 0.0005;

/// Minimum-overlap axis search shared by the SAT tests.
#[derive(Debug, Clone, Copy)]
struct AxisSearch {
    normal: Vec2,
    penetration: f32,
}

impl AxisSearch {
    fn new() -> Self {
        Self {
            normal: Vec2::ZERO,
            penetration: f32::MAX,
        }
    }

    /// Record an axis. Returns false if the projections are separated on it.
    fn test(
        &mut self,
        axis: Vec2,
        (min_a, max_a): (f32, f32),
        (min_b, max_b): (f32, f32),
    ) -> bool {
        if min_a >= max_b || min_b >= max_a {
            return false;
        }

        let depth = (max_b - min_a).min(max_a - min_b);
        if depth < self.penetration {
            self.penetration = depth;
            self.normal = axis;
        }
        true
    }

    /// Normalize the best axis and orient it along `direction`.
    ///
    /// Returns `None` if no usable axis was recorded.
    fn finish(self, direction: Vec2) -> Option<(Vec2, f32)> {
        let len = self.normal.length();
        if len < 1e-6 {
            return None;
        }
        let mut normal = self.normal / len;
        let penetration = self.penetration / len;
        if direction.dot(normal) < 0.0 {
            normal = -normal;
        }
        Some((normal, penetration))
    }
}

/// Circle-circle test. The normal points from A to B.
pub fn circle_circle(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
) -> Option<Manifold> {
    let ab = center_b - center_a;
    let radii = radius_a + radius_b;

    let dist_sq = ab.length_squared();
    if dist_sq >= radii * radii {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers have no preferred direction
    let normal = if dist > 1e-6 { ab / dist } else { Vec2::Y };

    Some(Manifold::single(
        normal,
        radii - dist,
        contact_point_circle_circle(center_a, radius_a, center_b),
    ))
}

/// Circle-polygon SAT test. The normal points from the circle to the polygon.
///
/// Besides every polygon edge normal, the axis from the circle center to the
/// closest polygon vertex is tested so that corner contacts are separated.
pub fn circle_polygon(
    circle_center: Vec2,
    radius: f32,
    vertices: &[Vec2],
    polygon_center: Vec2,
) -> Option<Manifold> {
    assert!(!vertices.is_empty(), "polygon has no vertices");
    let mut search = AxisSearch::new();

    for (va, vb) in edges(vertices) {
        let Some(axis) = edge_axis(va, vb) else {
            continue;
        };
        let poly = project_onto_axis(vertices, axis);
        let circle = project_circle_onto_axis(circle_center, radius, axis);
        if !search.test(axis, poly, circle) {
            return None;
        }
    }

    let closest = closest_vertex(circle_center, vertices)?;
    let to_vertex = vertices[closest] - circle_center;
    if let Some(axis) = to_vertex.try_normalize() {
        let poly = project_onto_axis(vertices, axis);
        let circle = project_circle_onto_axis(circle_center, radius, axis);
        if !search.test(axis, poly, circle) {
            return None;
        }
    }

    let (normal, penetration) = search.finish(polygon_center - circle_center)?;

    Some(Manifold::single(
        normal,
        penetration,
        contact_point_circle_polygon(circle_center, vertices),
    ))
}

/// Polygon-polygon SAT test over the edge normals of both polygons.
/// The normal points from A to B.
pub fn polygon_polygon(
    vertices_a: &[Vec2],
    center_a: Vec2,
    vertices_b: &[Vec2],
    center_b: Vec2,
    contact_epsilon: f32,
) -> Option<Manifold> {
    assert!(
        !vertices_a.is_empty() && !vertices_b.is_empty(),
        "polygon has no vertices"
    );
    let mut search = AxisSearch::new();

    for owner in [vertices_a, vertices_b] {
        for (va, vb) in edges(owner) {
            let Some(axis) = edge_axis(va, vb) else {
                continue;
            };
            let proj_a = project_onto_axis(vertices_a, axis);
            let proj_b = project_onto_axis(vertices_b, axis);
            if !search.test(axis, proj_a, proj_b) {
                return None;
            }
        }
    }

    let (normal, penetration) = search.finish(center_b - center_a)?;
    let points = contact_points_polygon_polygon(vertices_a, vertices_b, contact_epsilon);

    Some(Manifold {
        normal,
        penetration,
        contacts: [points.contact1, points.contact2],
        contact_count: points.count.max(1),
    })
}

/// Detect collision between two shapes with the default contact tolerance.
pub fn detect_collision(
    shape_a: &Shape,
    transform_a: &Affine2,
    shape_b: &Shape,
    transform_b: &Affine2,
) -> Option<Manifold> {
    detect_collision_with_epsilon(
        shape_a,
        transform_a,
        shape_b,
        transform_b,
        DEFAULT_CONTACT_EPSILON,
    )
}

/// Detect collision between two shapes, dispatching on the shape pair.
///
/// The returned normal always points from shape A to shape B.
pub fn detect_collision_with_epsilon(
    shape_a: &Shape,
    transform_a: &Affine2,
    shape_b: &Shape,
    transform_b: &Affine2,
    contact_epsilon: f32,
) -> Option<Manifold> {
    let center_a = transform_a.translation;
    let center_b = transform_b.translation;

    match (shape_a, shape_b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(center_a, *ra, center_b, *rb)
        }
        (Shape::Circle { radius }, Shape::Polygon { .. }) => {
            let vertices = shape_b.world_vertices(transform_b);
            circle_polygon(center_a, *radius, &vertices, center_b)
        }
        (Shape::Polygon { .. }, Shape::Circle { radius }) => {
            let vertices = shape_a.world_vertices(transform_a);
            circle_polygon(center_b, *radius, &vertices, center_a).map(Manifold::flipped)
        }
        (Shape::Polygon { .. }, Shape::Polygon { .. }) => {
            let vertices_a = shape_a.world_vertices(transform_a);
            let vertices_b = shape_b.world_vertices(transform_b);
            polygon_polygon(&vertices_a, center_a, &vertices_b, center_b, contact_epsilon)
        }
    }
}

/// Detect collision between two rigid bodies at their current transforms.
pub fn detect_body_collision(
    body_a: &RigidBody,
    body_b: &RigidBody,
    contact_epsilon: f32,
) -> Option<Manifold> {
    detect_collision_with_epsilon(
        &body_a.shape,
        &body_a.transform(),
        &body_b.shape,
        &body_b.transform(),
        contact_epsilon,
    )
}
