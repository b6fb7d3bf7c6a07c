//! Contact data structures and contact point selection.

use glam::Vec2;

use super::geometry::edges;

/// Collision contact between two shapes, produced by the narrowphase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    /// Contact normal (unit length, from shape A to shape B).
    pub normal: Vec2,
    /// Penetration depth along the normal.
    pub penetration: f32,
    /// Contact points in world space. Only the first `contact_count` are valid.
    pub contacts: [Vec2; 2],
    /// Number of valid contact points (1 or 2).
    pub contact_count: usize,
}

impl Manifold {
    /// Manifold with a single contact point.
    pub fn single(normal: Vec2, penetration: f32, point: Vec2) -> Self {
        Self {
            normal,
            penetration,
            contacts: [point, Vec2::ZERO],
            contact_count: 1,
        }
    }

    /// The valid contact points.
    #[inline]
    pub fn contact_points(&self) -> &[Vec2] {
        &self.contacts[..self.contact_count]
    }

    /// The same contact seen from the other shape: the normal is reversed.
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// Closest point on a segment and its squared distance to the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    pub point: Vec2,
    pub distance_squared: f32,
}

/// One or two contact points between two polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoints {
    pub contact1: Vec2,
    pub contact2: Vec2,
    pub count: usize,
}

/// Closest point to `p` on the segment `a..b`.
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> ClosestPoint {
    let ab = b - a;
    let ab_len_sq = ab.length_squared();
    if ab_len_sq <= f32::EPSILON {
        return ClosestPoint {
            point: a,
            distance_squared: p.distance_squared(a),
        };
    }

    let d = (p - a).dot(ab) / ab_len_sq;
    let point = if d <= 0.0 {
        a
    } else if d >= 1.0 {
        b
    } else {
        a + ab * d
    };

    ClosestPoint {
        point,
        distance_squared: p.distance_squared(point),
    }
}

/// Index of the vertex closest to `point`, or `None` for an empty slice.
pub fn closest_vertex(point: Vec2, vertices: &[Vec2]) -> Option<usize> {
    let mut result = None;
    let mut min_dist_sq = f32::MAX;
    for (i, v) in vertices.iter().enumerate() {
        let dist_sq = v.distance_squared(point);
        if dist_sq < min_dist_sq {
            min_dist_sq = dist_sq;
            result = Some(i);
        }
    }
    result
}

/// Point on circle A's circumference in the direction of `center_b`.
///
/// Coincident centers have no direction; A's center is returned.
pub fn contact_point_circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2) -> Vec2 {
    let dir = (center_b - center_a).normalize_or_zero();
    center_a + dir * radius_a
}

/// Closest point on the polygon boundary to the circle center.
pub fn contact_point_circle_polygon(circle_center: Vec2, vertices: &[Vec2]) -> Vec2 {
    let mut min_dist_sq = f32::MAX;
    let mut contact = Vec2::ZERO;

    for (va, vb) in edges(vertices) {
        let closest = point_segment_distance(circle_center, va, vb);
        if closest.distance_squared < min_dist_sq {
            min_dist_sq = closest.distance_squared;
            contact = closest.point;
        }
    }
    contact
}

/// Contact points between two overlapping polygons.
///
/// Every vertex of each polygon is projected onto every edge of the other.
/// The globally closest projection becomes `contact1`. A second projection at
/// the same distance (within `epsilon`) that is not the same point becomes
/// `contact2`; this yields two points for flush edge-edge contact.
pub fn contact_points_polygon_polygon(
    vertices_a: &[Vec2],
    vertices_b: &[Vec2],
    epsilon: f32,
) -> ContactPoints {
    let mut result = ContactPoints {
        contact1: Vec2::ZERO,
        contact2: Vec2::ZERO,
        count: 0,
    };
    let mut min_dist_sq = f32::MAX;

    let mut visit = |points: &[Vec2], edge_owner: &[Vec2]| {
        for &p in points {
            for (va, vb) in edges(edge_owner) {
                let closest = point_segment_distance(p, va, vb);

                if nearly_equal(closest.distance_squared, min_dist_sq, epsilon) {
                    if !nearly_equal_points(closest.point, result.contact1, epsilon) {
                        result.contact2 = closest.point;
                        result.count = 2;
                    }
                } else if closest.distance_squared < min_dist_sq {
                    min_dist_sq = closest.distance_squared;
                    result.contact1 = closest.point;
                    result.count = 1;
                }
            }
        }
    };

    visit(vertices_a, vertices_b);
    visit(vertices_b, vertices_a);

    result
}

#[inline]
fn nearly_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

#[inline]
fn nearly_equal_points(a: Vec2, b: Vec2, epsilon: f32) -> bool {
    a.distance_squared(b) < epsilon * epsilon
}
