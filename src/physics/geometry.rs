//! Separating axis primitives: projections, edge normals and interval overlap.

use glam::Vec2;

/// Squared edge length below which an edge is treated as degenerate.
const DEGENERATE_EDGE_SQ: f32 = 1e-12;

/// Iterate over the edges of a closed polygon as `(current, next)` pairs.
pub fn edges(vertices: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Project all vertices onto `axis` and return the `(min, max)` interval.
///
/// The axis does not need to be normalized, but intervals are only comparable
/// between projections onto the same axis.
///
/// # Panics
///
/// Panics if `vertices` is empty.
pub fn project_onto_axis(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    assert!(!vertices.is_empty(), "cannot project an empty vertex set");

    let first = axis.dot(vertices[0]);
    vertices[1..].iter().fold((first, first), |(min, max), v| {
        let p = axis.dot(*v);
        (min.min(p), max.max(p))
    })
}

/// Project a circle onto a unit `axis`.
#[inline]
pub fn project_circle_onto_axis(center: Vec2, radius: f32, axis: Vec2) -> (f32, f32) {
    let c = axis.dot(center);
    (c - radius, c + radius)
}

/// Unit normal of the edge `current -> next`, or `None` for a zero-length edge.
///
/// The normal is the perpendicular `(-edge.y, edge.x)`; whether it points
/// outward depends on the polygon winding.
#[inline]
pub fn edge_axis(current: Vec2, next: Vec2) -> Option<Vec2> {
    let edge = next - current;
    let len_sq = edge.length_squared();
    if len_sq < DEGENERATE_EDGE_SQ {
        return None;
    }
    Some(edge.perp() / len_sq.sqrt())
}

/// One unit normal per non-degenerate polygon edge, in edge order.
pub fn edge_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    edges(vertices)
        .filter_map(|(current, next)| edge_axis(current, next))
        .collect()
}

/// True if the projections of both vertex sets onto `axis` intersect.
///
/// Touching intervals count as overlapping.
pub fn overlap_on_axis(vertices_a: &[Vec2], vertices_b: &[Vec2], axis: Vec2) -> bool {
    let (min_a, max_a) = project_onto_axis(vertices_a, axis);
    let (min_b, max_b) = project_onto_axis(vertices_b, axis);
    max_a >= min_b && max_b >= min_a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: Vec2, size: f32) -> Vec<Vec2> {
        vec![
            min,
            min + Vec2::new(size, 0.0),
            min + Vec2::new(size, size),
            min + Vec2::new(0.0, size),
        ]
    }

    #[test]
    fn test_project_polygon() {
        let verts = square(Vec2::new(1.0, -1.0), 2.0);
        let (min, max) = project_onto_axis(&verts, Vec2::X);
        assert_eq!((min, max), (1.0, 3.0));

        // Unnormalized axis scales the interval
        let (min, max) = project_onto_axis(&verts, Vec2::new(0.0, 2.0));
        assert_eq!((min, max), (-2.0, 2.0));
    }

    #[test]
    #[should_panic]
    fn test_project_empty_panics() {
        project_onto_axis(&[], Vec2::X);
    }

    #[test]
    fn test_project_circle() {
        let (min, max) = project_circle_onto_axis(Vec2::new(3.0, 4.0), 1.5, Vec2::Y);
        assert_eq!((min, max), (2.5, 5.5));
    }

    #[test]
    fn test_edge_normals_unit_and_ordered() {
        let verts = square(Vec2::ZERO, 2.0);
        let normals = edge_normals(&verts);
        assert_eq!(normals.len(), 4);

        let eps = 1e-6;
        assert!((normals[0] - Vec2::Y).length() < eps);
        assert!((normals[1] - Vec2::NEG_X).length() < eps);
        assert!((normals[2] - Vec2::NEG_Y).length() < eps);
        assert!((normals[3] - Vec2::X).length() < eps);
        for n in normals {
            assert!((n.length() - 1.0).abs() < eps);
        }
    }

    #[test]
    fn test_edge_normals_skip_degenerate_edge() {
        let verts = vec![
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(edge_normals(&verts).len(), 3);
        assert!(edge_axis(Vec2::ONE, Vec2::ONE).is_none());
    }

    #[test]
    fn test_overlap_on_axis() {
        let a = square(Vec2::ZERO, 2.0);
        let b = square(Vec2::new(3.0, 0.0), 2.0);
        let c = square(Vec2::new(1.0, 0.0), 2.0);
        let touching = square(Vec2::new(2.0, 0.0), 2.0);

        assert!(!overlap_on_axis(&a, &b, Vec2::X));
        assert!(overlap_on_axis(&a, &b, Vec2::Y));
        assert!(overlap_on_axis(&a, &c, Vec2::X));
        assert!(overlap_on_axis(&a, &touching, Vec2::X));
    }
}
