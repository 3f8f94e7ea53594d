//! Construction geometry
//!
//! Pure math for the construction engine: Euclidean distance and the
//! circle-circle intersection solver that generates new scene points.

use glam::Vec2;

use crate::shape::{SceneEntry, Shape};

/// Euclidean distance between two positions.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Intersect the boundaries of two circles.
///
/// Returns `None` or exactly two points. Degenerate inputs (a non-positive
/// radius, coincident centers) and non-crossing configurations produce
/// `None`. Exact external tangency (`d == r1 + r2`) counts as non-crossing;
/// exact internal tangency falls through the strict containment test and
/// yields two coincident points at the tangency site.
pub fn intersect(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> Option<[Vec2; 2]> {
    let d = distance(c1, c2);

    // Points intersect nothing; concentric centers would divide by zero.
    if r1 <= 0.0 || r2 <= 0.0 || d == 0.0 {
        return None;
    }

    // Separate or externally tangent.
    if d >= r1 + r2 {
        return None;
    }

    // One circle strictly inside the other.
    if d + r1 < r2 || d + r2 < r1 {
        return None;
    }

    // Chord construction (mathworld.wolfram.com/Circle-CircleIntersection.html):
    // `x` is the distance from c1 to the chord between the intersection
    // points, `y` the half-chord length.
    let x = (d * d - r2 * r2 + r1 * r1) / (2.0 * d);
    let y = (r1 * r1 - x * x).max(0.0).sqrt();

    let along = (c2 - c1) / d;
    let mid = c1 + along * x;
    let orth = Vec2::new(along.y, -along.x);

    Some([mid + orth * y, mid - orth * y])
}

/// Intersection points of a candidate shape against every existing entry,
/// concatenated in scene order.
///
/// Points contribute nothing on either side, so a scene of bare points
/// always yields an empty result.
pub fn intersections_with_all(shape: &Shape, entries: &[SceneEntry]) -> Vec<Vec2> {
    let Some((center, radius)) = shape.circle_params() else {
        return Vec::new();
    };

    let mut points = Vec::new();
    for entry in entries {
        if let Some((other_center, other_radius)) = entry.shape.circle_params()
            && let Some(pair) = intersect(center, radius, other_center, other_radius)
        {
            points.extend(pair);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use uuid::Uuid;

    fn entry(shape: Shape) -> SceneEntry {
        SceneEntry {
            id: Uuid::new_v4(),
            shape,
        }
    }

    #[test]
    fn test_distance_zero_for_coincident() {
        let p = Vec2::new(3.5, -1.25);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-4.0, 7.5);
        assert_eq!(distance(a, b), distance(b, a));
        assert_abs_diff_eq!(
            distance(Vec2::ZERO, Vec2::new(3.0, 4.0)),
            5.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_intersect_two_crossing_circles() {
        let c1 = Vec2::ZERO;
        let c2 = Vec2::new(6.0, 0.0);
        let points = intersect(c1, 5.0, c2, 5.0).unwrap();

        for p in points {
            assert_abs_diff_eq!(distance(p, c1), 5.0, epsilon = 1e-4);
            assert_abs_diff_eq!(distance(p, c2), 5.0, epsilon = 1e-4);
        }
        assert_abs_diff_eq!(points[0].x, 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(points[0].y, -4.0, epsilon = 1e-4);
        assert_abs_diff_eq!(points[1].x, 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(points[1].y, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_intersect_separate_circles() {
        assert!(intersect(Vec2::ZERO, 1.0, Vec2::new(10.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_intersect_external_tangency_is_empty() {
        // d == r1 + r2 exactly.
        assert!(intersect(Vec2::ZERO, 2.0, Vec2::new(5.0, 0.0), 3.0).is_none());
    }

    #[test]
    fn test_intersect_contained_circle_is_empty() {
        assert!(intersect(Vec2::ZERO, 10.0, Vec2::new(1.0, 0.0), 2.0).is_none());
        assert!(intersect(Vec2::new(1.0, 0.0), 2.0, Vec2::ZERO, 10.0).is_none());
    }

    #[test]
    fn test_intersect_internal_tangency_yields_coincident_points() {
        // d + r2 == r1: the containment test is strict, so the tangency
        // site comes back twice.
        let points = intersect(Vec2::ZERO, 1.0, Vec2::new(0.5, 0.0), 0.5).unwrap();
        assert_abs_diff_eq!(points[0].x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(points[0].y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(points[1].x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(points[1].y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_intersect_degenerate_inputs() {
        // Zero radius on either side.
        assert!(intersect(Vec2::ZERO, 0.0, Vec2::new(1.0, 0.0), 2.0).is_none());
        assert!(intersect(Vec2::ZERO, 2.0, Vec2::new(1.0, 0.0), 0.0).is_none());
        // Concentric centers, even with equal radii.
        assert!(intersect(Vec2::ZERO, 3.0, Vec2::ZERO, 3.0).is_none());
    }

    #[test]
    fn test_intersections_with_all_in_scene_order() {
        let scene = vec![
            entry(Shape::from_parts(Vec2::new(6.0, 0.0), Some(5.0), None)),
            entry(Shape::from_parts(Vec2::new(1.0, 1.0), None, None)),
            entry(Shape::from_parts(Vec2::new(-6.0, 0.0), Some(5.0), None)),
        ];
        let candidate = Shape::from_parts(Vec2::ZERO, Some(5.0), None);

        let points = intersections_with_all(&candidate, &scene);
        assert_eq!(points.len(), 4);
        // First pair from the first circle (x = 3), second from the other.
        assert_abs_diff_eq!(points[0].x, 3.0, epsilon = 1e-4);
        assert_abs_diff_eq!(points[2].x, -3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_intersections_with_all_for_point_candidate() {
        let scene = vec![entry(Shape::from_parts(Vec2::ZERO, Some(5.0), None))];
        let candidate = Shape::from_parts(Vec2::new(5.0, 0.0), None, None);
        assert!(intersections_with_all(&candidate, &scene).is_empty());
    }
}
