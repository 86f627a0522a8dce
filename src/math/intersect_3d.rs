use super::{Point3, TOLERANCE};

/// Intersection of the segment `p1 → p2` with triangle `(a, b, c)`.
///
/// Möller–Trumbore without back-face culling, with the ray parameter
/// restricted to the segment's span `[0, 1]`. A segment parallel to (or
/// lying in) the triangle's plane never intersects.
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn segment_triangle_intersect(
    p1: &Point3,
    p2: &Point3,
    a: &Point3,
    b: &Point3,
    c: &Point3,
) -> Option<Point3> {
    let dir = p2 - p1;
    let edge1 = b - a;
    let edge2 = c - a;

    let h = dir.cross(&edge2);
    let det = edge1.dot(&h);
    if det.abs() < TOLERANCE {
        return None;
    }

    let inv = 1.0 / det;
    let s = p1 - a;
    let u = inv * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv * dir.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv * edge2.dot(&q);
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    Some(p1 + dir * t)
}

/// Returns `true` when `point` lies on the segment `a → b`, within `epsilon`.
///
/// Uses the cumulative-distance test `|pa| + |pb| ≈ |ab|`, which accepts
/// points anywhere along the span and rejects points off to the side.
#[must_use]
pub fn is_point_between(point: &Point3, a: &Point3, b: &Point3, epsilon: f64) -> bool {
    let d1 = nalgebra::distance(point, a);
    let d2 = nalgebra::distance(point, b);
    let total = nalgebra::distance(a, b);
    ((d1 + d2) - total).abs() < epsilon
}

/// Returns `true` when the two points are closer than `epsilon`.
#[must_use]
pub fn are_points_close(a: &Point3, b: &Point3, epsilon: f64) -> bool {
    nalgebra::distance(a, b) < epsilon
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn floor() -> (Point3, Point3, Point3) {
        (p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(0.0, 0.0, 4.0))
    }

    #[test]
    fn vertical_segment_pierces_triangle() {
        let (a, b, c) = floor();
        let hit = segment_triangle_intersect(&p(1.0, -1.0, 1.0), &p(1.0, 3.0, 1.0), &a, &b, &c)
            .unwrap();
        assert_relative_eq!(hit.x, 1.0);
        assert_relative_eq!(hit.y, 0.0);
        assert_relative_eq!(hit.z, 1.0);
    }

    #[test]
    fn winding_does_not_matter() {
        let (a, b, c) = floor();
        let hit = segment_triangle_intersect(&p(1.0, 3.0, 1.0), &p(1.0, -1.0, 1.0), &a, &c, &b);
        assert!(hit.is_some());
    }

    #[test]
    fn segment_stopping_short_misses() {
        let (a, b, c) = floor();
        let hit = segment_triangle_intersect(&p(1.0, 1.0, 1.0), &p(1.0, 3.0, 1.0), &a, &b, &c);
        assert!(hit.is_none());
    }

    #[test]
    fn segment_outside_triangle_misses() {
        let (a, b, c) = floor();
        let hit = segment_triangle_intersect(&p(3.0, -1.0, 3.0), &p(3.0, 1.0, 3.0), &a, &b, &c);
        assert!(hit.is_none());
    }

    #[test]
    fn coplanar_segment_misses() {
        let (a, b, c) = floor();
        let hit = segment_triangle_intersect(&p(-1.0, 0.0, 1.0), &p(5.0, 0.0, 1.0), &a, &b, &c);
        assert!(hit.is_none());
    }

    #[test]
    fn point_between_on_span() {
        let a = p(0.0, 0.0, 0.0);
        let b = p(2.0, 0.0, 0.0);
        assert!(is_point_between(&p(0.5, 0.0, 0.0), &a, &b, 0.01));
        assert!(!is_point_between(&p(0.5, 0.5, 0.0), &a, &b, 0.01));
        assert!(!is_point_between(&p(3.0, 0.0, 0.0), &a, &b, 0.01));
    }

    #[test]
    fn close_points() {
        assert!(are_points_close(&p(0.0, 0.0, 0.0), &p(0.005, 0.0, 0.0), 0.01));
        assert!(!are_points_close(&p(0.0, 0.0, 0.0), &p(0.02, 0.0, 0.0), 0.01));
    }
}
