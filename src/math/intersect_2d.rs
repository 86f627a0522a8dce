use super::{Point2, Vector2};

/// Result of a bounded segment-segment intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// The intersection point.
    pub point: Point2,
    /// Interpolation ratio along the first segment, in `[0, 1]`.
    pub ratio_a: f64,
    /// Interpolation ratio along the second segment, in `[0, 1]`.
    pub ratio_b: f64,
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `None` for parallel segments (exactly zero determinant, no
/// tolerance) and when either ratio falls outside `[0, 1]`. Adjacency
/// filtering is the caller's job: this function only sees coordinates.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<SegmentHit> {
    let denominator = (a0.x - a1.x) * (b0.y - b1.y) - (a0.y - a1.y) * (b0.x - b1.x);
    if denominator == 0.0 {
        return None;
    }

    let dx = a0.x - b0.x;
    let dy = a0.y - b0.y;
    let ratio_a = (dx * (b0.y - b1.y) - dy * (b0.x - b1.x)) / denominator;
    let ratio_b = (dx * (a0.y - a1.y) - dy * (a0.x - a1.x)) / denominator;

    if !(0.0..=1.0).contains(&ratio_a) || !(0.0..=1.0).contains(&ratio_b) {
        return None;
    }

    Some(SegmentHit {
        point: a0 + (a1 - a0) * ratio_a,
        ratio_a,
        ratio_b,
    })
}

/// Midpoint of two 2D points.
#[must_use]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Sign of the 2D cross product `a × b`: `1`, `-1`, or `0` when parallel.
#[must_use]
pub fn cross_sign(a: &Vector2, b: &Vector2) -> i32 {
    let cross = a.x * b.y - a.y * b.x;
    if cross > 0.0 {
        1
    } else if cross < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_diagonals() {
        let hit =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0))
                .unwrap();
        assert_relative_eq!(hit.point.x, 1.0);
        assert_relative_eq!(hit.point.y, 1.0);
        assert_relative_eq!(hit.ratio_a, 0.5);
        assert_relative_eq!(hit.ratio_b, 0.5);
    }

    #[test]
    fn ratios_follow_each_segment() {
        // Horizontal segment crossed a quarter of the way along.
        let hit =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(4.0, 0.0), &p(1.0, -1.0), &p(1.0, 3.0))
                .unwrap();
        assert_relative_eq!(hit.ratio_a, 0.25);
        assert_relative_eq!(hit.ratio_b, 0.25);
        assert!(hit.ratio_a > 0.0 && hit.ratio_a < 1.0);
    }

    #[test]
    fn parallel_returns_none() {
        assert!(segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(0.0, 1.0),
            &p(1.0, 1.0)
        )
        .is_none());
    }

    #[test]
    fn collinear_overlap_returns_none() {
        assert!(segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(1.0, 0.0),
            &p(3.0, 0.0)
        )
        .is_none());
    }

    #[test]
    fn outside_span_returns_none() {
        // Lines cross at (3, 0), beyond the end of the first segment.
        assert!(segment_segment_intersect_2d(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(3.0, -1.0),
            &p(3.0, 1.0)
        )
        .is_none());
    }

    #[test]
    fn midpoint_basic() {
        let m = midpoint(&p(0.0, 2.0), &p(4.0, 0.0));
        assert_relative_eq!(m.x, 2.0);
        assert_relative_eq!(m.y, 1.0);
    }

    #[test]
    fn cross_sign_orientation() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 1.0);
        assert_eq!(cross_sign(&x, &y), 1);
        assert_eq!(cross_sign(&y, &x), -1);
        assert_eq!(cross_sign(&x, &x), 0);
    }
}
