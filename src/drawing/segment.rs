use crate::math::intersect_2d::{segment_segment_intersect_2d, SegmentHit};
use crate::math::Vector2;

use super::knot::KnotPoint;

/// A straight piece of a knot between two consecutive path points.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// `"{knot}-{p1}-{p2}"`, so segments compare equal across recomputation.
    pub id: String,
    pub knot_id: String,
    pub p1: KnotPoint,
    pub p2: KnotPoint,
    /// Starts at the knot's first point.
    pub is_first: bool,
    /// Ends at the knot's synthetic closing point.
    pub is_closing: bool,
}

impl Segment {
    /// Creates a segment of knot `knot_id`.
    #[must_use]
    pub fn new(knot_id: &str, p1: KnotPoint, p2: KnotPoint, is_first: bool, is_closing: bool) -> Self {
        Self {
            id: format!("{knot_id}-{}-{}", p1.id, p2.id),
            knot_id: knot_id.to_owned(),
            p1,
            p2,
            is_first,
            is_closing,
        }
    }

    /// Direction vector `p2 - p1`.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.p2.position - self.p1.position
    }

    /// Whether the two segments share an endpoint, compared by point id.
    #[must_use]
    pub fn is_adjacent(&self, other: &Segment) -> bool {
        self.p1.id == other.p1.id
            || self.p1.id == other.p2.id
            || self.p2.id == other.p1.id
            || self.p2.id == other.p2.id
    }

    /// Whether the two segments meet at a closed knot's seam, where the first
    /// point and the closing point are distinct ids at the same position.
    #[must_use]
    pub fn meets_at_seam(&self, other: &Segment) -> bool {
        self.knot_id == other.knot_id
            && ((self.is_first && other.is_closing) || (self.is_closing && other.is_first))
    }

    /// Planar intersection with another segment.
    ///
    /// Adjacent segments never cross. Ratios are reported in `self`, `other`
    /// order.
    #[must_use]
    pub fn intersect(&self, other: &Segment) -> Option<SegmentHit> {
        if self.is_adjacent(other) {
            return None;
        }
        segment_segment_intersect_2d(
            &self.p1.position,
            &self.p2.position,
            &other.p1.position,
            &other.p2.position,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn seg(knot: &str, a: (&str, f64, f64), b: (&str, f64, f64)) -> Segment {
        Segment::new(
            knot,
            KnotPoint::new(a.0, a.1, a.2),
            KnotPoint::new(b.0, b.1, b.2),
            false,
            false,
        )
    }

    #[test]
    fn crossing_segments_intersect_inside_both_spans() {
        let a = seg("k", ("a0", 0.0, 0.0), ("a1", 2.0, 2.0));
        let b = seg("k", ("b0", 0.0, 2.0), ("b1", 2.0, 0.0));
        let hit = a.intersect(&b).unwrap();
        assert!(hit.ratio_a > 0.0 && hit.ratio_a < 1.0);
        assert!(hit.ratio_b > 0.0 && hit.ratio_b < 1.0);
        assert_relative_eq!(hit.point.x, 1.0);
    }

    #[test]
    fn adjacent_segments_never_cross() {
        let a = seg("k", ("a0", 0.0, 0.0), ("a1", 2.0, 2.0));
        let b = seg("k", ("a1", 2.0, 2.0), ("b1", 0.0, 2.0));
        assert!(a.is_adjacent(&b));
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn same_position_different_ids_is_not_adjacent() {
        let a = seg("k", ("a0", 0.0, 0.0), ("a1", 2.0, 2.0));
        let b = seg("j", ("b0", 2.0, 2.0), ("b1", 2.0, 0.0));
        assert!(!a.is_adjacent(&b));
    }

    #[test]
    fn seam_detection_requires_same_knot() {
        let mut first = seg("k", ("k-0", 0.0, 0.0), ("k-1", 1.0, 0.0));
        first.is_first = true;
        let mut closing = seg("k", ("k-2", 0.0, 1.0), ("k-closing-point", 0.0, 0.0));
        closing.is_closing = true;
        assert!(first.meets_at_seam(&closing));
        assert!(closing.meets_at_seam(&first));

        closing.knot_id = "other".into();
        assert!(!first.meets_at_seam(&closing));
    }
}
