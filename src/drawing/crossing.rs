use std::collections::HashSet;

use tracing::debug;

use crate::math::intersect_2d::cross_sign;
use crate::math::Point2;

use super::knot::Knot;
use super::segment::Segment;

/// Canonical id of the crossing between two segments, independent of order.
#[must_use]
pub fn crossing_id(a: &Segment, b: &Segment) -> String {
    let (first, second) = if a.id <= b.id {
        (&a.id, &b.id)
    } else {
        (&b.id, &a.id)
    };
    format!("inter-{first}-{second}")
}

/// A planar crossing of two segments with an over/under assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    pub id: String,
    /// The strand rendered above.
    pub top: Segment,
    /// The strand rendered below.
    pub bottom: Segment,
    pub position: Point2,
    pub top_ratio: f64,
    pub bottom_ratio: f64,
    /// The crossing id was in the user's flip set.
    pub is_flipped: bool,
    /// Both strands belong to the same knot.
    pub is_within_same_knot: bool,
}

impl Crossing {
    /// Interpolation ratio of the crossing along the given segment.
    #[must_use]
    pub fn ratio_on(&self, segment_id: &str) -> Option<f64> {
        if self.top.id == segment_id {
            Some(self.top_ratio)
        } else if self.bottom.id == segment_id {
            Some(self.bottom_ratio)
        } else {
            None
        }
    }

    /// Sign of `top × bottom`, used to orient the bridge between strands.
    #[must_use]
    pub fn orientation_sign(&self) -> i32 {
        cross_sign(&self.top.direction(), &self.bottom.direction())
    }

    /// Id of the diagram point placed on the top strand.
    #[must_use]
    pub fn top_point_id(&self) -> String {
        format!("{}-top", self.id)
    }

    /// Id of the diagram point placed on the bottom strand.
    #[must_use]
    pub fn bottom_point_id(&self) -> String {
        self.id.clone()
    }

    /// Whether either strand belongs to `knot_id`.
    #[must_use]
    pub fn touches_knot(&self, knot_id: &str) -> bool {
        self.top.knot_id == knot_id || self.bottom.knot_id == knot_id
    }
}

/// Finds every crossing between the segments of a set of knots.
///
/// Every unordered segment pair is tested once, in encounter order. The later
/// segment of a pair is on top unless the crossing id is in the flip set.
pub struct ComputeCrossings<'a> {
    knots: &'a [Knot],
    flipped: &'a HashSet<String>,
}

impl<'a> ComputeCrossings<'a> {
    /// Creates a new `ComputeCrossings` operation.
    #[must_use]
    pub fn new(knots: &'a [Knot], flipped: &'a HashSet<String>) -> Self {
        Self { knots, flipped }
    }

    /// Executes the operation.
    #[must_use]
    pub fn execute(&self) -> Vec<Crossing> {
        let segments: Vec<Segment> = self.knots.iter().flat_map(Knot::segments).collect();
        let mut crossings = Vec::new();

        for i in 0..segments.len() {
            for j in (i + 1)..segments.len() {
                let (seg_i, seg_j) = (&segments[i], &segments[j]);
                if seg_i.meets_at_seam(seg_j) {
                    continue;
                }
                let Some(hit) = seg_i.intersect(seg_j) else {
                    continue;
                };

                let id = crossing_id(seg_i, seg_j);
                let is_flipped = self.flipped.contains(&id);
                let (top, bottom, top_ratio, bottom_ratio) = if is_flipped {
                    (seg_i, seg_j, hit.ratio_a, hit.ratio_b)
                } else {
                    (seg_j, seg_i, hit.ratio_b, hit.ratio_a)
                };

                crossings.push(Crossing {
                    id,
                    is_within_same_knot: top.knot_id == bottom.knot_id,
                    top: top.clone(),
                    bottom: bottom.clone(),
                    position: hit.point,
                    top_ratio,
                    bottom_ratio,
                    is_flipped,
                });
            }
        }

        debug!(
            segments = segments.len(),
            crossings = crossings.len(),
            "computed crossings"
        );
        crossings
    }
}
