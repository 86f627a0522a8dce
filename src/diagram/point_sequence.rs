use std::collections::HashMap;
use std::sync::Arc;

use crate::drawing::{Crossing, Knot};
use crate::math::intersect_2d::midpoint;
use crate::math::Point2;

use super::{DiagramPoint, PointRole};

/// Builds a knot's diagram sequence: its path points with every crossing
/// point spliced in, bracketed by separator points.
///
/// Crossing points sharing a segment are ordered by ascending ratio along
/// that segment (ties keep crossing order). A self-crossing contributes two
/// points to the same knot; a crossing with another knot contributes one.
#[must_use]
pub fn build_diagram_points(knot: &Knot, crossings: &[Arc<Crossing>]) -> Vec<DiagramPoint> {
    let mut by_segment: HashMap<String, Vec<(f64, DiagramPoint)>> = HashMap::new();
    for crossing in crossings.iter().filter(|c| c.touches_knot(&knot.id)) {
        if crossing.top.knot_id == knot.id {
            by_segment
                .entry(crossing.top.id.clone())
                .or_default()
                .push((crossing.top_ratio, crossing_point(crossing, true)));
        }
        if crossing.bottom.knot_id == knot.id {
            by_segment
                .entry(crossing.bottom.id.clone())
                .or_default()
                .push((crossing.bottom_ratio, crossing_point(crossing, false)));
        }
    }
    for points in by_segment.values_mut() {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    let segments = knot.segments();
    let mut spliced = Vec::new();
    for (i, path_point) in knot.path_points().into_iter().enumerate() {
        spliced.push(DiagramPoint::vertex(
            path_point.id,
            path_point.position,
            knot.id.clone(),
        ));
        let on_segment = segments.get(i).and_then(|s| by_segment.remove(&s.id));
        spliced.extend(on_segment.into_iter().flatten().map(|(_, p)| p));
    }

    insert_separators(&spliced, &knot.id)
}

fn crossing_point(crossing: &Arc<Crossing>, is_top: bool) -> DiagramPoint {
    let (id, parallel_id) = if is_top {
        (crossing.top_point_id(), crossing.bottom_point_id())
    } else {
        (crossing.bottom_point_id(), crossing.top_point_id())
    };
    let knot_id = if is_top {
        &crossing.top.knot_id
    } else {
        &crossing.bottom.knot_id
    };
    DiagramPoint {
        id,
        position: crossing.position,
        knot_id: knot_id.clone(),
        role: PointRole::Crossing {
            crossing: Arc::clone(crossing),
            is_top,
            parallel_id,
        },
    }
}

/// Brackets every crossing point with a `pre-` and `post-` separator.
///
/// Separators sit halfway toward the neighbouring point as it stands when
/// the separator is placed. Placement runs back to front, so a `post-`
/// separator followed by another crossing sits halfway toward that
/// crossing's `pre-` separator.
fn insert_separators(points: &[DiagramPoint], knot_id: &str) -> Vec<DiagramPoint> {
    let n = points.len();
    let mut reversed = Vec::with_capacity(n * 3);
    let mut following: Option<Point2> = None;

    for i in (0..n).rev() {
        let point = &points[i];
        if !point.is_crossing() {
            reversed.push(point.clone());
            following = Some(point.position);
            continue;
        }

        let prev = if i > 0 { &points[i - 1] } else { &points[n - 1] };
        let next = following.unwrap_or(points[0].position);
        let pre = separator(
            format!("pre-{}", point.id),
            midpoint(&point.position, &prev.position),
            knot_id,
        );
        let post = separator(
            format!("post-{}", point.id),
            midpoint(&point.position, &next),
            knot_id,
        );

        following = Some(pre.position);
        reversed.push(post);
        reversed.push(point.clone());
        reversed.push(pre);
    }

    reversed.reverse();
    reversed
}

fn separator(id: String, position: Point2, knot_id: &str) -> DiagramPoint {
    DiagramPoint {
        id,
        position,
        knot_id: knot_id.to_owned(),
        role: PointRole::Separator,
    }
}
