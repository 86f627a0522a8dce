use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::SubSurfaceError;
use crate::lift::{Knot3D, Point3D, Triangle3D};
use crate::math::intersect_3d::{are_points_close, segment_triangle_intersect};

use super::{SubSurfacePoint, SurfaceIntersection};

/// Sequence positions of each knot's points, per knot id.
type SequenceIndex<'a> = HashMap<&'a str, HashMap<&'a str, usize>>;

/// Tests every pair of triangles from different knots and returns one twin
/// pair per crossing pair.
///
/// Edges of each triangle are tested against the other triangle in both
/// directions. Points closer than `epsilon` are collapsed. A pair yielding
/// fewer than two points does not cross; one yielding more is logged and
/// dropped.
#[must_use]
pub fn detect_intersections(knots: &[Knot3D], epsilon: f64) -> Vec<[SubSurfacePoint; 2]> {
    let sequence: SequenceIndex<'_> = knots
        .iter()
        .map(|k| {
            let positions = k
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| (p.id.as_str(), i))
                .collect();
            (k.id.as_str(), positions)
        })
        .collect();
    let triangles: Vec<&Triangle3D> = knots.iter().flat_map(|k| &k.triangles).collect();

    let mut pairs = Vec::new();
    for (i, first) in triangles.iter().enumerate() {
        for second in &triangles[i + 1..] {
            if first.knot_id == second.knot_id {
                continue;
            }
            let mut points = edge_hits(first, second, &sequence, epsilon);
            points.extend(edge_hits(second, first, &sequence, epsilon));
            if let Some(pair) = link_twins(dedup_close(points, epsilon), &first.id, &second.id) {
                pairs.push(pair);
            }
        }
    }

    debug!(
        triangles = triangles.len(),
        pairs = pairs.len(),
        "detected sheet intersections"
    );
    pairs
}

/// Points where the edges of `triangle` pierce `other`.
fn edge_hits(
    triangle: &Triangle3D,
    other: &Triangle3D,
    sequence: &SequenceIndex<'_>,
    epsilon: f64,
) -> Vec<SubSurfacePoint> {
    let positions = sequence.get(triangle.knot_id.as_str());
    let position = |p: &Point3D| {
        positions
            .and_then(|m| m.get(p.id.as_str()).copied())
            .unwrap_or(usize::MAX)
    };

    let [a, b, c] = &triangle.points;
    let mut edges = [(a, b), (b, c), (c, a)];
    edges.sort_by_key(|&(p, q)| position(p).abs_diff(position(q)));

    let [oa, ob, oc] = &other.points;
    let hits = edges.iter().filter_map(|&(p1, p2)| {
        let coords =
            segment_triangle_intersect(&p1.coords, &p2.coords, &oa.coords, &ob.coords, &oc.coords)?;
        let (line_p1, line_p2) = if position(p1) <= position(p2) {
            (p1, p2)
        } else {
            (p2, p1)
        };
        Some(SubSurfacePoint {
            id: format!("subsurface-inter-{}-{}-{}", p1.id, p2.id, other.id),
            knot_id: triangle.knot_id.clone(),
            coords,
            surface_intersection: Some(SurfaceIntersection {
                triangle_id: triangle.id.clone(),
                other_triangle_id: other.id.clone(),
                line_p1: line_p1.clone(),
                line_p2: line_p2.clone(),
                twin_point_id: None,
                twin_knot_id: None,
            }),
        })
    });
    dedup_close(hits.collect(), epsilon)
}

/// Keeps the first of every group of points closer than `epsilon`.
fn dedup_close(points: Vec<SubSurfacePoint>, epsilon: f64) -> Vec<SubSurfacePoint> {
    let mut unique: Vec<SubSurfacePoint> = Vec::with_capacity(points.len());
    for p in points {
        if !unique
            .iter()
            .any(|u| are_points_close(&u.coords, &p.coords, epsilon))
        {
            unique.push(p);
        }
    }
    unique
}

/// Links exactly two points as twins.
///
/// When both points come from the edges of one triangle the twins share
/// that triangle's knot.
fn link_twins(
    points: Vec<SubSurfacePoint>,
    triangle: &str,
    other: &str,
) -> Option<[SubSurfacePoint; 2]> {
    let found = points.len();
    let Ok([mut p, mut q]) = <[SubSurfacePoint; 2]>::try_from(points) else {
        if found > 2 {
            warn!(
                error = %SubSurfaceError::DegenerateIntersectionCount {
                    triangle: triangle.to_owned(),
                    other: other.to_owned(),
                    found,
                },
                "dropping triangle pair"
            );
        }
        return None;
    };

    if let Some(link) = p.surface_intersection.as_mut() {
        link.twin_point_id = Some(q.id.clone());
        link.twin_knot_id = Some(q.knot_id.clone());
    }
    if let Some(link) = q.surface_intersection.as_mut() {
        link.twin_point_id = Some(p.id.clone());
        link.twin_knot_id = Some(p.knot_id.clone());
    }
    Some([p, q])
}
