use std::collections::HashSet;

use nalgebra::distance_squared;

use crate::lift::Knot3D;
use crate::math::intersect_3d::is_point_between;

use super::{SubSurfaceKnot, SubSurfacePoint};

/// Splices the knot's own intersection points into its 3D sequence.
///
/// After each point, intersections lying on the way to the next point
/// (wrapping at the end) are inserted nearest first. A point lying on two
/// spans, such as one sitting on a knot vertex, is inserted only once.
#[must_use]
pub fn inject_intersections(
    knot: &Knot3D,
    intersections: &[SubSurfacePoint],
    epsilon: f64,
) -> SubSurfaceKnot {
    let own: Vec<&SubSurfacePoint> = intersections
        .iter()
        .filter(|p| p.knot_id == knot.id)
        .collect();
    let mut added: HashSet<&str> = HashSet::new();
    let mut points = Vec::with_capacity(knot.points.len() + own.len());

    for (i, point) in knot.points.iter().enumerate() {
        let next = &knot.points[(i + 1) % knot.points.len()];
        points.push(SubSurfacePoint::from_point(point));

        let mut between: Vec<&SubSurfacePoint> = own
            .iter()
            .copied()
            .filter(|p| !added.contains(p.id.as_str()))
            .filter(|p| is_point_between(&p.coords, &point.coords, &next.coords, epsilon))
            .collect();
        between.sort_by(|a, b| {
            distance_squared(&a.coords, &point.coords)
                .total_cmp(&distance_squared(&b.coords, &point.coords))
        });
        for p in between {
            added.insert(p.id.as_str());
            points.push(p.clone());
        }
    }

    SubSurfaceKnot {
        id: knot.id.clone(),
        color: knot.color.clone(),
        points,
        triangles: knot.triangles.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::subsurface::fixtures::floor;

    fn at(id: &str, x: f64, z: f64) -> SubSurfacePoint {
        SubSurfacePoint {
            id: id.into(),
            knot_id: "a".into(),
            coords: Point3::new(x, 0.0, z),
            surface_intersection: None,
        }
    }

    fn ids(knot: &SubSurfaceKnot) -> Vec<&str> {
        knot.points.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn points_on_one_edge_are_ordered_by_distance() {
        let knot = inject_intersections(&floor(), &[at("far", 3.0, 0.0), at("near", 1.0, 0.0)], 0.01);
        assert_eq!(ids(&knot), vec!["a0", "near", "far", "a1", "a2", "a3"]);
    }

    #[test]
    fn closing_span_wraps_to_first_point() {
        let knot = inject_intersections(&floor(), &[at("w", 0.0, 2.0)], 0.01);
        assert_eq!(ids(&knot), vec!["a0", "a1", "a2", "a3", "w"]);
    }

    #[test]
    fn point_on_a_vertex_is_added_once() {
        let knot = inject_intersections(&floor(), &[at("v", 4.0, 0.0)], 0.01);
        assert_eq!(ids(&knot), vec!["a0", "v", "a1", "a2", "a3"]);
    }

    #[test]
    fn other_knots_points_are_ignored() {
        let mut foreign = at("x", 1.0, 0.0);
        foreign.knot_id = "b".into();
        let knot = inject_intersections(&floor(), &[foreign], 0.01);
        assert_eq!(knot.points.len(), 4);
        assert_eq!(knot.triangles.len(), 2);
    }

    #[test]
    fn off_edge_points_are_ignored() {
        let knot = inject_intersections(&floor(), &[at("mid", 2.0, 1.0)], 0.01);
        assert_eq!(knot.points.len(), 4);
    }
}
