//! Resolves where the 3D sheets of different knots pass through each other
//! and threads the crossing points into one seam loop.

mod detect;
mod inject;
mod merge;
mod seam;

pub use detect::detect_intersections;
pub use inject::inject_intersections;
pub use merge::{SeamKey, SeamStore};
pub use seam::walk_seam;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::lift::{Knot3D, Point3D, Triangle3D};
use crate::math::{Point3, MERGE_EPSILON};

/// Parameters controlling sub-surface resolution.
#[derive(Debug, Clone, Copy)]
pub struct SubSurfaceParams {
    /// Distance under which two 3D points are considered the same point.
    pub epsilon: f64,
    /// Upper bound on merge passes before giving up on a fixpoint.
    pub max_merge_passes: usize,
}

impl Default for SubSurfaceParams {
    fn default() -> Self {
        Self {
            epsilon: MERGE_EPSILON,
            max_merge_passes: 10_000,
        }
    }
}

/// Where a triangle edge pierced a triangle of another knot.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceIntersection {
    /// Triangle owning the piercing edge.
    pub triangle_id: String,
    /// Triangle that was pierced.
    pub other_triangle_id: String,
    /// Edge endpoints, in knot sequence order.
    pub line_p1: Point3D,
    pub line_p2: Point3D,
    pub twin_point_id: Option<String>,
    pub twin_knot_id: Option<String>,
}

/// A point of a knot sequence after intersection injection.
#[derive(Debug, Clone, PartialEq)]
pub struct SubSurfacePoint {
    pub id: String,
    pub knot_id: String,
    pub coords: Point3,
    /// Set on injected intersection points only.
    pub surface_intersection: Option<SurfaceIntersection>,
}

impl SubSurfacePoint {
    /// Wraps a lifted knot point.
    #[must_use]
    pub fn from_point(point: &Point3D) -> Self {
        Self {
            id: point.id.clone(),
            knot_id: point.knot_id.clone(),
            coords: point.coords,
            surface_intersection: None,
        }
    }

    /// Id of the twin point, if this is a linked intersection point.
    #[must_use]
    pub fn twin_id(&self) -> Option<&str> {
        self.surface_intersection
            .as_ref()
            .and_then(|s| s.twin_point_id.as_deref())
    }
}

/// A knot's 3D sequence with intersection points spliced in.
#[derive(Debug, Clone)]
pub struct SubSurfaceKnot {
    pub id: String,
    pub color: Option<String>,
    pub points: Vec<SubSurfacePoint>,
    pub triangles: Vec<Triangle3D>,
}

/// The closed seam traced across all knots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeamLoop {
    pub points: Vec<SubSurfacePoint>,
}

/// Result of [`ResolveSubSurfaces`].
#[derive(Debug, Clone)]
pub struct SubSurfaceResolution {
    pub knots: Vec<SubSurfaceKnot>,
    pub seam: SeamLoop,
    /// Every surviving intersection point, twins included.
    pub intersections: Vec<SubSurfacePoint>,
}

impl SubSurfaceResolution {
    /// Each twin pair once, in first-encounter order.
    #[must_use]
    pub fn twin_pairs(&self) -> Vec<(&SubSurfacePoint, &SubSurfacePoint)> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut pairs = Vec::new();
        for point in &self.intersections {
            if seen.contains(point.id.as_str()) {
                continue;
            }
            let Some(twin_id) = point.twin_id() else {
                continue;
            };
            if let Some(twin) = self.intersections.iter().find(|p| p.id == twin_id) {
                seen.insert(point.id.as_str());
                seen.insert(twin.id.as_str());
                pairs.push((point, twin));
            }
        }
        pairs
    }
}

/// Finds the seams between the 3D sheets of different knots.
///
/// Intersection points are detected per triangle pair, merged to a fixpoint
/// across pairs, spliced into each knot's sequence, and walked into a single
/// seam starting at the first knot's first point.
pub struct ResolveSubSurfaces<'a> {
    knots: &'a [Knot3D],
    params: SubSurfaceParams,
}

impl<'a> ResolveSubSurfaces<'a> {
    /// Creates a new `ResolveSubSurfaces` operation with default parameters.
    #[must_use]
    pub fn new(knots: &'a [Knot3D]) -> Self {
        Self {
            knots,
            params: SubSurfaceParams::default(),
        }
    }

    /// Sets the resolution parameters.
    #[must_use]
    pub fn with_params(mut self, params: SubSurfaceParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the resolution.
    #[must_use]
    pub fn execute(&self) -> SubSurfaceResolution {
        let pairs = detect_intersections(self.knots, self.params.epsilon);
        let detected = pairs.len() * 2;

        let mut store = SeamStore::from_pairs(pairs);
        match store.merge(self.params.epsilon, self.params.max_merge_passes) {
            Ok(merges) => debug!(detected, merges, "merged seam points"),
            Err(err) => warn!(error = %err, "keeping partially merged seam points"),
        }
        let intersections = store.into_points();

        let knots: Vec<SubSurfaceKnot> = self
            .knots
            .iter()
            .map(|knot| inject_intersections(knot, &intersections, self.params.epsilon))
            .collect();
        let seam = walk_seam(&knots);

        debug!(
            intersections = intersections.len(),
            seam = seam.points.len(),
            "resolved sub-surfaces"
        );
        SubSurfaceResolution {
            knots,
            seam,
            intersections,
        }
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use approx::assert_relative_eq;
    use nalgebra::distance;

    use super::fixtures::{floor, split_wall, wall};
    use super::*;
    use crate::diagram::BuildDiagram;
    use crate::drawing::{ComputeCrossings, Knot};
    use crate::lift::LiftTo3D;

    fn assert_pairs_span_distinct_points(resolution: &SubSurfaceResolution) {
        for (p, q) in resolution.twin_pairs() {
            assert!(
                distance(&p.coords, &q.coords) > MERGE_EPSILON,
                "{} and {} are the same point",
                p.id,
                q.id
            );
        }
    }

    #[test]
    fn one_seam_line_gives_one_twin_pair() {
        let knots = [floor(), wall()];
        let resolution = ResolveSubSurfaces::new(&knots).execute();

        assert_eq!(resolution.intersections.len(), 2);
        let pairs = resolution.twin_pairs();
        assert_eq!(pairs.len(), 1);

        let (p, q) = pairs[0];
        let mut xs = [p.coords.x, q.coords.x];
        xs.sort_by(f64::total_cmp);
        assert_relative_eq!(xs[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(xs[1], 4.0, epsilon = 1e-9);
        for point in [p, q] {
            assert_relative_eq!(point.coords.y, 0.0, epsilon = 1e-9);
            assert_relative_eq!(point.coords.z, 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn twin_links_are_symmetric() {
        let knots = [floor(), wall()];
        let resolution = ResolveSubSurfaces::new(&knots).execute();
        for point in &resolution.intersections {
            let twin = resolution
                .intersections
                .iter()
                .find(|p| Some(p.id.as_str()) == point.twin_id())
                .unwrap();
            assert_eq!(twin.twin_id(), Some(point.id.as_str()));
            let link = point.surface_intersection.as_ref().unwrap();
            assert_eq!(link.twin_knot_id.as_deref(), Some(twin.knot_id.as_str()));
        }
    }

    #[test]
    fn seam_follows_the_twin_jump() {
        let knots = [floor(), wall()];
        let resolution = ResolveSubSurfaces::new(&knots).execute();

        let floor_ids: Vec<&str> = resolution.knots[0]
            .points
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(floor_ids.len(), 6);
        assert_eq!(&floor_ids[..2], &["a0", "a1"]);
        assert_eq!(&floor_ids[3..5], &["a2", "a3"]);
        assert_relative_eq!(resolution.knots[0].points[2].coords.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(resolution.knots[0].points[5].coords.x, 0.0, epsilon = 1e-9);
        assert_eq!(resolution.knots[1].points.len(), 3);

        let seam: Vec<&str> = resolution.seam.points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(seam, vec!["a0", "a1", floor_ids[2], floor_ids[5]]);
    }

    #[test]
    fn split_sheet_keeps_the_full_seam() {
        let knots = [floor(), split_wall()];
        let resolution = ResolveSubSurfaces::new(&knots).execute();

        assert_eq!(resolution.intersections.len(), 2);
        let pairs = resolution.twin_pairs();
        assert_eq!(pairs.len(), 1);
        assert_pairs_span_distinct_points(&resolution);

        let (p, q) = pairs[0];
        let mut xs = [p.coords.x, q.coords.x];
        xs.sort_by(f64::total_cmp);
        assert_relative_eq!(xs[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(xs[1], 4.0, epsilon = 1e-9);
    }

    #[test]
    fn crossing_squares_resolve_end_to_end() {
        let squares = [
            Knot::from_coords(
                "a",
                &[(0.0, 0.0), (400.0, 0.0), (400.0, 400.0), (0.0, 400.0)],
                true,
            ),
            Knot::from_coords(
                "b",
                &[(200.0, 200.0), (600.0, 200.0), (600.0, 600.0), (200.0, 600.0)],
                true,
            ),
        ];
        let upper = ComputeCrossings::new(&squares, &HashSet::new())
            .execute()
            .into_iter()
            .find(|c| c.position.y > 300.0)
            .unwrap();
        let flipped: HashSet<String> = [upper.id].into_iter().collect();

        let diagram = BuildDiagram::new(&squares, &flipped).execute().unwrap();
        let lifted = LiftTo3D::new(&diagram).execute();
        let resolution = ResolveSubSurfaces::new(&lifted).execute();

        assert_eq!(resolution.intersections.len(), 2);
        let pairs = resolution.twin_pairs();
        assert_eq!(pairs.len(), 1);
        assert_pairs_span_distinct_points(&resolution);
        let (p, q) = pairs[0];
        assert_ne!(p.knot_id, q.knot_id);
        assert_eq!(q.twin_id(), Some(p.id.as_str()));
        let seam_ids: HashSet<&str> = resolution.seam.points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(seam_ids.len(), resolution.seam.points.len());
    }

    #[test]
    fn merge_budget_is_respected() {
        let knots = [floor(), wall()];
        let params = SubSurfaceParams {
            max_merge_passes: 0,
            ..SubSurfaceParams::default()
        };
        let resolution = ResolveSubSurfaces::new(&knots).with_params(params).execute();
        assert_eq!(resolution.intersections.len(), 4);
    }

    #[test]
    fn separate_sheets_have_no_seam_points() {
        let mut raised = wall();
        for tri in &mut raised.triangles {
            for p in &mut tri.points {
                p.coords.y += 10.0;
            }
        }
        let knots = [floor(), raised];
        let resolution = ResolveSubSurfaces::new(&knots).execute();
        assert!(resolution.intersections.is_empty());
        assert!(resolution.twin_pairs().is_empty());
        assert_eq!(resolution.seam.points.len(), 4);
    }

    #[test]
    fn empty_input_resolves_to_nothing() {
        let resolution = ResolveSubSurfaces::new(&[]).execute();
        assert!(resolution.knots.is_empty());
        assert!(resolution.seam.points.is_empty());
    }
}
