//! Lifts a 2D diagram into 3D by stacking its surface levels.

mod minimize;

pub use minimize::minimize_levels;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::diagram::{Diagram, DiagramKnot, DiagramPoint, LevelLookup};
use crate::error::DiagramError;
use crate::math::{Point2, Point3};

/// Parameters controlling how diagram coordinates map into 3D.
///
/// Planar coordinates are multiplied by a fixed factor. The lift does not
/// fit or centre the result on the drawing's bounds.
#[derive(Debug, Clone, Copy)]
pub struct LiftParams {
    /// Factor applied to planar drawing coordinates.
    pub planar_scale: f64,
    /// Height between two consecutive levels.
    pub level_step: f64,
}

impl Default for LiftParams {
    fn default() -> Self {
        Self {
            planar_scale: 1.0 / 300.0,
            level_step: 0.25,
        }
    }
}

impl LiftParams {
    /// Maps a planar position on level `level` into Y-up 3D space.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn lift(&self, position: &Point2, level: usize) -> Point3 {
        Point3::new(
            position.x * self.planar_scale,
            self.level_step * level as f64,
            position.y * self.planar_scale,
        )
    }
}

/// A diagram point placed in 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct Point3D {
    pub id: String,
    pub knot_id: String,
    pub coords: Point3,
    pub source: DiagramPoint,
}

/// A 3D triangle of a knot sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle3D {
    pub id: String,
    pub knot_id: String,
    pub points: [Point3D; 3],
}

/// A knot's sheet in 3D.
#[derive(Debug, Clone)]
pub struct Knot3D {
    pub id: String,
    pub color: Option<String>,
    /// Same order as the diagram knot's points.
    pub points: Vec<Point3D>,
    pub triangles: Vec<Triangle3D>,
}

/// Lifts every knot of a diagram into 3D.
///
/// Heights come from the index of each point's level after
/// [`minimize_levels`]. A point that belongs to no level is logged and
/// placed at height 0.
pub struct LiftTo3D<'a> {
    diagram: &'a Diagram,
    params: LiftParams,
}

impl<'a> LiftTo3D<'a> {
    /// Creates a new `LiftTo3D` operation with default parameters.
    #[must_use]
    pub fn new(diagram: &'a Diagram) -> Self {
        Self {
            diagram,
            params: LiftParams::default(),
        }
    }

    /// Sets the lift parameters.
    #[must_use]
    pub fn with_params(mut self, params: LiftParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the lift.
    #[must_use]
    pub fn execute(&self) -> Vec<Knot3D> {
        let levels = minimize_levels(&self.diagram.surface_levels);
        let lookup = LevelLookup::new(&levels);
        debug!(
            levels = self.diagram.surface_levels.len(),
            minimized = levels.len(),
            "lifting diagram"
        );
        self.diagram
            .knots
            .iter()
            .map(|knot| self.lift_knot(knot, &lookup))
            .collect()
    }

    fn lift_knot(&self, knot: &DiagramKnot, lookup: &LevelLookup) -> Knot3D {
        let points: Vec<Point3D> = knot
            .points
            .iter()
            .map(|p| self.lift_point(p, lookup))
            .collect();
        let by_id: HashMap<&str, &Point3D> = points.iter().map(|p| (p.id.as_str(), p)).collect();

        let triangles = knot
            .triangles
            .iter()
            .map(|tri| Triangle3D {
                id: tri.id.clone(),
                knot_id: tri.knot_id.clone(),
                points: tri.points.clone().map(|p| {
                    by_id
                        .get(p.id.as_str())
                        .map_or_else(|| self.lift_point(&p, lookup), |&lifted| lifted.clone())
                }),
            })
            .collect();

        Knot3D {
            id: knot.id.clone(),
            color: knot.source.color.clone(),
            points,
            triangles,
        }
    }

    fn lift_point(&self, point: &DiagramPoint, lookup: &LevelLookup) -> Point3D {
        let level = lookup.level_of(point).unwrap_or_else(|| {
            warn!(
                error = %DiagramError::MissingSurfaceLevel {
                    point: point.id.clone(),
                    knot: point.knot_id.clone(),
                },
                "placing point at height 0"
            );
            0
        });
        Point3D {
            id: point.id.clone(),
            knot_id: point.knot_id.clone(),
            coords: self.params.lift(&point.position, level),
            source: point.clone(),
        }
    }
}
