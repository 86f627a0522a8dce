//! Crossing-aware diagram: per-knot point sequences, surface levels, and the
//! 2D triangles that fill them.

pub mod build;
pub mod point_sequence;
pub mod surface_levels;

pub use build::BuildDiagram;
pub use point_sequence::build_diagram_points;
pub use surface_levels::extract_surface_levels;

use std::collections::HashMap;
use std::sync::Arc;

use crate::drawing::{Crossing, Knot};
use crate::math::Point2;

/// What a diagram point stands for in its knot's sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum PointRole {
    /// A user-drawn vertex (or the synthetic closing point).
    Vertex,
    /// One strand's copy of a crossing.
    Crossing {
        crossing: Arc<Crossing>,
        is_top: bool,
        /// Id of the other strand's copy.
        parallel_id: String,
    },
    /// Interpolated point bracketing a crossing point.
    Separator,
}

/// A point of a knot's diagram sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramPoint {
    /// Unique across all knots of a diagram.
    pub id: String,
    pub position: Point2,
    pub knot_id: String,
    pub role: PointRole,
}

impl DiagramPoint {
    /// Creates a plain vertex point.
    #[must_use]
    pub fn vertex(id: impl Into<String>, position: Point2, knot_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            knot_id: knot_id.into(),
            role: PointRole::Vertex,
        }
    }

    /// The crossing this point marks, if any.
    #[must_use]
    pub fn crossing(&self) -> Option<&Crossing> {
        match &self.role {
            PointRole::Crossing { crossing, .. } => Some(crossing.as_ref()),
            _ => None,
        }
    }

    /// Id of the other strand's copy of the same crossing.
    #[must_use]
    pub fn parallel_id(&self) -> Option<&str> {
        match &self.role {
            PointRole::Crossing { parallel_id, .. } => Some(parallel_id.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_crossing(&self) -> bool {
        matches!(self.role, PointRole::Crossing { .. })
    }

    /// A crossing point on the top strand.
    #[must_use]
    pub fn is_top(&self) -> bool {
        matches!(self.role, PointRole::Crossing { is_top: true, .. })
    }

    /// A crossing point on the bottom strand.
    #[must_use]
    pub fn is_bottom(&self) -> bool {
        matches!(self.role, PointRole::Crossing { is_top: false, .. })
    }

    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self.role, PointRole::Separator)
    }

    /// A crossing point whose two strands belong to the same knot.
    #[must_use]
    pub fn is_self_crossing(&self) -> bool {
        self.crossing().is_some_and(|c| c.is_within_same_knot)
    }

    /// A crossing point whose other strand belongs to a different knot.
    #[must_use]
    pub fn is_foreign_crossing(&self) -> bool {
        self.crossing().is_some_and(|c| !c.is_within_same_knot)
    }
}

/// One closed loop of points that is filled as a single flat sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceLevel {
    pub points: Vec<DiagramPoint>,
}

impl SurfaceLevel {
    /// Knot owning the level, taken from its first point.
    #[must_use]
    pub fn knot_id(&self) -> Option<&str> {
        self.points.first().map(|p| p.knot_id.as_str())
    }

    /// Whether every point is a top crossing point.
    #[must_use]
    pub fn is_all_top(&self) -> bool {
        self.points.iter().all(DiagramPoint::is_top)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Maps `(knot, point)` ids to the index of the level containing them.
#[derive(Debug, Default)]
pub struct LevelLookup {
    index: HashMap<(String, String), usize>,
}

impl LevelLookup {
    /// Indexes a list of levels. The first level containing a point wins.
    #[must_use]
    pub fn new<'a>(levels: impl IntoIterator<Item = &'a SurfaceLevel>) -> Self {
        let mut index = HashMap::new();
        for (i, level) in levels.into_iter().enumerate() {
            for p in &level.points {
                index
                    .entry((p.knot_id.clone(), p.id.clone()))
                    .or_insert(i);
            }
        }
        Self { index }
    }

    /// Index of the level containing `point`.
    #[must_use]
    pub fn level_of(&self, point: &DiagramPoint) -> Option<usize> {
        self.index
            .get(&(point.knot_id.clone(), point.id.clone()))
            .copied()
    }
}

/// A 2D triangle over diagram points.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramTriangle {
    pub id: String,
    pub knot_id: String,
    pub points: [DiagramPoint; 3],
}

/// A knot after crossing splicing and triangulation.
#[derive(Debug, Clone)]
pub struct DiagramKnot {
    pub id: String,
    pub source: Knot,
    /// Walk order: raw points, crossing points, and separators.
    pub points: Vec<DiagramPoint>,
    pub triangles: Vec<DiagramTriangle>,
}

/// The full 2D diagram of a drawing.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    pub knots: Vec<DiagramKnot>,
    pub surface_levels: Vec<SurfaceLevel>,
}
