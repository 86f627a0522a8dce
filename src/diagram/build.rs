use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::drawing::{ComputeCrossings, Knot};
use crate::error::Result;
use crate::tessellation::TessellateKnot;

use super::{build_diagram_points, extract_surface_levels, Diagram, DiagramKnot};

/// Builds the full 2D diagram of a drawing: crossings, per-knot point
/// sequences, surface levels, and triangles.
///
/// Knots with two points or fewer are ignored. A knot without an id is
/// named after its 1-based position in the input.
pub struct BuildDiagram<'a> {
    knots: &'a [Knot],
    flipped: &'a HashSet<String>,
}

impl<'a> BuildDiagram<'a> {
    /// Creates a new `BuildDiagram` operation.
    #[must_use]
    pub fn new(knots: &'a [Knot], flipped: &'a HashSet<String>) -> Self {
        Self { knots, flipped }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::DuplicateId`](crate::error::DiagramError::DuplicateId)
    /// if two diagram points end up with the same id, e.g. when two input
    /// knots share an id.
    pub fn execute(&self) -> Result<Diagram> {
        let knots: Vec<Knot> = self
            .knots
            .iter()
            .enumerate()
            .filter(|(_, knot)| knot.points.len() > 2)
            .map(|(i, knot)| {
                let mut knot = knot.clone();
                if knot.id.is_empty() {
                    knot.id = (i + 1).to_string();
                }
                knot
            })
            .collect();

        let crossings: Vec<_> = ComputeCrossings::new(&knots, self.flipped)
            .execute()
            .into_iter()
            .map(Arc::new)
            .collect();

        let mut diagram_knots: Vec<DiagramKnot> = knots
            .into_iter()
            .map(|knot| DiagramKnot {
                id: knot.id.clone(),
                points: build_diagram_points(&knot, &crossings),
                source: knot,
                triangles: Vec::new(),
            })
            .collect();
        diagram_knots.sort_by_cached_key(|k| k.points.iter().filter(|p| p.is_top()).count());

        let all_points: Vec<_> = diagram_knots
            .iter()
            .flat_map(|k| k.points.iter().cloned())
            .collect();
        let surface_levels = extract_surface_levels(&all_points)?;

        for knot in &mut diagram_knots {
            knot.triangles = TessellateKnot::new(&knot.id, &knot.points, &surface_levels).execute();
        }

        debug!(
            knots = diagram_knots.len(),
            crossings = crossings.len(),
            levels = surface_levels.len(),
            triangles = diagram_knots.iter().map(|k| k.triangles.len()).sum::<usize>(),
            "built diagram"
        );

        Ok(Diagram {
            knots: diagram_knots,
            surface_levels,
        })
    }
}
