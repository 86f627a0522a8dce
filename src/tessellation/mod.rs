//! Fills a knot's surface levels with 2D triangles and stitches the levels
//! together at crossings.

mod bridge;
mod connector;
mod level;

pub use bridge::bridge_triangles;
pub use connector::connector_triangles;
pub use level::triangulate_level;

use tracing::debug;

use crate::diagram::{DiagramPoint, DiagramTriangle, LevelLookup, SurfaceLevel};

/// Three diagram points forming one triangle, before it is named.
pub type TriangleCorners = [DiagramPoint; 3];

/// Triangulates one knot of a diagram.
///
/// Emits, in order: the earcut triangles of every level owned by the
/// knot, the bridge pairs of its self-crossings, and the connector triangles
/// of its crossings with other knots. Triangles are named
/// `"{knot}-tri-{n}"` in that order.
pub struct TessellateKnot<'a> {
    knot_id: &'a str,
    points: &'a [DiagramPoint],
    levels: &'a [SurfaceLevel],
}

impl<'a> TessellateKnot<'a> {
    /// Creates a new `TessellateKnot` operation.
    ///
    /// `points` is the knot's own diagram sequence. `levels` are all levels
    /// of the diagram, so crossings can see levels owned by other knots.
    #[must_use]
    pub fn new(knot_id: &'a str, points: &'a [DiagramPoint], levels: &'a [SurfaceLevel]) -> Self {
        Self {
            knot_id,
            points,
            levels,
        }
    }

    /// Executes the tessellation.
    #[must_use]
    pub fn execute(&self) -> Vec<DiagramTriangle> {
        let lookup = LevelLookup::new(self.levels);

        let level_tris: Vec<TriangleCorners> = self
            .levels
            .iter()
            .filter(|level| level.knot_id() == Some(self.knot_id))
            .flat_map(triangulate_level)
            .collect();
        let bridges = bridge_triangles(self.points, &lookup);
        let connectors = connector_triangles(self.points, &lookup);

        debug!(
            knot = self.knot_id,
            level = level_tris.len(),
            bridges = bridges.len(),
            connectors = connectors.len(),
            "tessellated knot"
        );

        level_tris
            .into_iter()
            .chain(bridges)
            .chain(connectors)
            .enumerate()
            .map(|(n, points)| DiagramTriangle {
                id: format!("{}-tri-{n}", self.knot_id),
                knot_id: self.knot_id.to_owned(),
                points,
            })
            .collect()
    }
}
