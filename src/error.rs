use thiserror::Error;

/// Top-level error type for the knotweave engine.
#[derive(Debug, Error)]
pub enum WeaveError {
    #[error(transparent)]
    Diagram(#[from] DiagramError),

    #[error(transparent)]
    SubSurface(#[from] SubSurfaceError),
}

/// Errors raised while building the 2D diagram and its surface levels.
///
/// Only [`DuplicateId`](DiagramError::DuplicateId) is ever returned to the
/// caller. The other variants are logged where they occur and the pipeline
/// continues with a fallback.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("point id {0} appears more than once in the diagram")]
    DuplicateId(String),

    #[error("crossing point {point} has no parallel point in the diagram")]
    MissingParallel { point: String },

    #[error("point {point} of knot {knot} does not belong to any surface level")]
    MissingSurfaceLevel { point: String, knot: String },

    #[error("crossing {crossing} lacks neighbours for its bridge triangles")]
    BridgeNeighbourMissing { crossing: String },
}

/// Errors raised while resolving 3D intersections between knot sheets.
///
/// All variants are soft: they are logged and the affected seam segment is
/// dropped.
#[derive(Debug, Error)]
pub enum SubSurfaceError {
    #[error("triangles {triangle} and {other} produced {found} intersection points, expected 2")]
    DegenerateIntersectionCount {
        triangle: String,
        other: String,
        found: usize,
    },

    /// The degenerate-intersection condition of a merge that never settles:
    /// the detected points keep chaining past the pass budget.
    #[error("seam point merge did not reach a fixpoint after {passes} passes")]
    MergeDidNotConverge { passes: usize },

    #[error("seam point {point} has no reachable twin")]
    MissingTwin { point: String },
}

/// Convenience type alias for results using [`WeaveError`].
pub type Result<T> = std::result::Result<T, WeaveError>;
