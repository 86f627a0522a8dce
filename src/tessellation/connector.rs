use crate::diagram::{DiagramPoint, LevelLookup};

use super::TriangleCorners;

/// Emits `(prev, crossing, next)` for every crossing with another knot whose
/// level differs from the level of either sequence neighbour.
#[must_use]
pub fn connector_triangles(points: &[DiagramPoint], lookup: &LevelLookup) -> Vec<TriangleCorners> {
    points
        .windows(3)
        .filter(|w| w[1].is_foreign_crossing())
        .filter(|w| {
            let level = lookup.level_of(&w[1]);
            level != lookup.level_of(&w[0]) || level != lookup.level_of(&w[2])
        })
        .map(|w| [w[0].clone(), w[1].clone(), w[2].clone()])
        .collect()
}
