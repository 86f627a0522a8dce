use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::diagram::{DiagramPoint, LevelLookup};
use crate::error::DiagramError;

use super::TriangleCorners;

/// Emits two triangles per self-crossing joining the strands on either side.
///
/// The step direction along the sequence comes from the crossing's
/// orientation sign. If the neighbour in that direction sits on the crossing
/// point's own level, the direction is reversed so the bridge spans two
/// levels. A crossing whose neighbours cannot be found is skipped with a
/// warning.
#[must_use]
pub fn bridge_triangles(points: &[DiagramPoint], lookup: &LevelLookup) -> Vec<TriangleCorners> {
    let index: HashMap<&str, usize> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();
    let mut processed: HashSet<&str> = HashSet::new();
    let mut triangles = Vec::new();

    for (i, p1) in points.iter().enumerate() {
        let Some(crossing) = p1.crossing().filter(|c| c.is_within_same_knot) else {
            continue;
        };
        if !processed.insert(crossing.id.as_str()) {
            continue;
        }

        let corners = bridge_corners(points, &index, lookup, i, crossing.orientation_sign());
        match corners {
            Some([p1, p2, p3, p4]) => {
                triangles.push([p4.clone(), p1.clone(), p3.clone()]);
                triangles.push([p3.clone(), p1.clone(), p2.clone()]);
            }
            None => warn!(
                error = %DiagramError::BridgeNeighbourMissing { crossing: crossing.id.clone() },
                "skipping bridge"
            ),
        }
    }
    triangles
}

/// The crossing point, its neighbour, its parallel, and the parallel's
/// neighbour in the same direction.
fn bridge_corners<'p>(
    points: &'p [DiagramPoint],
    index: &HashMap<&str, usize>,
    lookup: &LevelLookup,
    i: usize,
    sign: i32,
) -> Option<[&'p DiagramPoint; 4]> {
    if sign == 0 {
        return None;
    }
    let step = |from: usize, dir: i32| -> Option<usize> {
        let to = if dir > 0 {
            from.checked_add(1)?
        } else {
            from.checked_sub(1)?
        };
        (to < points.len()).then_some(to)
    };

    let p1 = &points[i];
    let mut dir = sign;
    let mut p2 = step(i, dir).map(|j| &points[j]);
    if let Some(neighbour) = p2 {
        if lookup.level_of(neighbour) == lookup.level_of(p1) {
            dir = -dir;
            p2 = step(i, dir).map(|j| &points[j]);
        }
    }
    let p2 = p2?;

    let parallel = *index.get(p1.parallel_id()?)?;
    let p3 = &points[parallel];
    let p4 = &points[step(parallel, dir)?];
    Some([p1, p2, p3, p4])
}
