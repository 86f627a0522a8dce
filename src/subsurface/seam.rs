use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::SubSurfaceError;

use super::{SeamLoop, SubSurfaceKnot};

/// Walks the seam loop across knots.
///
/// Starts at the first point of the first knot and follows each knot's
/// sequence. On reaching a linked intersection point the walk jumps to its
/// twin and continues from there along the twin's knot, without jumping
/// again straight away. The walk ends on the first revisited point.
#[must_use]
pub fn walk_seam(knots: &[SubSurfaceKnot]) -> SeamLoop {
    let mut place: HashMap<&str, (usize, usize)> = HashMap::new();
    for (k, knot) in knots.iter().enumerate() {
        for (i, p) in knot.points.iter().enumerate() {
            place.entry(p.id.as_str()).or_insert((k, i));
        }
    }

    let mut seam = SeamLoop::default();
    let mut visited: HashSet<&str> = HashSet::new();
    let (mut k, mut i, mut just_jumped) = (0, 0, false);

    while let Some(knot) = knots.get(k) {
        let Some(point) = knot.points.get(i % knot.points.len().max(1)) else {
            break;
        };
        if !visited.insert(point.id.as_str()) {
            break;
        }
        seam.points.push(point.clone());

        if let Some(twin_id) = point.twin_id().filter(|_| !just_jumped) {
            let Some(&(tk, ti)) = place.get(twin_id) else {
                warn!(
                    error = %SubSurfaceError::MissingTwin { point: point.id.clone() },
                    "ending seam walk"
                );
                break;
            };
            (k, i, just_jumped) = (tk, ti, true);
            continue;
        }
        (i, just_jumped) = ((i + 1) % knot.points.len(), false);
    }
    seam
}
