use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{DiagramError, Result};

use super::{DiagramPoint, SurfaceLevel};

/// Partitions the concatenated point sequences of all knots into surface
/// levels.
///
/// Every input point ends up in exactly one level. Top crossing points are
/// only walked after their bottom twin, and a self-crossing is crossed by
/// jumping to the successor of its parallel point, so each strand passes
/// alternately over and under.
///
/// # Errors
///
/// Returns [`DiagramError::DuplicateId`] if two points share an id.
pub fn extract_surface_levels(points: &[DiagramPoint]) -> Result<Vec<SurfaceLevel>> {
    let mut index = HashMap::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        if index.insert(p.id.as_str(), i).is_some() {
            return Err(DiagramError::DuplicateId(p.id.clone()).into());
        }
    }

    let mut walker = LoopWalker {
        points,
        index,
        visited: HashSet::with_capacity(points.len()),
        passed: HashSet::new(),
    };
    let mut levels: Vec<Vec<usize>> = Vec::new();

    while walker.visited.len() < points.len() {
        let mut started = false;
        for i in 0..points.len() {
            if walker.is_visited(i) || walker.is_deferred(i) {
                continue;
            }
            let found = walker.find_loop(i);
            push_loop(&mut levels, points, found);
            started = true;
        }

        if !started {
            // Only top points whose bottom twin can never be reached remain.
            let Some(i) = (0..points.len()).find(|&i| !walker.is_visited(i)) else {
                break;
            };
            warn!(
                error = %DiagramError::MissingParallel { point: points[i].id.clone() },
                "forcing walk from deferred top crossing point"
            );
            let found = walker.find_loop(i);
            push_loop(&mut levels, points, found);
        }
    }

    remerge_leading_bottoms(&mut levels, points, &walker.index);

    let levels: Vec<SurfaceLevel> = levels
        .into_iter()
        .filter(|level| !level.is_empty())
        .map(|level| SurfaceLevel {
            points: level.into_iter().map(|i| points[i].clone()).collect(),
        })
        .collect();

    debug!(
        points = points.len(),
        levels = levels.len(),
        "extracted surface levels"
    );
    Ok(levels)
}

/// Walk state shared by every loop of one extraction.
struct LoopWalker<'a> {
    points: &'a [DiagramPoint],
    index: HashMap<&'a str, usize>,
    visited: HashSet<usize>,
    /// Crossings already stepped over by following the parallel strand.
    passed: HashSet<&'a str>,
}

impl<'a> LoopWalker<'a> {
    fn is_visited(&self, i: usize) -> bool {
        self.visited.contains(&i)
    }

    fn is_visited_id(&self, id: &str) -> bool {
        self.index.get(id).is_some_and(|i| self.visited.contains(i))
    }

    /// A top point waits until its bottom twin has been walked.
    fn is_deferred(&self, i: usize) -> bool {
        let p = &self.points[i];
        p.is_top() && !p.parallel_id().is_some_and(|id| self.is_visited_id(id))
    }

    fn parallel_of(&self, point: &DiagramPoint) -> Option<usize> {
        point
            .parallel_id()
            .and_then(|id| self.index.get(id).copied())
    }

    fn find_loop(&mut self, start: usize) -> Vec<usize> {
        let mut found = Vec::new();
        let mut current = start;
        loop {
            found.push(current);
            self.visited.insert(current);
            match self.step(current) {
                Some(next) if !self.is_visited(next) => current = next,
                _ => break,
            }
        }
        found
    }

    /// Next point of the walk, or `None` where the walk leaves the knot.
    fn step(&mut self, i: usize) -> Option<usize> {
        let points = self.points;
        let n = points.len();
        let point = &points[i];
        let next_i = if i + 1 < n { i + 1 } else { 0 };
        let next = &points[next_i];

        if next.knot_id != point.knot_id {
            return None;
        }

        if let Some(crossing) = point.crossing().filter(|c| c.is_within_same_knot) {
            if self.passed.contains(crossing.id.as_str()) {
                return Some(next_i);
            }
            return match self.parallel_of(point) {
                Some(p) => (p + 1 < n).then_some(p + 1),
                None => {
                    warn!(
                        error = %DiagramError::MissingParallel { point: point.id.clone() },
                        "continuing along own strand"
                    );
                    Some(next_i)
                }
            };
        }

        if let Some(crossing) = next.crossing() {
            let Some(p) = self.parallel_of(next) else {
                warn!(
                    error = %DiagramError::MissingParallel { point: next.id.clone() },
                    "continuing along own strand"
                );
                return Some(next_i);
            };
            let parallel_visited = next.parallel_id().is_some_and(|id| self.is_visited_id(id));
            let use_parallel = (next.is_top() && !parallel_visited)
                || (next.is_bottom() && self.is_visited(next_i));
            if use_parallel {
                self.passed.insert(crossing.id.as_str());
                if points[p].knot_id == point.knot_id {
                    return Some(p);
                }
                return Some(if i + 2 < n { i + 2 } else { 0 });
            }
        }

        Some(next_i)
    }
}

/// Appends a walked loop. Foreign bottom crossing points of the very first
/// loop are split into a level of their own beneath it.
fn push_loop(levels: &mut Vec<Vec<usize>>, points: &[DiagramPoint], found: Vec<usize>) {
    let (bottoms, rest): (Vec<usize>, Vec<usize>) = found.iter().partition(|&&i| {
        let p = &points[i];
        p.is_bottom() && p.is_foreign_crossing()
    });
    if levels.is_empty() && !bottoms.is_empty() {
        levels.push(bottoms);
        levels.push(rest);
    } else {
        levels.push(found);
    }
}

/// Moves first-level bottom points back into the second level, right after
/// their sequence predecessor, when both levels belong to the same knot.
fn remerge_leading_bottoms(
    levels: &mut [Vec<usize>],
    points: &[DiagramPoint],
    index: &HashMap<&str, usize>,
) {
    let [first, second, ..] = levels else {
        return;
    };
    let (Some(&head), Some(&second_head)) = (first.first(), second.first()) else {
        return;
    };
    if !first.iter().all(|&i| points[i].is_bottom())
        || points[head].knot_id != points[second_head].knot_id
    {
        return;
    }

    for point in first.clone() {
        let Some(&at) = index.get(points[point].id.as_str()) else {
            continue;
        };
        let Some(prev) = at.checked_sub(1) else {
            continue;
        };
        if let Some(pos) = second.iter().position(|&i| i == prev) {
            second.insert(pos + 1, point);
            first.retain(|&i| i != point);
        }
    }
}
