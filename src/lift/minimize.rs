use crate::diagram::SurfaceLevel;

/// Merges every run of consecutive all-top levels into one level.
#[must_use]
pub fn minimize_levels(levels: &[SurfaceLevel]) -> Vec<SurfaceLevel> {
    let mut merged: Vec<SurfaceLevel> = Vec::with_capacity(levels.len());
    for level in levels {
        match merged.last_mut() {
            Some(last) if level.is_all_top() && last.is_all_top() => {
                last.points.extend(level.points.iter().cloned());
            }
            _ => merged.push(level.clone()),
        }
    }
    merged
}
