use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

fn coincident(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}

/// Indices of a closed ring's points with repeats removed.
///
/// A point coincident with the one kept before it is dropped, and so are
/// trailing points coincident with the first.
#[must_use]
pub fn collapse_ring(points: &[Point2]) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(points.len());
    for (i, pt) in points.iter().enumerate() {
        if kept.last().is_some_and(|&last| coincident(&points[last], pt)) {
            continue;
        }
        kept.push(i);
    }
    while kept.len() > 1 && coincident(&points[kept[0]], &points[kept[kept.len() - 1]]) {
        kept.pop();
    }
    kept
}
