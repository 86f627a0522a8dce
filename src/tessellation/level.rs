use earcutr::earcut;
use tracing::warn;

use crate::diagram::SurfaceLevel;
use crate::math::polygon_2d::collapse_ring;
use crate::math::Point2;

use super::TriangleCorners;

/// Triangulates a level's planar loop with earcut.
///
/// Consecutive coincident points, and a last point repeating the first, are
/// collapsed first. Points earcut finds collinear with their neighbours add
/// no triangle. Corners of each triangle keep the level's point order.
/// Levels under three distinct points yield nothing.
#[must_use]
pub fn triangulate_level(level: &SurfaceLevel) -> Vec<TriangleCorners> {
    let ring: Vec<Point2> = level.points.iter().map(|p| p.position).collect();
    let kept = collapse_ring(&ring);
    if kept.len() < 3 {
        return Vec::new();
    }

    let flat: Vec<f64> = kept.iter().flat_map(|&i| [ring[i].x, ring[i].y]).collect();
    let indices = match earcut(&flat, &[], 2) {
        Ok(indices) => indices,
        Err(err) => {
            warn!(error = ?err, points = kept.len(), "earcut failed, using fan triangulation");
            (1..kept.len() - 1).flat_map(|j| [0, j, j + 1]).collect()
        }
    };

    indices
        .chunks_exact(3)
        .map(|tri| {
            let mut corners = [kept[tri[0]], kept[tri[1]], kept[tri[2]]];
            corners.sort_unstable();
            corners.map(|i| level.points[i].clone())
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::diagram::DiagramPoint;
    use crate::math::polygon_2d::signed_area_2d;

    fn level(coords: &[(f64, f64)]) -> SurfaceLevel {
        SurfaceLevel {
            points: coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| DiagramPoint::vertex(format!("p{i}"), Point2::new(x, y), "k"))
                .collect(),
        }
    }

    fn covered_area(tris: &[TriangleCorners]) -> f64 {
        tris.iter()
            .map(|t| signed_area_2d(&[t[0].position, t[1].position, t[2].position]).abs())
            .sum()
    }

    #[test]
    fn pentagon_gives_three_triangles() {
        let tris = triangulate_level(&level(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (3.0, 1.5),
            (1.0, 3.0),
            (-1.0, 1.5),
        ]));
        assert_eq!(tris.len(), 3);
    }

    #[test]
    fn closing_duplicate_is_ignored() {
        let tris = triangulate_level(&level(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]));
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0][0].id, "p0");
    }

    #[test]
    fn concave_level_is_covered_exactly() {
        // An L shape, clockwise.
        let l_shape = level(&[
            (0.0, 0.0),
            (0.0, 2.0),
            (1.0, 2.0),
            (1.0, 1.0),
            (2.0, 1.0),
            (2.0, 0.0),
        ]);
        let tris = triangulate_level(&l_shape);
        assert_eq!(tris.len(), 4);
        assert_relative_eq!(covered_area(&tris), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn collinear_points_still_cover_the_level() {
        let tris = triangulate_level(&level(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (0.0, 2.0),
        ]));
        assert!(!tris.is_empty());
        assert_relative_eq!(covered_area(&tris), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn corners_follow_level_order() {
        let tris = triangulate_level(&level(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]));
        assert_eq!(tris.len(), 2);
        for t in &tris {
            let order: Vec<usize> = t.iter().map(|p| p.id[1..].parse().unwrap()).collect();
            assert!(order[0] < order[1] && order[1] < order[2]);
        }
    }

    #[test]
    fn too_short_level_is_empty() {
        assert!(triangulate_level(&level(&[(0.0, 0.0), (1.0, 0.0)])).is_empty());
        assert!(triangulate_level(&level(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)])).is_empty());
        assert!(triangulate_level(&SurfaceLevel::default()).is_empty());
    }
}
