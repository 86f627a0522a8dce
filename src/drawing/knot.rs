use crate::math::Point2;

use super::segment::Segment;

const CLOSING_POINT_SUFFIX: &str = "closing-point";

/// Id of the synthetic point that closes knot `knot_id`.
#[must_use]
pub fn closing_point_id(knot_id: &str) -> String {
    format!("{knot_id}-{CLOSING_POINT_SUFFIX}")
}

/// A user-drawn vertex of a knot.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotPoint {
    /// Unique id, stable across recomputation.
    pub id: String,
    /// Planar position in drawing units.
    pub position: Point2,
}

impl KnotPoint {
    /// Creates a knot point.
    #[must_use]
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Point2::new(x, y),
        }
    }
}

/// A user-drawn polyline strand, open or closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Knot {
    pub id: String,
    pub points: Vec<KnotPoint>,
    pub is_closed: bool,
    /// Display colour, carried through untouched.
    pub color: Option<String>,
}

impl Knot {
    /// Creates a knot from already-identified points.
    #[must_use]
    pub fn new(id: impl Into<String>, points: Vec<KnotPoint>, is_closed: bool) -> Self {
        Self {
            id: id.into(),
            points,
            is_closed,
            color: None,
        }
    }

    /// Creates a knot from raw coordinates, naming points `"{id}-{index}"`.
    #[must_use]
    pub fn from_coords(id: impl Into<String>, coords: &[(f64, f64)], is_closed: bool) -> Self {
        let id = id.into();
        let points = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| KnotPoint::new(format!("{id}-{i}"), x, y))
            .collect();
        Self::new(id, points, is_closed)
    }

    /// Sets the display colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Whether the knot gets a synthetic closing point.
    #[must_use]
    pub fn has_closing_point(&self) -> bool {
        self.is_closed && self.points.len() > 2
    }

    /// The synthetic closing point: a copy of the first point under
    /// [`closing_point_id`].
    #[must_use]
    pub fn closing_point(&self) -> Option<KnotPoint> {
        if !self.has_closing_point() {
            return None;
        }
        self.points.first().map(|first| KnotPoint {
            id: closing_point_id(&self.id),
            position: first.position,
        })
    }

    /// The walkable path: the raw points plus the closing point if any.
    #[must_use]
    pub fn path_points(&self) -> Vec<KnotPoint> {
        let mut path = self.points.clone();
        path.extend(self.closing_point());
        path
    }

    /// One segment per consecutive pair of path points.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        if self.points.len() < 2 {
            return Vec::new();
        }
        let path = self.path_points();
        let last = path.len() - 2;
        path.windows(2)
            .enumerate()
            .map(|(i, pair)| {
                Segment::new(
                    &self.id,
                    pair[0].clone(),
                    pair[1].clone(),
                    i == 0,
                    i == last && self.has_closing_point(),
                )
            })
            .collect()
    }
}
