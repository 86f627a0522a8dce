//! Input drawing model: user-drawn knots, their segments, and the planar
//! crossings between them.

pub mod crossing;
pub mod knot;
pub mod segment;

pub use crossing::{crossing_id, ComputeCrossings, Crossing};
pub use knot::{closing_point_id, Knot, KnotPoint};
pub use segment::Segment;
