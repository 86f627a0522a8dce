//! Built-in drawings for the debug runner.

use knotweave::drawing::Knot;

/// Names accepted on the command line.
pub const PATTERNS: &[&str] = &["triangle", "figure-eight", "two-loops"];

/// Drawing for a pattern name, if known.
pub fn drawing(name: &str) -> Option<Vec<Knot>> {
    let knots = match name {
        "triangle" => vec![Knot::from_coords(
            "triangle",
            &[(0.0, 0.0), (300.0, 0.0), (150.0, 260.0)],
            true,
        )],
        "figure-eight" => vec![Knot::from_coords(
            "eight",
            &[(0.0, 0.0), (300.0, 300.0), (300.0, 0.0), (0.0, 300.0)],
            true,
        )
        .with_color("#d94f4f")],
        "two-loops" => vec![
            Knot::from_coords(
                "left",
                &[(0.0, 0.0), (400.0, 0.0), (400.0, 400.0), (0.0, 400.0)],
                true,
            )
            .with_color("#4f7fd9"),
            Knot::from_coords(
                "right",
                &[(200.0, 200.0), (600.0, 200.0), (600.0, 600.0), (200.0, 600.0)],
                true,
            )
            .with_color("#4fd98a"),
        ],
        _ => return None,
    };
    Some(knots)
}
