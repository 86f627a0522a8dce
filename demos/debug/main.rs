//! Knotweave debug runner: runs the full pipeline on a built-in drawing and
//! prints what each stage produced.
//!
//! ```text
//! cargo run --example debug                                  # default (figure-eight)
//! cargo run --example debug -- two-loops                     # another drawing
//! cargo run --example debug -- two-loops --flip <crossingId> # swap over/under
//! ```

mod patterns;

use std::collections::HashSet;

use knotweave::diagram::BuildDiagram;
use knotweave::drawing::ComputeCrossings;
use knotweave::lift::LiftTo3D;
use knotweave::subsurface::ResolveSubSurfaces;

/// Parsed CLI arguments.
struct CliArgs {
    /// Pattern name to run.
    pattern: String,
    /// Crossing ids given with `--flip`.
    flipped: HashSet<String>,
}

fn parse_args() -> CliArgs {
    let mut args = std::env::args().skip(1);
    let mut pattern = None;
    let mut flipped = HashSet::new();
    while let Some(arg) = args.next() {
        if arg == "--flip" {
            flipped.extend(args.next());
        } else if !arg.starts_with('-') && pattern.is_none() {
            pattern = Some(arg);
        }
    }
    CliArgs {
        pattern: pattern.unwrap_or_else(|| "figure-eight".to_string()),
        flipped,
    }
}

fn main() -> knotweave::Result<()> {
    // Default: WARN for everything, INFO for knotweave.
    // Override with RUST_LOG env var (e.g. RUST_LOG=knotweave=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("knotweave=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = parse_args();
    let knots = patterns::drawing(&args.pattern).unwrap_or_else(|| {
        eprintln!("[debug] unknown pattern: {}", args.pattern);
        eprintln!("[debug] available: {}", patterns::PATTERNS.join(", "));
        eprintln!("[debug] falling back to: figure-eight");
        patterns::drawing("figure-eight").unwrap_or_default()
    });

    let crossings = ComputeCrossings::new(&knots, &args.flipped).execute();
    println!("crossings: {}", crossings.len());
    for crossing in &crossings {
        println!(
            "  {} top={} flipped={}",
            crossing.id, crossing.top.knot_id, crossing.is_flipped
        );
    }

    let diagram = BuildDiagram::new(&knots, &args.flipped).execute()?;
    println!("surface levels: {}", diagram.surface_levels.len());
    for knot in &diagram.knots {
        println!(
            "  knot {}: {} points, {} triangles",
            knot.id,
            knot.points.len(),
            knot.triangles.len()
        );
    }

    let knots3d = LiftTo3D::new(&diagram).execute();
    let resolution = ResolveSubSurfaces::new(&knots3d).execute();
    println!(
        "seam: {} points, {} twin pairs",
        resolution.seam.points.len(),
        resolution.twin_pairs().len()
    );
    Ok(())
}
