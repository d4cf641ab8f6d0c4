//! Runs the overlay and relate pipeline on two overlapping squares.
//!
//! Usage:
//! ```text
//! cargo run --example overlay
//! RUST_LOG=steric=trace cargo run --example overlay
//! ```

use steric::operations::overlay::{Difference, Intersection, SymDifference, Union};
use steric::operations::query::Area;
use steric::operations::relate::Relate;
use steric::{Polygon, Steric};

fn square(x: f64, y: f64, size: f64) -> Steric {
    Steric::Polygon(Polygon::from_xy(&[
        (x, y),
        (x + size, y),
        (x + size, y + size),
        (x, y + size),
        (x, y),
    ]))
}

fn main() -> steric::Result<()> {
    // Default: WARN for everything, DEBUG for steric.
    // Override with RUST_LOG env var (e.g. RUST_LOG=steric=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("steric=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let a = square(0.0, 0.0, 10.0);
    let b = square(5.0, 5.0, 10.0);

    println!("relate       {}", Relate::new(&a, &b).execute()?);
    let results = [
        ("union", Union::new(&a, &b).execute()?),
        ("intersection", Intersection::new(&a, &b).execute()?),
        ("difference", Difference::new(&a, &b).execute()?),
        ("symdiff", SymDifference::new(&a, &b).execute()?),
    ];
    for (name, geometry) in &results {
        println!(
            "{name:<12} {:<12} area {:>6.1}  {:?}",
            geometry.geometry_type(),
            Area::new(geometry).execute(),
            geometry.coords()
        );
    }
    Ok(())
}
