//! Compare surface distances on a pre- and post-event grid.
//!
//! Run with: cargo run --example compare -- /path/to/pre.data /path/to/post.data

use std::env;
use surfdist::{
    Config, ElevationGrid, Error, GridPoint, LoadError, SurfaceComparison,
    SurfaceDistanceEstimator,
};

fn main() -> Result<(), Error> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (pre_path, post_path) = match args.as_slice() {
        [pre, post] => (pre.as_str(), post.as_str()),
        _ => ("pre.data", "post.data"),
    };

    let config = Config::default();
    let load = |path: &str| match ElevationGrid::from_file(path, config.grid_resolution()) {
        Err(LoadError::NotFound { path }) => {
            eprintln!("{}: grid not available locally", path.display());
            std::process::exit(1);
        }
        other => other,
    };
    let pre = load(pre_path)?;
    let post = load(post_path)?;
    let estimator = SurfaceDistanceEstimator::new(&config);

    // A few traverses across the grid
    let routes = [
        ("Along the first row", GridPoint::new(0, 0), GridPoint::new(0, 511)),
        ("Corner to corner", GridPoint::new(0, 0), GridPoint::new(511, 511)),
        ("Short hop", GridPoint::new(100, 100), GridPoint::new(110, 104)),
    ];

    println!("Surface distance comparison:");
    println!("{:-<60}", "");

    for (name, start, finish) in routes {
        let cmp = SurfaceComparison::between(&estimator, &pre, &post, start, finish)?;
        println!(
            "{}: pre {:.1}m, post {:.1}m, change {:+.1}m",
            name,
            cmp.pre.total(),
            cmp.post.total(),
            cmp.difference()
        );
    }

    Ok(())
}
