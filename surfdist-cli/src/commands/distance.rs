use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use surfdist::{Config, DistanceResult, GridPoint, SurfaceComparison, SurfaceDistanceEstimator};

use super::load_grid;

#[derive(Serialize, Debug, PartialEq)]
pub struct DistanceResponse {
    horizontal_m: f64,
    elevation_m: f64,
    total_m: f64,
    steps: usize,
}

impl From<&DistanceResult> for DistanceResponse {
    fn from(result: &DistanceResult) -> Self {
        Self {
            horizontal_m: result.horizontal_m,
            elevation_m: result.elevation_m,
            total_m: result.total(),
            steps: result.steps,
        }
    }
}

#[derive(Serialize)]
struct ComparisonResponse {
    start: [i32; 2],
    finish: [i32; 2],
    pre: DistanceResponse,
    post: DistanceResponse,
    difference_m: f64,
}

pub fn run(
    config: &Config,
    pre: PathBuf,
    post: PathBuf,
    start: GridPoint,
    finish: GridPoint,
    json: bool,
) -> Result<()> {
    let pre_grid = load_grid(config, &pre)?;
    let post_grid = load_grid(config, &post)?;
    let estimator = SurfaceDistanceEstimator::new(config);

    let cmp = SurfaceComparison::between(&estimator, &pre_grid, &post_grid, start, finish)
        .with_context(|| format!("Cannot measure from {} to {}", start, finish))?;

    if json {
        println!("{}", serde_json::to_string(&to_response(&cmp))?);
    } else {
        print!("{}", render(&cmp));
    }

    Ok(())
}

fn to_response(cmp: &SurfaceComparison) -> ComparisonResponse {
    ComparisonResponse {
        start: [cmp.start.x, cmp.start.y],
        finish: [cmp.finish.x, cmp.finish.y],
        pre: DistanceResponse::from(&cmp.pre),
        post: DistanceResponse::from(&cmp.post),
        difference_m: cmp.difference(),
    }
}

fn render(cmp: &SurfaceComparison) -> String {
    let mut out = format!(
        "Start point: {}\nFinish point: {}\n\n",
        cmp.start, cmp.finish
    );
    for (label, result) in [("Pre-event", &cmp.pre), ("Post-event", &cmp.post)] {
        out.push_str(&format!(
            "{}:\n  Horizontal distance: {:.2} m\n  Elevation penalty: {:.2} m\n  Surface distance: {:.2} m\n\n",
            label,
            result.horizontal_m,
            result.elevation_m,
            result.total()
        ));
    }
    out.push_str(&format!(
        "Difference in surface distance: {:.2} m\n",
        cmp.difference()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::create_grid_file;
    use tempfile::TempDir;

    fn comparison() -> SurfaceComparison {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::builder().grid_resolution(8).build().unwrap();
        let pre = create_grid_file(temp_dir.path(), "pre.data", 8, |_, _| 0);
        let post = create_grid_file(temp_dir.path(), "post.data", 8, |row, _| {
            if row == 2 {
                1
            } else {
                0
            }
        });

        SurfaceComparison::between(
            &SurfaceDistanceEstimator::new(&config),
            &load_grid(&config, &pre).unwrap(),
            &load_grid(&config, &post).unwrap(),
            GridPoint::new(0, 0),
            GridPoint::new(4, 0),
        )
        .unwrap()
    }

    #[test]
    fn test_render_text() {
        let text = render(&comparison());

        assert!(text.starts_with("Start point: (0, 0)\nFinish point: (4, 0)\n"));
        assert!(text.contains("Pre-event:\n  Horizontal distance: 120.00 m"));
        assert!(text.contains("Post-event:\n  Horizontal distance: 120.00 m\n  Elevation penalty: 22.00 m\n  Surface distance: 142.00 m"));
        assert!(text.ends_with("Difference in surface distance: 22.00 m\n"));
    }

    #[test]
    fn test_json_response() {
        let value = serde_json::to_value(to_response(&comparison())).unwrap();

        assert_eq!(value["start"], serde_json::json!([0, 0]));
        assert_eq!(value["finish"], serde_json::json!([4, 0]));
        assert_eq!(value["pre"]["total_m"], 120.0);
        assert_eq!(value["post"]["elevation_m"], 22.0);
        assert_eq!(value["post"]["steps"], 4);
        assert_eq!(value["difference_m"], 22.0);
    }

    #[test]
    fn test_missing_grid_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::default();
        let err = run(
            &config,
            temp_dir.path().join("pre.data"),
            temp_dir.path().join("post.data"),
            GridPoint::new(0, 0),
            GridPoint::new(1, 1),
            false,
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("pre.data"));
    }
}
