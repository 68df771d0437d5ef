use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use surfdist::{Config, GridPoint, Profile, ProfileStep, SurfaceDistanceEstimator};

use super::distance::DistanceResponse;
use super::load_grid;

#[derive(Serialize)]
struct StepResponse {
    x: i32,
    y: i32,
    height: u8,
    climb: u8,
}

#[derive(Serialize)]
struct ProfileResponse {
    start: [i32; 2],
    start_height: u8,
    steps: Vec<StepResponse>,
    distance: DistanceResponse,
}

pub fn run(
    config: &Config,
    grid: PathBuf,
    start: GridPoint,
    finish: GridPoint,
    json: bool,
) -> Result<()> {
    let elevation = load_grid(config, &grid)?;
    let estimator = SurfaceDistanceEstimator::new(config);

    let Profile {
        steps,
        distance: result,
    } = estimator
        .profile(&elevation, start, finish)
        .with_context(|| format!("Cannot profile from {} to {}", start, finish))?;
    let start_height = elevation.height(start)?;

    if json {
        let response = ProfileResponse {
            start: [start.x, start.y],
            start_height,
            steps: steps.iter().map(to_step_response).collect(),
            distance: DistanceResponse::from(&result),
        };
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    println!("{:>6} {:>12} {:>6} {:>6}", "step", "point", "height", "climb");
    println!("{:>6} {:>12} {:>6} {:>6}", 0, start.to_string(), start_height, "-");
    for (i, step) in steps.iter().enumerate() {
        println!(
            "{:>6} {:>12} {:>6} {:>6}",
            i + 1,
            step.point.to_string(),
            step.height,
            step.climb
        );
    }
    println!();
    println!("Horizontal distance: {:.2} m", result.horizontal_m);
    println!("Elevation penalty: {:.2} m", result.elevation_m);
    println!("Surface distance: {:.2} m", result.total());

    Ok(())
}

fn to_step_response(step: &ProfileStep) -> StepResponse {
    StepResponse {
        x: step.point.x,
        y: step.point.y,
        height: step.height,
        climb: step.climb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::create_grid_file;
    use tempfile::TempDir;

    #[test]
    fn test_step_response() {
        let step = ProfileStep {
            point: GridPoint::new(3, 4),
            height: 12,
            climb: 5,
        };
        let value = serde_json::to_value(to_step_response(&step)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"x": 3, "y": 4, "height": 12, "climb": 5})
        );
    }

    #[test]
    fn test_far_off_grid_points_are_reported() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::builder().grid_resolution(4).build().unwrap();
        let grid = create_grid_file(temp_dir.path(), "grid.data", 4, |_, _| 0);

        let err = run(
            &config,
            grid,
            GridPoint::new(i32::MIN, i32::MIN),
            GridPoint::new(i32::MAX, i32::MAX),
            false,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("out of bounds"));
    }

    #[test]
    fn test_out_of_bounds_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::builder().grid_resolution(4).build().unwrap();
        let grid = create_grid_file(temp_dir.path(), "grid.data", 4, |_, _| 0);

        let err = run(
            &config,
            grid,
            GridPoint::new(0, 0),
            GridPoint::new(4, 0),
            true,
        )
        .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("(4, 0)"));
        assert!(message.contains("out of bounds"));
    }
}
