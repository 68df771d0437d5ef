use anyhow::Result;
use std::path::PathBuf;
use surfdist::Config;

use super::load_grid;

pub fn run(config: &Config, grid: PathBuf) -> Result<()> {
    let elevation = load_grid(config, &grid)?;
    let samples = elevation.resolution();
    let file_size = std::fs::metadata(&grid)?.len();

    println!("Grid: {}", grid.display());
    println!();
    println!("Resolution: {}x{} samples", samples, samples);
    println!(
        "Coverage: {:.0} m x {:.0} m ({} m per step)",
        samples as f64 * config.spatial_resolution(),
        samples as f64 * config.spatial_resolution(),
        config.spatial_resolution()
    );
    println!("File size: {}", format_size(file_size));
    println!();

    if let Some((min, max)) = elevation.height_range() {
        println!(
            "Min height: {} ({:.0} m)",
            min,
            f64::from(min) * config.height_resolution()
        );
        println!(
            "Max height: {} ({:.0} m)",
            max,
            f64::from(max) * config.height_resolution()
        );
    }
    if let Some(mean) = elevation.mean_height() {
        println!(
            "Mean height: {:.2} ({:.0} m)",
            mean,
            mean * config.height_resolution()
        );
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
