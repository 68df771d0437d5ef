use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use surfdist::{
    Config, ElevationGrid, GridPoint, LookupError, SurfaceComparison, SurfaceDistanceEstimator,
};
use tracing::warn;

/// Marker written in place of distances when a row's points are off the grid.
const OUT_OF_BOUNDS: &str = "out_of_bounds";

pub fn run(
    config: &Config,
    input: PathBuf,
    output: Option<PathBuf>,
    pre: PathBuf,
    post: PathBuf,
    columns: Vec<String>,
) -> Result<()> {
    let pre_grid = super::load_grid(config, &pre)?;
    let post_grid = super::load_grid(config, &post)?;
    let estimator = SurfaceDistanceEstimator::new(config);

    let file = File::open(&input)
        .with_context(|| format!("Failed to open input file {}", input.display()))?;

    let output_path = output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "batch".to_string());
        input.with_file_name(format!("{}_distance.csv", stem))
    });
    let output_file = File::create(&output_path).context("Failed to create output file")?;

    let rows = process(
        &estimator,
        &pre_grid,
        &post_grid,
        &columns,
        BufReader::new(file),
        BufWriter::new(output_file),
    )?;

    println!("{} rows written to: {}", rows, output_path.display());
    Ok(())
}

/// Compare every point pair in the CSV read from `input`, writing the input
/// columns plus pre/post totals and their difference to `output`.
fn process<R: Read, W: Write>(
    estimator: &SurfaceDistanceEstimator,
    pre: &ElevationGrid,
    post: &ElevationGrid,
    columns: &[String],
    input: R,
    output: W,
) -> Result<usize> {
    if columns.len() != 4 {
        bail!(
            "Expected 4 column names (start x, start y, finish x, finish y), got {}",
            columns.len()
        );
    }

    let mut reader = csv::Reader::from_reader(input);

    // Find column indices
    let headers = reader.headers()?.clone();
    let indices = columns
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("Column '{}' not found in CSV", name))
        })
        .collect::<Result<Vec<_>>>()?;

    // Collect records for progress bar
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let mut writer = csv::Writer::from_writer(output);

    // Write header
    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.extend(["pre_total_m", "post_total_m", "difference_m"]);
    writer.write_record(&new_headers)?;

    for (row, record) in records.iter().enumerate() {
        let coord = |i: usize| -> Result<i32> {
            let raw = record
                .get(indices[i])
                .with_context(|| format!("Row {}: missing column '{}'", row + 1, columns[i]))?;
            raw.trim()
                .parse()
                .with_context(|| format!("Row {}: invalid coordinate '{}'", row + 1, raw))
        };
        let start = GridPoint::new(coord(0)?, coord(1)?);
        let finish = GridPoint::new(coord(2)?, coord(3)?);

        let distances = match SurfaceComparison::between(estimator, pre, post, start, finish) {
            Ok(cmp) => [
                format!("{:.2}", cmp.pre.total()),
                format!("{:.2}", cmp.post.total()),
                format!("{:.2}", cmp.difference()),
            ],
            Err(e @ LookupError::OutOfBounds { .. }) => {
                warn!(row = row + 1, %start, %finish, error = %e, "skipping row");
                [OUT_OF_BOUNDS.to_string(), OUT_OF_BOUNDS.to_string(), OUT_OF_BOUNDS.to_string()]
            }
        };

        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.extend(distances.iter().map(String::as_str));
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;

    Ok(records.len())
}
