use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use surfdist::config::{
    DEFAULT_GRID_RESOLUTION, DEFAULT_HEIGHT_RESOLUTION, DEFAULT_SPATIAL_RESOLUTION,
    ENV_GRID_RESOLUTION, ENV_HEIGHT_RESOLUTION, ENV_SPATIAL_RESOLUTION,
};
use surfdist::{Config, GridPoint};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Terrain surface distance CLI tool
#[derive(Parser)]
#[command(name = "surfdist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Samples per grid row/column
    #[arg(
        long,
        env = ENV_GRID_RESOLUTION,
        default_value_t = DEFAULT_GRID_RESOLUTION,
        global = true
    )]
    grid_resolution: usize,

    /// Meters per grid step
    #[arg(
        long,
        env = ENV_SPATIAL_RESOLUTION,
        default_value_t = DEFAULT_SPATIAL_RESOLUTION,
        global = true
    )]
    spatial_resolution: f64,

    /// Meters per elevation unit
    #[arg(
        long,
        env = ENV_HEIGHT_RESOLUTION,
        default_value_t = DEFAULT_HEIGHT_RESOLUTION,
        global = true
    )]
    height_resolution: f64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the surface distance between two points before and after an event
    Distance {
        /// Pre-event elevation grid
        #[arg(long, default_value = "pre.data")]
        pre: PathBuf,

        /// Post-event elevation grid
        #[arg(long, default_value = "post.data")]
        post: PathBuf,

        /// Starting point as x,y
        #[arg(long, allow_hyphen_values = true)]
        start: GridPoint,

        /// Finishing point as x,y
        #[arg(long, allow_hyphen_values = true)]
        finish: GridPoint,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show every sampled step between two points on one grid
    Profile {
        /// Elevation grid file
        grid: PathBuf,

        /// Starting point as x,y
        #[arg(long, allow_hyphen_values = true)]
        start: GridPoint,

        /// Finishing point as x,y
        #[arg(long, allow_hyphen_values = true)]
        finish: GridPoint,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Compare many point pairs from a CSV file
    Batch {
        /// Input CSV with one point pair per row
        input: PathBuf,

        /// Output file (defaults to <input>_distance.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pre-event elevation grid
        #[arg(long, default_value = "pre.data")]
        pre: PathBuf,

        /// Post-event elevation grid
        #[arg(long, default_value = "post.data")]
        post: PathBuf,

        /// Column names for start x, start y, finish x and finish y
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "start_x,start_y,finish_x,finish_y"
        )]
        columns: Vec<String>,
    },

    /// Display information about an elevation grid
    Info {
        /// Elevation grid file
        grid: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::builder()
        .grid_resolution(cli.grid_resolution)
        .spatial_resolution(cli.spatial_resolution)
        .height_resolution(cli.height_resolution)
        .build()
        .context("Invalid configuration")?;

    match cli.command {
        Commands::Distance {
            pre,
            post,
            start,
            finish,
            json,
        } => commands::distance::run(&config, pre, post, start, finish, json),
        Commands::Profile {
            grid,
            start,
            finish,
            json,
        } => commands::profile::run(&config, grid, start, finish, json),
        Commands::Batch {
            input,
            output,
            pre,
            post,
            columns,
        } => commands::batch::run(&config, input, output, pre, post, columns),
        Commands::Info { grid } => commands::info::run(&config, grid),
    }
}

/// Log to stderr so results on stdout stay machine-readable.
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "surfdist=debug",
        _ => "surfdist=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
