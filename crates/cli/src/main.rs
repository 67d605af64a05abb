//! Vegwatch CLI - vegetation health monitoring from satellite snapshots

mod config;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vegwatch_algorithms::health::{analyze, render_report, HealthReport};
use vegwatch_algorithms::imagery::{rgb_vegetation_index, VisibleBandNir};
use vegwatch_algorithms::timeseries::{build_series, reference_dates, FetchPolicy};
use vegwatch_cloud::{load_image, DirectorySource, WmsSource};
use vegwatch_core::{Coordinate, ImageSource};

use config::{AnalyzerOverrides, MonitorConfig, SeriesOverrides};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "vegwatch")]
#[command(author, version, about = "Vegetation health monitoring from satellite snapshots", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a monthly series for a location and report its vegetation health
    Analyze {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Number of completed months to sample [default: 6]
        #[arg(long)]
        months: Option<usize>,
        /// Snapshot size in pixels [default: 512]
        #[arg(long)]
        size: Option<u32>,
        /// Image source: "wms" or a directory of YYYY-MM-DD.{png,jpg} snapshots
        #[arg(long, default_value = "wms")]
        source: String,
        /// Image (path or URL) used for months the source cannot supply
        #[arg(long)]
        fallback: Option<String>,
        /// Anomaly threshold in multiples of the mean spread [default: 1.5]
        #[arg(long)]
        anomaly_factor: Option<f64>,
        /// High-severity threshold in multiples of the mean spread [default: 2.0]
        #[arg(long)]
        high_factor: Option<f64>,
        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Reference date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Compute the RGB vegetation index of a single image
    Index {
        /// Image path or URL
        image: String,
    },
    /// Print the monthly reference dates
    Dates {
        /// Number of completed months
        #[arg(long, default_value = "6")]
        months: usize,
        /// Reference date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Setting default subscriber failed")
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn open_source(source: &str, config: &MonitorConfig) -> Result<Box<dyn ImageSource>> {
    if source == "wms" {
        let wms = WmsSource::new(config.wms.clone()).context("Failed to set up WMS client")?;
        return Ok(Box::new(wms));
    }
    let dir = PathBuf::from(source);
    if !dir.is_dir() {
        bail!("Source must be \"wms\" or an existing directory: {}", source);
    }
    Ok(Box::new(DirectorySource::new(dir)))
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    coordinate: Coordinate,
    source: &'a str,
    dates: Vec<NaiveDate>,
    fallback_months: usize,
    report: &'a HealthReport,
}

// ─── Commands ───────────────────────────────────────────────────────────

fn run_analyze(
    series_flags: SeriesOverrides,
    analyzer_flags: AnalyzerOverrides,
    source: String,
    fallback: Option<String>,
    config: Option<PathBuf>,
    json: bool,
    today: Option<NaiveDate>,
) -> Result<()> {
    let monitor = match &config {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    let series_config = monitor.series_config(&series_flags)?;
    let params = monitor.analyzer_params(&analyzer_flags)?;
    let today = today_or(today);

    let image_source = open_source(&source, &monitor)?;
    let policy = match &fallback {
        Some(location) => {
            let pb = spinner("Loading fallback image...");
            let grid = load_image(location)
                .with_context(|| format!("Failed to load fallback image {}", location))?;
            pb.finish_and_clear();
            FetchPolicy::Fallback(grid)
        }
        None => FetchPolicy::Strict,
    };

    let start = Instant::now();
    let pb = spinner(&format!(
        "Fetching {} monthly snapshots from {}...",
        series_config.months,
        image_source.name()
    ));
    let series = build_series(&series_config, today, image_source.as_ref(), &policy);
    pb.finish_and_clear();
    let series = series.context("Failed to build time series")?;
    info!("Series built in {:.2?}", start.elapsed());

    let report = analyze(&series, &params).context("Failed to analyze series")?;

    if json {
        let output = AnalysisOutput {
            coordinate: series_config.coordinate,
            source: image_source.name(),
            dates: series.dates(),
            fallback_months: series.fallback_count(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Location: {}", series_config.coordinate);
        print!("{}", render_report(&report, &series));
    }
    Ok(())
}

fn run_index(image: &str) -> Result<()> {
    let pb = spinner("Loading image...");
    let grid = load_image(image).with_context(|| format!("Failed to load image {}", image));
    pb.finish_and_clear();
    let grid = grid?;

    let start = Instant::now();
    let index = rgb_vegetation_index(&grid, &VisibleBandNir::default());
    info!("Index computed in {:.2?}", start.elapsed());
    let stats = index.statistics();

    println!("Image: {}", image);
    println!("Dimensions: {} x {} ({} cells)", index.cols(), index.rows(), index.len());
    let bounds = index.bounds();
    println!(
        "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
        bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
    );
    println!("\nVegetation index:");
    if let Some(min) = stats.min {
        println!("  Min: {:.4}", min);
    }
    if let Some(max) = stats.max {
        println!("  Max: {:.4}", max);
    }
    if let Some(mean) = stats.mean {
        println!("  Mean: {:.4}", mean);
    }
    if let Some(std_dev) = stats.std_dev {
        println!("  Std dev: {:.4}", std_dev);
    }
    Ok(())
}

fn run_dates(months: usize, today: Option<NaiveDate>) -> Result<()> {
    let dates = reference_dates(today_or(today), months).context("Invalid month count")?;
    for date in dates {
        println!("{}", date);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    match cli.command {
        Commands::Analyze {
            lat,
            lon,
            months,
            size,
            source,
            fallback,
            anomaly_factor,
            high_factor,
            config,
            json,
            today,
        } => run_analyze(
            SeriesOverrides {
                lat,
                lon,
                months,
                size,
            },
            AnalyzerOverrides {
                anomaly_factor,
                high_factor,
            },
            source,
            fallback,
            config,
            json,
            today,
        ),
        Commands::Index { image } => run_index(&image),
        Commands::Dates { months, today } => run_dates(months, today),
    }
}
