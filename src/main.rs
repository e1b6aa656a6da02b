use anyhow::{bail, Context, Result};
use clap::Parser;
use gpxredact_filter::process;
use gpxredact_region::{parse_skip_area, Region, RegionSet, RegionsConfig};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

/// gpxredact - remove track points inside exclusion regions from GPX files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input GPX file
    input: PathBuf,

    /// Output GPX file (defaults to <input>_safe.<ext> next to the input)
    output: Option<PathBuf>,

    /// Area (lat1,lon1,lat2,lon2,...) to exclude from the resulting GPX
    /// file. Two points denote the top-left and bottom-right corners of a
    /// rectangle; three or more denote a polygon in vertex order. May be
    /// repeated.
    #[arg(long = "skip-area", value_name = "COORDS")]
    skip_areas: Vec<String>,

    /// YAML file with additional region specifications
    #[arg(long, value_name = "PATH")]
    regions_file: Option<PathBuf>,

    /// Log every suppressed track point with its coordinates
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let regions = build_region_set(&args)?;
    if regions.is_empty() {
        bail!("no exclusion regions supplied; pass --skip-area or --regions-file");
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| safe_file_name(&args.input));

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input file: {}", args.input.display()))?;
    let output = File::create(&output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;

    let report = process(BufReader::new(input), BufWriter::new(output), &regions)
        .with_context(|| format!("Failed to filter {}", args.input.display()))?;

    info!(
        suppressed = report.suppressed_points,
        output = %output_path.display(),
        "Finished filtering"
    );

    Ok(())
}

/// Assemble the region set from repeated --skip-area flags and the
/// optional YAML regions file
fn build_region_set(args: &Args) -> Result<RegionSet> {
    let mut regions = Vec::new();

    for spec in &args.skip_areas {
        let points = parse_skip_area(spec)
            .with_context(|| format!("Invalid --skip-area specification: {spec}"))?;
        regions.push(Region::from_vertices(points)?);
    }

    if let Some(path) = &args.regions_file {
        let config = RegionsConfig::from_file(path)?;
        regions.extend(config.into_regions()?);
    }

    Ok(RegionSet::new(regions))
}

/// Derive the default output name: `track.gpx` becomes `track_safe.gpx`
fn safe_file_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_safe.{ext}"),
        None => format!("{stem}_safe"),
    };
    input.with_file_name(name)
}
