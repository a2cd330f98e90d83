#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the area map aggregation engine.
//!
//! Loads a sido's boundary dataset, then either aggregates scored
//! commercial areas per administrative dong or attaches store summaries to
//! dongs. Results are printed as JSON on stdout; logging goes to stderr and
//! is controlled by `RUST_LOG`.

mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use area_map_boundary::{BoundaryCache, BoundaryStore, paths};
use area_map_region_models::{PointRecord, SummaryRecord};
use area_map_spatial::ContainmentRule;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

#[derive(Parser)]
#[command(name = "area_map", about = "Region score aggregation tool")]
struct Cli {
    /// Directory containing the per-sido boundary `GeoJSON` files
    #[arg(long, global = true)]
    geojson_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate scored commercial areas per administrative dong
    Aggregate {
        /// Two-digit sido code (e.g. 11 for Seoul)
        #[arg(long)]
        sido: String,
        /// JSON array of point records (`code`, `lat`, `lng`, `score`)
        #[arg(long)]
        points: PathBuf,
        /// Which polygon rings decide containment
        #[arg(long, value_enum, default_value_t = Rule::Outer)]
        rule: Rule,
    },
    /// Attach store summaries to administrative dongs
    Match {
        /// Two-digit sido code (e.g. 41 for Gyeonggi)
        #[arg(long)]
        sido: String,
        /// JSON array of summary records
        #[arg(long)]
        summaries: PathBuf,
        /// Only accept exact code matches
        #[arg(long)]
        exact: bool,
    },
    /// List registered boundary sources
    Sources,
}

#[derive(Clone, Copy, ValueEnum)]
enum Rule {
    /// Test exterior rings only
    Outer,
    /// Exclude points that fall inside polygon holes
    ExcludeHoles,
}

impl From<Rule> for ContainmentRule {
    fn from(value: Rule) -> Self {
        match value {
            Rule::Outer => Self::OuterRing,
            Rule::ExcludeHoles => Self::ExcludeHoles,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let geojson_dir = cli.geojson_dir.unwrap_or_else(paths::geojson_dir);
    let store = BoundaryStore::new(Arc::new(BoundaryCache::new()), geojson_dir);

    match cli.command {
        Commands::Aggregate { sido, points, rule } => {
            let dataset = store.dataset(&sido)?;
            let points: Vec<PointRecord> = read_json(&points)?;
            let output = commands::aggregate(dataset, &points, rule.into());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Match {
            sido,
            summaries,
            exact,
        } => {
            let dataset = store.dataset(&sido)?;
            let summaries: Vec<SummaryRecord> = read_json(&summaries)?;
            let output = commands::match_summaries(dataset, &summaries, exact);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Sources => {
            log::info!("Boundary directory: {}", store.geojson_dir().display());
            for source in store.sources() {
                let present = store.geojson_dir().join(&source.file).is_file();
                println!(
                    "{}  {:<10} {:<16} {}{}",
                    source.code,
                    source.id,
                    source.name,
                    source.file,
                    if present { "" } else { "  (missing)" }
                );
            }
        }
    }

    Ok(())
}

/// Reads a JSON file into `T`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    Ok(value)
}
