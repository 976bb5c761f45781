//! TTM Aggregate Binary - weighted travel-time aggregate tables
//!
//! Joins every Travel Time Matrix release with commuting-journey data and
//! stores journey-weighted sums of each travel-time field in a new table.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin ttm_aggregate -- ttm_totals
//! cargo run --release --bin ttm_aggregate -- ttm_industries --classified --drop
//! cargo run --release --bin ttm_aggregate -- ttm_regions --regions --report out/regions.tsv
//! ```
//!
//! ## Environment Variables
//!
//! - TTM_DB_PATH - SQLite database path (default: data/tt.db)
//! - TTM_TABLE_PREFIX - TTM table name prefix (default: hcr_journeys_t_d_)
//! - JOURNEY_TABLE - Journey table (default: hcr_msssuf_journeys)
//! - SUBREGION_TABLE - Subregion lookup table (default: hcr_subregions)
//! - RUST_LOG - Logging level (optional, default: info)

use clap::Parser;
use std::path::PathBuf;
use ttm_aggregate::config::AggregateConfig;
use ttm_aggregate::db::{QueryRunner, SqliteRunner};
use ttm_aggregate::pipeline::{AggregationPipeline, RunPlan};
use ttm_aggregate::query::Identifier;

#[derive(Debug, Parser)]
#[command(name = "ttm_aggregate", about = "Create Travel Time Matrix aggregate tables.")]
struct Args {
    /// Destination table (lowercase letters, digits and underscores, 3+ chars)
    #[arg(value_parser = parse_table_name)]
    table: String,

    /// Drop the destination table first if it already exists
    #[arg(long)]
    drop: bool,

    /// One aggregate column per industry classification
    #[arg(long, conflicts_with = "regions")]
    classified: bool,

    /// Break the totals down by subregion
    #[arg(long)]
    regions: bool,

    /// Use every journey year, not only those with a matching TTM release
    #[arg(long)]
    all_years: bool,

    /// Restrict to these TTM releases (repeatable)
    #[arg(long = "ttm-year")]
    ttm_years: Vec<u16>,

    /// Restrict to these journey years (repeatable)
    #[arg(long = "journey-year")]
    journey_years: Vec<u16>,

    /// SQLite database path (overrides TTM_DB_PATH)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Also write the rows to a report file (.tsv, or .jsonl for JSON Lines)
    #[arg(long)]
    report: Option<PathBuf>,
}

fn parse_table_name(raw: &str) -> Result<String, String> {
    Identifier::destination(raw)
        .map(|_| raw.to_string())
        .map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        log::error!("❌ {}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = AggregateConfig::from_env()?;
    let db_path = args.db.clone().unwrap_or(config.db_path);

    let plan = RunPlan::new(&args.table, args.classified, args.regions)?
        .with_drop_existing(args.drop)
        .with_all_journey_years(args.all_years)
        .with_ttm_years(&args.ttm_years)?
        .with_journey_years(&args.journey_years)?
        .with_tables(config.tables);

    log::info!("🚀 Starting TTM aggregation");
    log::info!("   Database: {}", db_path.display());
    log::info!("   Destination: {} (drop existing: {})", plan.destination, plan.drop_existing);
    log::info!("   Breakdown: {}", plan.breakdown.as_str());
    log::info!("   TTM releases: {:?}", plan.ttm_years);
    log::info!("   Journey years: {:?}", plan.journey_years);

    let runner = SqliteRunner::open(&db_path)?;
    log::info!("📊 Backend: {}", runner.backend_type());

    let mut pipeline = AggregationPipeline::new(runner, plan);
    if let Some(path) = args.report {
        pipeline = pipeline.with_report(path);
    }

    let summary = pipeline.run().await?;

    log::info!(
        "✅ Done: {} combinations, {} skipped, {} empty, {} rows inserted",
        summary.combinations,
        summary.skipped,
        summary.empty,
        summary.rows_inserted
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_table_name_accepted() {
        let args = Args::try_parse_from(["ttm_aggregate", "ttm_totals", "--drop"]).unwrap();
        assert_eq!(args.table, "ttm_totals");
        assert!(args.drop);
    }

    #[test]
    fn test_bad_table_names_are_usage_errors() {
        for name in ["2018_out", "ab", "TTM_Totals", "ttm;drop"] {
            let err = Args::try_parse_from(["ttm_aggregate", name]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{}", name);
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_breakdowns_conflict() {
        let err = Args::try_parse_from(["ttm_aggregate", "ttm_out", "--classified", "--regions"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
}
