//! Aggregation pipeline
//!
//! - `plan` - validated run parameters (destination, breakdown, years, tables)
//! - `engine` - the sequential build → execute → assemble → insert loop
//! - `report` - optional TSV / JSONL mirror of the inserted rows

pub mod engine;
pub mod plan;
pub mod report;

pub use engine::{AggregationPipeline, PipelineState, RunSummary};
pub use plan::RunPlan;
pub use report::{ReportFormat, ReportWriter};
