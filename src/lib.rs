//! Weighted travel-time aggregation over Travel Time Matrix releases
//!
//! For every TTM release and commuting-journey year, sums each travel-time
//! field weighted by journey counts (overall, per industry, or per
//! subregion) and stores one row per travel-time field in an output table.
//!
//! # Architecture
//!
//! ```text
//! catalog (field registries, output schema)
//!     ↓
//! query::QueryBuilder (weighted-sum SQL, validated identifiers)
//!     ↓
//! db::QueryRunner → SqliteRunner
//!     ↓
//! assembler::ResultAssembler ([aggregate][row][field] → OutputRow)
//!     ↓
//! db::TableWriter (CREATE / INSERT) + pipeline::ReportWriter
//! ```
//!
//! `pipeline::AggregationPipeline` drives the whole run.

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod region;

pub use error::{AggregateError, AggregateResult};
