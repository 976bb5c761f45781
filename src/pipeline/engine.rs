//! Aggregation pipeline - orchestration layer
//!
//! ```text
//! Initializing           output schema + destination table (+ report file)
//!     ↓
//! EnumeratingDimensions  region ids (region mode) or {None}
//!     ↓
//! per region × TTM release × journey year:
//!     per aggregate field: BuildQuery → Execute → Collect
//!     ↓
//! Assembling             RawResultMatrix → Vec<OutputRow>
//!     ↓
//! Inserting              one INSERT per row (+ optional report line)
//!     ↓
//! Done | Failed
//! ```
//!
//! Work is strictly sequential over the single runner. A combination whose
//! source data is missing is skipped as a whole, so no row is ever inserted
//! with some of its aggregates absent. Any other error aborts the run; rows
//! already inserted stay in the table.

use super::plan::RunPlan;
use super::report::ReportWriter;
use crate::assembler::{RawResultMatrix, ResultAssembler};
use crate::catalog::output_schema;
use crate::db::{list_region_ids, QueryRunner, TableWriter};
use crate::error::AggregateResult;
use crate::query::QueryBuilder;
use crate::region::RegionId;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Initializing,
    EnumeratingDimensions,
    BuildQuery,
    Execute,
    Collect,
    Assembling,
    Inserting,
    Done,
    Failed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// (region, TTM release, journey year) combinations visited
    pub combinations: usize,
    /// Combinations skipped because their source data is missing
    pub skipped: usize,
    /// Combinations that ran but matched no journeys
    pub empty: usize,
    pub rows_inserted: usize,
}

pub struct AggregationPipeline<R: QueryRunner> {
    runner: R,
    plan: RunPlan,
    builder: QueryBuilder,
    assembler: ResultAssembler,
    report_path: Option<PathBuf>,
    state: PipelineState,
}

impl<R: QueryRunner> AggregationPipeline<R> {
    pub fn new(runner: R, plan: RunPlan) -> Self {
        let builder = QueryBuilder::new(plan.tables.clone());
        Self {
            runner,
            plan,
            builder,
            assembler: ResultAssembler::new(),
            report_path: None,
            state: PipelineState::Initializing,
        }
    }

    /// Mirror inserted rows to a report file. The file is only created once
    /// the destination table has been materialized.
    pub fn with_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Release the runner (and with it the connection)
    pub fn into_runner(self) -> R {
        self.runner
    }

    pub async fn run(&mut self) -> AggregateResult<RunSummary> {
        match self.execute_run().await {
            Ok(summary) => {
                self.transition(PipelineState::Done);
                Ok(summary)
            }
            Err(e) => {
                self.transition(PipelineState::Failed);
                Err(e)
            }
        }
    }

    async fn execute_run(&mut self) -> AggregateResult<RunSummary> {
        self.transition(PipelineState::Initializing);
        let breakdown = self.plan.breakdown;
        let schema = output_schema(breakdown.is_classified(), breakdown.has_regions())?;
        let table = TableWriter::new(self.plan.destination.clone(), schema.clone())?;
        table
            .materialize(&mut self.runner, self.plan.drop_existing)
            .await?;

        let mut report = match &self.report_path {
            Some(path) => Some(ReportWriter::create(path, &schema)?),
            None => None,
        };

        self.transition(PipelineState::EnumeratingDimensions);
        let regions: Vec<Option<RegionId>> = if breakdown.has_regions() {
            list_region_ids(&mut self.runner, &self.plan.tables.subregions)
                .await?
                .into_iter()
                .map(Some)
                .collect()
        } else {
            vec![None]
        };

        let ttm_years = self.plan.ttm_years.clone();
        let journey_years = self.plan.journey_years.clone();
        let mut summary = RunSummary::default();

        for region in &regions {
            for &ttm in &ttm_years {
                for &year in &journey_years {
                    summary.combinations += 1;
                    match region {
                        Some(id) => log::info!(
                            "Processing the {} TTM with {} journey data (region {})...",
                            ttm, year, id
                        ),
                        None => log::info!(
                            "Processing the {} TTM with {} journey data...",
                            ttm, year
                        ),
                    }

                    let matrix = match self.collect(ttm, year, *region).await {
                        Ok(matrix) => matrix,
                        Err(e) if e.is_skippable() => {
                            log::warn!("⚠️  Skipping TTM {} / {} journeys: {}", ttm, year, e);
                            summary.skipped += 1;
                            continue;
                        }
                        Err(e) => return Err(e),
                    };

                    self.transition(PipelineState::Assembling);
                    let rows = self.assembler.assemble(&matrix)?;
                    if rows.is_empty() {
                        log::info!("   └─ no matching journeys");
                        summary.empty += 1;
                        continue;
                    }

                    self.transition(PipelineState::Inserting);
                    for row in &rows {
                        table.insert(&mut self.runner, row).await?;
                        if let Some(report) = report.as_mut() {
                            report.write_row(row)?;
                        }
                    }
                    summary.rows_inserted += rows.len();
                    log::info!("   └─ ✅ inserted {} rows into {}", rows.len(), table.table());
                }
            }
        }

        if let Some(report) = report.as_mut() {
            report.flush()?;
        }

        Ok(summary)
    }

    /// Build and execute one query per aggregate field of a combination
    async fn collect(
        &mut self,
        ttm: u16,
        year: u16,
        region: Option<RegionId>,
    ) -> AggregateResult<RawResultMatrix> {
        let breakdown = self.plan.breakdown;
        let mut matrix = RawResultMatrix::new(ttm, year, breakdown)?;

        for field in breakdown.aggregate_fields() {
            self.transition(PipelineState::BuildQuery);
            let query = self
                .builder
                .build(ttm, year, &field, breakdown.is_classified(), region)?;

            self.transition(PipelineState::Execute);
            log::debug!("{} {:?}", query.sql, query.params);
            let rows = self.runner.run(&query.sql, &query.params).await?.into_rows();

            self.transition(PipelineState::Collect);
            matrix.push(field.column, &query, rows)?;
        }

        Ok(matrix)
    }

    fn transition(&mut self, next: PipelineState) {
        if self.state != next {
            log::trace!("pipeline state {:?} → {:?}", self.state, next);
            self.state = next;
        }
    }
}
