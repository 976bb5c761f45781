//! Run plan - everything a run needs, validated before any query executes

use crate::catalog::{journey_year, journey_years, ttm_vintage, ttm_years, Breakdown};
use crate::error::AggregateResult;
use crate::query::{Identifier, SourceTables};

#[derive(Debug, Clone)]
pub struct RunPlan {
    pub destination: Identifier,
    pub drop_existing: bool,
    pub breakdown: Breakdown,
    pub ttm_years: Vec<u16>,
    pub journey_years: Vec<u16>,
    pub tables: SourceTables,
}

impl RunPlan {
    /// Plan a run over every registered TTM release and the TTM-relevant
    /// journey years
    pub fn new(destination: &str, classified: bool, regions: bool) -> AggregateResult<Self> {
        Ok(Self {
            destination: Identifier::destination(destination)?,
            drop_existing: false,
            breakdown: Breakdown::from_flags(classified, regions)?,
            ttm_years: ttm_years(),
            journey_years: journey_years(false),
            tables: SourceTables::default(),
        })
    }

    pub fn with_drop_existing(mut self, drop_existing: bool) -> Self {
        self.drop_existing = drop_existing;
        self
    }

    pub fn with_all_journey_years(mut self, all: bool) -> Self {
        self.journey_years = journey_years(all);
        self
    }

    /// Restrict the run to the given TTM releases. An empty list keeps the
    /// current selection.
    pub fn with_ttm_years(mut self, years: &[u16]) -> AggregateResult<Self> {
        if !years.is_empty() {
            for year in years {
                ttm_vintage(*year)?;
            }
            self.ttm_years = dedup_sorted(years);
        }
        Ok(self)
    }

    /// Restrict the run to the given journey years. An empty list keeps the
    /// current selection.
    pub fn with_journey_years(mut self, years: &[u16]) -> AggregateResult<Self> {
        if !years.is_empty() {
            for year in years {
                journey_year(*year)?;
            }
            self.journey_years = dedup_sorted(years);
        }
        Ok(self)
    }

    pub fn with_tables(mut self, tables: SourceTables) -> Self {
        self.tables = tables;
        self
    }
}

fn dedup_sorted(years: &[u16]) -> Vec<u16> {
    let mut years = years.to_vec();
    years.sort_unstable();
    years.dedup();
    years
}
