//! Result assembler - transposes per-aggregate result sets into output rows
//!
//! The pipeline issues one query per aggregate field, so the raw data is
//! shaped `[aggregate][row][travel field]`. Output rows are keyed by travel
//! field (and region), with one value per aggregate:
//!
//! ```text
//! total:    [walk_t, walk_d, ...]          walk_t | total | a_alkut | ...
//! a_alkut:  [walk_t, walk_d, ...]    →     walk_d | total | a_alkut | ...
//! ...                                      ...
//! ```
//!
//! Region-mode rows are matched across aggregates by their region
//! descriptor rather than by position.

use super::row::{AggregateValue, OutputRow};
use crate::catalog::{travel_fields, Breakdown};
use crate::db::SqlValue;
use crate::error::{AggregateError, AggregateResult};
use crate::query::BuiltQuery;
use crate::region::RegionDescriptor;
use std::collections::HashMap;

type RowKey = Option<RegionDescriptor>;

/// Result sets collected for one (TTM release, journey year, region) combination
#[derive(Debug, Clone)]
pub struct RawResultMatrix {
    pub ttm_year: u16,
    pub journey_year: u16,
    pub breakdown: Breakdown,
    fields: &'static [&'static str],
    results: Vec<(&'static str, Vec<Vec<SqlValue>>)>,
}

impl RawResultMatrix {
    pub fn new(ttm_year: u16, journey_year: u16, breakdown: Breakdown) -> AggregateResult<Self> {
        Ok(Self {
            ttm_year,
            journey_year,
            breakdown,
            fields: travel_fields(ttm_year)?,
            results: Vec::new(),
        })
    }

    /// Record the rows returned for one aggregate column
    pub fn push(
        &mut self,
        column: &'static str,
        query: &BuiltQuery,
        rows: Vec<Vec<SqlValue>>,
    ) -> AggregateResult<()> {
        if query.fields != self.fields {
            return Err(AggregateError::UnexpectedValue(format!(
                "query for {} was built for a different field list than TTM {}",
                column, self.ttm_year
            )));
        }
        if query.region.is_some() != self.breakdown.has_regions() {
            return Err(AggregateError::InvalidConfiguration(format!(
                "{} query does not match the {} breakdown",
                column,
                self.breakdown.as_str()
            )));
        }
        self.results.push((column, rows));
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ResultAssembler;

impl ResultAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, matrix: &RawResultMatrix) -> AggregateResult<Vec<OutputRow>> {
        let width = matrix.fields.len();
        let mut keys: Vec<RowKey> = Vec::new();
        let mut sums: Vec<HashMap<RowKey, Vec<Option<i64>>>> =
            Vec::with_capacity(matrix.results.len());

        for (column, rows) in &matrix.results {
            let mut by_key = HashMap::with_capacity(rows.len());

            for row in rows {
                let (cells, key) = if matrix.breakdown.has_regions() {
                    let (cells, region) = RegionDescriptor::split_row(row)?;
                    (cells, Some(region))
                } else {
                    (row.as_slice(), None)
                };

                if cells.len() != width {
                    return Err(AggregateError::UnexpectedValue(format!(
                        "{} row has {} sums, TTM {} declares {} fields",
                        column,
                        cells.len(),
                        matrix.ttm_year,
                        width
                    )));
                }

                let values = cells
                    .iter()
                    .map(SqlValue::as_sum)
                    .collect::<AggregateResult<Vec<_>>>()?;

                // SUM over an empty join yields a single all-NULL row
                if values.iter().all(Option::is_none) {
                    continue;
                }

                if by_key.insert(key, values).is_some() {
                    return Err(AggregateError::UnexpectedValue(format!(
                        "{} returned more than one row for {:?}",
                        column, key
                    )));
                }
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }

            sums.push(by_key);
        }

        let mut output = Vec::with_capacity(keys.len() * width);
        for key in &keys {
            for (idx, field) in matrix.fields.iter().enumerate() {
                let values = matrix
                    .results
                    .iter()
                    .zip(&sums)
                    .map(|((column, _), by_key)| AggregateValue {
                        column: *column,
                        value: by_key.get(key).and_then(|v| v[idx]),
                    })
                    .collect();

                output.push(OutputRow {
                    measure: *field,
                    ttm_year: matrix.ttm_year,
                    journey_year: matrix.journey_year,
                    region: *key,
                    values,
                });
            }
        }

        log::debug!(
            "Assembled {} rows for TTM {} / {} journeys ({} aggregates, {} keys)",
            output.len(),
            matrix.ttm_year,
            matrix.journey_year,
            matrix.results.len(),
            keys.len()
        );

        Ok(output)
    }
}
