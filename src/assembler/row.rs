//! Output row types

use crate::catalog::OutputSchema;
use crate::db::SqlValue;
use crate::error::{AggregateError, AggregateResult};
use crate::region::RegionDescriptor;
use serde::Serialize;

/// One aggregate value cell, labelled with its output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateValue {
    pub column: &'static str,
    pub value: Option<i64>,
}

/// One output table row: the aggregates of a single travel-time field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub measure: &'static str,
    pub ttm_year: u16,
    pub journey_year: u16,
    #[serde(flatten)]
    pub region: Option<RegionDescriptor>,
    pub values: Vec<AggregateValue>,
}

impl OutputRow {
    /// Render the row as insert parameters in schema column order.
    ///
    /// Fails with `ColumnMismatch` when the row does not fit the schema, so a
    /// row can never be inserted under a different column order than the one
    /// the table was created with.
    pub fn to_params(&self, schema: &OutputSchema) -> AggregateResult<Vec<SqlValue>> {
        let mut params = Vec::with_capacity(schema.len());
        params.push(SqlValue::from(self.measure));
        params.push(SqlValue::Integer(i64::from(self.ttm_year)));
        params.push(SqlValue::Integer(i64::from(self.journey_year)));

        match (&self.region, schema.breakdown().has_regions()) {
            (Some(region), true) => params.extend(region.to_values()),
            (None, false) => {}
            (Some(_), false) | (None, true) => {
                return Err(AggregateError::ColumnMismatch {
                    expected: schema.len(),
                    actual: params.len() + self.region_width() + self.values.len(),
                })
            }
        }

        let labels: Vec<&str> = self.values.iter().map(|v| v.column).collect();
        if labels != schema.aggregate_columns() {
            return Err(AggregateError::ColumnMismatch {
                expected: schema.len(),
                actual: params.len() + self.values.len(),
            });
        }
        params.extend(self.values.iter().map(|v| SqlValue::from(v.value)));

        if params.len() != schema.len() {
            return Err(AggregateError::ColumnMismatch {
                expected: schema.len(),
                actual: params.len(),
            });
        }
        Ok(params)
    }

    fn region_width(&self) -> usize {
        if self.region.is_some() {
            RegionDescriptor::WIDTH
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::output_schema;

    fn total_row(region: Option<RegionDescriptor>) -> OutputRow {
        OutputRow {
            measure: "walk_t",
            ttm_year: 2013,
            journey_year: 2014,
            region,
            values: vec![AggregateValue {
                column: "total",
                value: Some(1200),
            }],
        }
    }

    #[test]
    fn test_params_follow_schema_order() {
        let schema = output_schema(false, false).unwrap();
        let params = total_row(None).to_params(&schema).unwrap();
        assert_eq!(
            params,
            vec![
                SqlValue::Text("walk_t".into()),
                SqlValue::Integer(2013),
                SqlValue::Integer(2014),
                SqlValue::Integer(1200),
            ]
        );
    }

    #[test]
    fn test_region_params() {
        let schema = output_schema(false, true).unwrap();
        let region = RegionDescriptor {
            mun: 11,
            area: 22,
            dist: 33,
            reg_id: 44,
        };
        let params = total_row(Some(region)).to_params(&schema).unwrap();
        assert_eq!(params.len(), schema.len());
        assert_eq!(
            params[3..7],
            [
                SqlValue::Integer(11),
                SqlValue::Integer(22),
                SqlValue::Integer(33),
                SqlValue::Integer(44)
            ]
        );
    }

    #[test]
    fn test_mismatched_row_rejected() {
        let region_schema = output_schema(false, true).unwrap();
        assert!(matches!(
            total_row(None).to_params(&region_schema),
            Err(AggregateError::ColumnMismatch { .. })
        ));

        let classified_schema = output_schema(true, false).unwrap();
        assert!(matches!(
            total_row(None).to_params(&classified_schema),
            Err(AggregateError::ColumnMismatch { .. })
        ));
    }

    #[test]
    fn test_null_sum_becomes_null_param() {
        let schema = output_schema(false, false).unwrap();
        let mut row = total_row(None);
        row.values[0].value = None;
        assert_eq!(row.to_params(&schema).unwrap()[3], SqlValue::Null);
    }
}
