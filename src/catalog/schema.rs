//! Output table schema derivation
//!
//! The same `OutputSchema` value drives `CREATE TABLE` and every `INSERT` of a
//! run, so column order and count cannot drift between the two.

use super::journeys::{industry_classification_fields, TOTAL_JOURNEYS_FIELD};
use crate::error::{AggregateError, AggregateResult};

/// Leading columns present in every output table
pub const KEY_COLUMNS: [&str; 3] = ["measure", "ttm_year", "journey_year"];

/// Region descriptor columns, in the order they follow the key columns
pub const REGION_COLUMNS: [&str; 4] = ["mun", "area", "dist", "reg_id"];

/// Output column for the all-industries aggregate
pub const TOTAL_COLUMN: &str = "total";

/// Breakdown of the weighted aggregate. The modes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakdown {
    /// One weighted sum over all journeys
    Total,
    /// One weighted sum per industry classification field
    Classified,
    /// One weighted total per subregion
    Region,
}

impl Breakdown {
    /// Resolve the two CLI flags into a breakdown mode
    pub fn from_flags(classified: bool, regions: bool) -> AggregateResult<Self> {
        match (classified, regions) {
            (true, true) => Err(AggregateError::InvalidConfiguration(
                "industry classification and region breakdowns are mutually exclusive".to_string(),
            )),
            (true, false) => Ok(Breakdown::Classified),
            (false, true) => Ok(Breakdown::Region),
            (false, false) => Ok(Breakdown::Total),
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Breakdown::Classified)
    }

    pub fn has_regions(&self) -> bool {
        matches!(self, Breakdown::Region)
    }

    /// Aggregate columns computed in this mode, each paired with the journey
    /// column used as its weight
    pub fn aggregate_fields(&self) -> Vec<AggregateField> {
        match self {
            Breakdown::Total | Breakdown::Region => vec![AggregateField {
                column: TOTAL_COLUMN,
                weight: TOTAL_JOURNEYS_FIELD,
            }],
            Breakdown::Classified => industry_classification_fields()
                .into_iter()
                .map(|field| AggregateField {
                    column: field,
                    weight: field,
                })
                .collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakdown::Total => "total",
            Breakdown::Classified => "industry-classified",
            Breakdown::Region => "region",
        }
    }
}

/// One aggregate value column of the output table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateField {
    /// Output column name
    pub column: &'static str,
    /// Journey column the travel fields are weighted by
    pub weight: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    BigInt,
}

impl ColumnType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    breakdown: Breakdown,
    columns: Vec<Column>,
}

impl OutputSchema {
    pub fn for_breakdown(breakdown: Breakdown) -> Self {
        let mut columns = vec![
            Column {
                name: KEY_COLUMNS[0],
                kind: ColumnType::Text,
            },
            Column {
                name: KEY_COLUMNS[1],
                kind: ColumnType::Integer,
            },
            Column {
                name: KEY_COLUMNS[2],
                kind: ColumnType::Integer,
            },
        ];

        if breakdown.has_regions() {
            for name in REGION_COLUMNS {
                let kind = if name == "reg_id" {
                    ColumnType::BigInt
                } else {
                    ColumnType::Integer
                };
                columns.push(Column { name, kind });
            }
        }

        columns.extend(breakdown.aggregate_fields().into_iter().map(|field| Column {
            name: field.column,
            kind: ColumnType::BigInt,
        }));

        Self { breakdown, columns }
    }

    pub fn breakdown(&self) -> Breakdown {
        self.breakdown
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Names of the aggregate value columns, in schema order
    pub fn aggregate_columns(&self) -> Vec<&'static str> {
        self.breakdown
            .aggregate_fields()
            .into_iter()
            .map(|f| f.column)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Output schema for the given flag combination
pub fn output_schema(classified: bool, with_regions: bool) -> AggregateResult<OutputSchema> {
    Breakdown::from_flags(classified, with_regions).map(OutputSchema::for_breakdown)
}
