//! Weighted-sum aggregation query builder
//!
//! Emits one query per (TTM release, journey year, aggregate field, region).
//! Travel-field sums appear in `travel_fields()` order and the field list is
//! returned alongside the SQL, so the assembler never has to guess what a
//! result position means.

use super::identifier::Identifier;
use super::tables::SourceTables;
use crate::catalog::{travel_fields, AggregateField, REGION_COLUMNS};
use crate::db::SqlValue;
use crate::error::AggregateResult;
use crate::region::RegionId;

/// Classified aggregates only count journey cells with at least this many
/// journeys. Undocumented upstream business rule, kept as-is.
pub const MIN_CLASSIFIED_JOURNEYS: i64 = 10;

/// Sex/gender code for "both sexes combined" in the journey data
pub const BOTH_SEXES_CODE: &str = "0";

/// Journey column matched against the subregion grid cell (home location)
const REGION_JOIN_FIELD: &str = "txyind";

/// A rendered query plus everything needed to interpret its result rows
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    /// Bound in order: journey year (text), sex code
    pub params: Vec<SqlValue>,
    /// Travel fields, one per leading result column
    pub fields: &'static [&'static str],
    pub region: Option<RegionId>,
}

impl BuiltQuery {
    /// Number of result columns each row carries
    pub fn row_width(&self) -> usize {
        self.fields.len() + if self.region.is_some() { REGION_COLUMNS.len() } else { 0 }
    }
}

pub struct QueryBuilder {
    tables: SourceTables,
}

impl QueryBuilder {
    pub fn new(tables: SourceTables) -> Self {
        Self { tables }
    }

    pub fn build(
        &self,
        ttm_year: u16,
        journey_year: u16,
        aggregate: &AggregateField,
        classified: bool,
        region: Option<RegionId>,
    ) -> AggregateResult<BuiltQuery> {
        let fields = travel_fields(ttm_year)?;
        let ttm_table = self.tables.ttm_table(ttm_year)?;
        let journeys = &self.tables.journeys;
        let weight = Identifier::new(aggregate.weight)?;

        let mut select = Vec::with_capacity(fields.len() + REGION_COLUMNS.len());
        for field in fields {
            let field = Identifier::new(*field)?;
            select.push(format!("SUM(t.{field} * j.{weight}) AS {field}"));
        }
        let region_columns: Vec<String> = REGION_COLUMNS
            .iter()
            .map(|col| format!("sr.{}", col))
            .collect();
        if region.is_some() {
            select.extend(region_columns.iter().cloned());
        }

        let mut sql = format!(
            "SELECT {} FROM {ttm_table} t \
             INNER JOIN {journeys} j ON t.id = j.id AND t.vuosi = j.vuosi",
            select.join(", ")
        );

        if region.is_some() {
            sql.push_str(&format!(
                " INNER JOIN {} sr ON j.{} = sr.xyind",
                self.tables.subregions, REGION_JOIN_FIELD
            ));
        }

        sql.push_str(" WHERE t.vuosi = ?1 AND t.sp = ?2");

        if classified {
            sql.push_str(&format!(" AND j.{weight} >= {}", MIN_CLASSIFIED_JOURNEYS));
        }

        if let Some(region_id) = region {
            // RegionId is an integer, so rendering it cannot inject SQL
            sql.push_str(&format!(
                " AND sr.reg_id = {} GROUP BY {}",
                region_id.0,
                region_columns.join(", ")
            ));
        }

        Ok(BuiltQuery {
            sql,
            params: vec![
                SqlValue::Text(journey_year.to_string()),
                SqlValue::Text(BOTH_SEXES_CODE.to_string()),
            ],
            fields,
            region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{industry_classification_fields, Breakdown};
    use crate::error::AggregateError;

    fn total() -> AggregateField {
        Breakdown::Total.aggregate_fields()[0]
    }

    #[test]
    fn test_total_query_shape() {
        let builder = QueryBuilder::new(SourceTables::default());
        let query = builder.build(2013, 2014, &total(), false, None).unwrap();

        assert!(query.sql.starts_with(
            "SELECT SUM(t.walk_t * j.yht) AS walk_t, SUM(t.walk_d * j.yht) AS walk_d,"
        ));
        assert!(query
            .sql
            .contains("FROM hcr_journeys_t_d_2013 t INNER JOIN hcr_msssuf_journeys j"));
        assert!(query.sql.ends_with("WHERE t.vuosi = ?1 AND t.sp = ?2"));
        assert!(!query.sql.contains("GROUP BY"));
        assert_eq!(
            query.params,
            vec![SqlValue::Text("2014".into()), SqlValue::Text("0".into())]
        );
        assert_eq!(query.fields.len(), 7);
        assert_eq!(query.row_width(), 7);
    }

    #[test]
    fn test_sum_columns_follow_field_order() {
        let builder = QueryBuilder::new(SourceTables::default());
        let query = builder.build(2018, 2016, &total(), false, None).unwrap();

        let mut last = 0;
        for field in query.fields {
            let pos = query
                .sql
                .find(&format!("AS {},", field))
                .or_else(|| query.sql.find(&format!("AS {} ", field)))
                .unwrap();
            assert!(pos > last, "{} out of order", field);
            last = pos;
        }
    }

    #[test]
    fn test_classified_guard() {
        let builder = QueryBuilder::new(SourceTables::default());
        let field = AggregateField {
            column: industry_classification_fields()[0],
            weight: industry_classification_fields()[0],
        };
        let query = builder.build(2015, 2015, &field, true, None).unwrap();

        assert!(query.sql.contains("SUM(t.walk_t * j.a_alkut) AS walk_t"));
        assert!(query.sql.ends_with("AND j.a_alkut >= 10"));
        assert_eq!(query.params.len(), 2);
    }

    #[test]
    fn test_region_query_shape() {
        let builder = QueryBuilder::new(SourceTables::default());
        let query = builder
            .build(2013, 2012, &total(), false, Some(RegionId(44)))
            .unwrap();

        assert!(query.sql.contains("AS car_m_d, sr.mun, sr.area, sr.dist, sr.reg_id FROM"));
        assert!(query.sql.contains("INNER JOIN hcr_subregions sr ON j.txyind = sr.xyind"));
        assert!(query
            .sql
            .ends_with("AND sr.reg_id = 44 GROUP BY sr.mun, sr.area, sr.dist, sr.reg_id"));
        assert_eq!(query.params.len(), 2);
        assert_eq!(query.row_width(), 11);
    }

    #[test]
    fn test_unknown_release() {
        let builder = QueryBuilder::new(SourceTables::default());
        let err = builder.build(2020, 2014, &total(), false, None).unwrap_err();
        assert!(matches!(err, AggregateError::UnknownVintage(_)));
    }

    #[test]
    fn test_unsafe_weight_rejected() {
        let builder = QueryBuilder::new(SourceTables::default());
        let field = AggregateField {
            column: "total",
            weight: "yht) FROM x; --",
        };
        let err = builder.build(2013, 2014, &field, false, None).unwrap_err();
        assert!(matches!(err, AggregateError::IdentifierInjectionRisk(_)));
    }
}
