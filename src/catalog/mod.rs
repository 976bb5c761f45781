//! Schema catalog - static registry of source and output field lists
//!
//! ```text
//! TTM_VINTAGES (per-release travel fields)   JOURNEY_FIELDS (YKR columns)
//!            ↓                                        ↓
//!      travel_fields()              industry_classification_fields()
//!            ↓                                        ↓
//!            └────────────→ output_schema() ←─────────┘
//! ```

pub mod journeys;
pub mod schema;
pub mod vintages;

pub use journeys::{
    industry_classification_fields, journey_fields, journey_year, journey_years,
    TOTAL_JOURNEYS_FIELD,
};
pub use schema::{
    output_schema, AggregateField, Breakdown, Column, ColumnType, OutputSchema, REGION_COLUMNS,
};
pub use vintages::{travel_fields, ttm_vintage, ttm_years, TtmVintage, TTM_VINTAGES};
