//! Source table names, validated once at startup

use super::identifier::Identifier;
use crate::error::AggregateResult;

pub const DEFAULT_TTM_TABLE_PREFIX: &str = "hcr_journeys_t_d_";
pub const DEFAULT_JOURNEY_TABLE: &str = "hcr_msssuf_journeys";
pub const DEFAULT_SUBREGION_TABLE: &str = "hcr_subregions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTables {
    /// TTM tables are named `<prefix><release year>`
    pub ttm_prefix: Identifier,
    pub journeys: Identifier,
    pub subregions: Identifier,
}

impl SourceTables {
    pub fn new(ttm_prefix: &str, journeys: &str, subregions: &str) -> AggregateResult<Self> {
        Ok(Self {
            ttm_prefix: Identifier::new(ttm_prefix)?,
            journeys: Identifier::new(journeys)?,
            subregions: Identifier::new(subregions)?,
        })
    }

    pub fn ttm_table(&self, year: u16) -> AggregateResult<Identifier> {
        self.ttm_prefix.with_suffix(year)
    }
}

impl Default for SourceTables {
    fn default() -> Self {
        Self {
            ttm_prefix: Identifier(DEFAULT_TTM_TABLE_PREFIX.to_string()),
            journeys: Identifier(DEFAULT_JOURNEY_TABLE.to_string()),
            subregions: Identifier(DEFAULT_SUBREGION_TABLE.to_string()),
        }
    }
}
