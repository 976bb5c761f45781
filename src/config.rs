use crate::error::AggregateResult;
use crate::query::tables::{
    DEFAULT_JOURNEY_TABLE, DEFAULT_SUBREGION_TABLE, DEFAULT_TTM_TABLE_PREFIX,
};
use crate::query::SourceTables;
use std::env;
use std::path::PathBuf;

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub db_path: PathBuf,
    pub tables: SourceTables,
}

impl AggregateConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `TTM_DB_PATH` (default: data/tt.db)
    /// - `TTM_TABLE_PREFIX` (default: hcr_journeys_t_d_)
    /// - `JOURNEY_TABLE` (default: hcr_msssuf_journeys)
    /// - `SUBREGION_TABLE` (default: hcr_subregions)
    ///
    /// Table names must pass the identifier allow-list.
    pub fn from_env() -> AggregateResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AggregateResult<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let tables = SourceTables::new(
            &var("TTM_TABLE_PREFIX", DEFAULT_TTM_TABLE_PREFIX),
            &var("JOURNEY_TABLE", DEFAULT_JOURNEY_TABLE),
            &var("SUBREGION_TABLE", DEFAULT_SUBREGION_TABLE),
        )?;

        Ok(Self {
            db_path: var("TTM_DB_PATH", "data/tt.db").into(),
            tables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AggregateError;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AggregateConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.db_path, PathBuf::from("data/tt.db"));
        assert_eq!(config.tables, SourceTables::default());
    }

    #[test]
    fn test_custom_config() {
        let vars: HashMap<&str, &str> = [
            ("TTM_DB_PATH", "/tmp/ttm.db"),
            ("TTM_TABLE_PREFIX", "ttm_"),
            ("JOURNEY_TABLE", "ykr_journeys"),
        ]
        .into_iter()
        .collect();

        let config = AggregateConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/ttm.db"));
        assert_eq!(config.tables.ttm_table(2018).unwrap().as_str(), "ttm_2018");
        assert_eq!(config.tables.journeys.as_str(), "ykr_journeys");
        assert_eq!(config.tables.subregions.as_str(), "hcr_subregions");
    }

    #[test]
    fn test_unsafe_table_name_rejected() {
        let err = AggregateConfig::from_lookup(|k| {
            (k == "SUBREGION_TABLE").then(|| "sub; DROP TABLE x".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, AggregateError::IdentifierInjectionRisk(_)));
    }
}
