//! Commuting-journey (YKR) data registry

use crate::error::{AggregateError, AggregateResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Journey years that have a matching TTM release
const TTM_RELEVANT_YEARS: &[u16] = &[2012, 2014, 2015, 2016];

/// Every journey year present in the source data
const ALL_YEARS: &[u16] = &[2007, 2009, 2010, 2012, 2014, 2015, 2016];

/// Journey table columns, in source order
pub static JOURNEY_FIELDS: &[&str] = &[
    "akunta",
    "tkunta",
    "vuosi",
    "matka",
    "yht",
    "a_alkut",
    "b_kaivos",
    "c_teoll",
    "d_infra1",
    "e_infra2",
    "f_rakent",
    "g_kauppa",
    "h_kulj",
    "i_majrav",
    "j_info",
    "k_raha",
    "l_kiint",
    "m_tekn",
    "n_halpa",
    "o_julk",
    "p_koul",
    "q_terv",
    "r_taide",
    "s_muupa",
    "t_koti",
    "u_kvjarj",
    "x_tuntem",
    "txyind",
    "axyind",
];

/// Journey column holding the all-industries journey count
pub const TOTAL_JOURNEYS_FIELD: &str = "yht";

/// Industry classification columns: one letter, underscore, 4+ alphanumerics.
/// This naming convention is the only thing separating them from structural
/// columns, so the minimum length must stay at four.
static INDUSTRY_FIELD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]_[a-zA-Z0-9]{4,}$").expect("static pattern"));

/// Journey years, either the TTM-relevant subset or the full history
pub fn journey_years(all: bool) -> Vec<u16> {
    if all {
        ALL_YEARS.to_vec()
    } else {
        TTM_RELEVANT_YEARS.to_vec()
    }
}

/// Validate a journey year against the full history
pub fn journey_year(year: u16) -> AggregateResult<u16> {
    if ALL_YEARS.contains(&year) {
        Ok(year)
    } else {
        Err(AggregateError::UnknownVintage(format!(
            "no journey data for {}",
            year
        )))
    }
}

pub fn journey_fields() -> &'static [&'static str] {
    JOURNEY_FIELDS
}

pub fn is_industry_field(name: &str) -> bool {
    INDUSTRY_FIELD_PATTERN.is_match(name)
}

/// Filter an arbitrary field list down to industry classification fields
pub fn filter_industry_fields<'a>(fields: &[&'a str]) -> Vec<&'a str> {
    fields
        .iter()
        .copied()
        .filter(|f| is_industry_field(f))
        .collect()
}

/// Industry classification fields of the journey table, in source order
pub fn industry_classification_fields() -> Vec<&'static str> {
    filter_industry_fields(journey_fields())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_filter_on_mixed_fields() {
        let fields = ["akunta", "tkunta", "vuosi", "matka", "yht", "a_alkut", "x_tuntem"];
        assert_eq!(filter_industry_fields(&fields), vec!["a_alkut", "x_tuntem"]);
    }

    #[test]
    fn test_classification_filter_is_idempotent() {
        let once = industry_classification_fields();
        let twice = filter_industry_fields(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_minimum_suffix_length() {
        assert!(is_industry_field("h_kulj"));
        assert!(!is_industry_field("h_kul"));
        assert!(!is_industry_field("ab_kulj"));
        assert!(!is_industry_field("txyind"));
    }

    #[test]
    fn test_industry_field_count() {
        let fields = industry_classification_fields();
        assert_eq!(fields.len(), 22);
        assert_eq!(fields.first(), Some(&"a_alkut"));
        assert_eq!(fields.last(), Some(&"x_tuntem"));
        assert!(!fields.contains(&TOTAL_JOURNEYS_FIELD));
    }

    #[test]
    fn test_industry_fields_drawn_from_journey_fields() {
        let journey = journey_fields();
        assert!(journey.contains(&TOTAL_JOURNEYS_FIELD));
        assert!(journey.contains(&"txyind"));

        let industries = industry_classification_fields();
        let mut positions = industries
            .iter()
            .map(|f| journey.iter().position(|j| j == f).unwrap());
        let mut last = positions.next().unwrap();
        for pos in positions {
            assert!(pos > last, "industry fields keep journey-table order");
            last = pos;
        }
    }

    #[test]
    fn test_journey_years() {
        assert_eq!(journey_years(false), vec![2012, 2014, 2015, 2016]);
        assert_eq!(journey_years(true).len(), 7);
        assert!(journey_years(true).starts_with(&[2007, 2009]));
    }

    #[test]
    fn test_journey_year_validation() {
        assert_eq!(journey_year(2009).unwrap(), 2009);
        assert!(matches!(
            journey_year(2011),
            Err(AggregateError::UnknownVintage(_))
        ));
    }
}
