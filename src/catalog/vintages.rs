//! Travel Time Matrix release registry
//!
//! Each TTM release adds travel modes, so the field list is versioned by
//! release year. Field order is the output row order: every field becomes one
//! output row identified by its name. Grid keys (`from_id`, `to_id`) are not
//! measures and are left out.
//!
//! Adding a release means adding one `TtmVintage` entry to `TTM_VINTAGES`.

use crate::error::{AggregateError, AggregateResult};

/// One TTM release and the travel-time/distance columns it ships
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtmVintage {
    pub year: u16,
    pub travel_fields: &'static [&'static str],
}

pub static TTM_VINTAGES: &[TtmVintage] = &[
    TtmVintage {
        year: 2013,
        travel_fields: &[
            "walk_t",
            "walk_d",
            "pt_m_tt",
            "pt_m_t",
            "pt_m_d",
            "car_m_t",
            "car_m_d",
        ],
    },
    TtmVintage {
        year: 2015,
        travel_fields: &[
            "walk_t",
            "walk_d",
            "pt_r_tt",
            "pt_r_t",
            "pt_r_d",
            "pt_m_tt",
            "pt_m_t",
            "pt_m_d",
            "car_r_t",
            "car_r_d",
            "car_m_t",
            "car_m_d",
        ],
    },
    TtmVintage {
        year: 2018,
        travel_fields: &[
            "walk_t",   // Walking time
            "walk_d",   // Walking distance
            "bike_s_t", // Cycling time, standard speed
            "bike_f_t", // Cycling time, fast speed
            "bike_d",   // Cycling distance
            "pt_r_tt",  // Rush-hour PT time incl. initial wait
            "pt_r_t",   // Rush-hour PT time excl. initial wait
            "pt_r_d",   // Rush-hour PT distance
            "pt_m_tt",  // Midday PT time incl. initial wait
            "pt_m_t",   // Midday PT time excl. initial wait
            "pt_m_d",   // Midday PT distance
            "car_r_t",  // Rush-hour car time
            "car_r_d",  // Rush-hour car distance
            "car_m_t",  // Midday car time
            "car_m_d",  // Midday car distance
            "car_sl_t", // Car time from speed limits only
        ],
    },
];

/// Registered TTM release years, oldest first
pub fn ttm_years() -> Vec<u16> {
    TTM_VINTAGES.iter().map(|v| v.year).collect()
}

/// Look up a release by year
pub fn ttm_vintage(year: u16) -> AggregateResult<&'static TtmVintage> {
    TTM_VINTAGES
        .iter()
        .find(|v| v.year == year)
        .ok_or_else(|| AggregateError::UnknownVintage(format!("no TTM release for {}", year)))
}

/// Ordered travel-time field names of a release
pub fn travel_fields(year: u16) -> AggregateResult<&'static [&'static str]> {
    ttm_vintage(year).map(|v| v.travel_fields)
}
