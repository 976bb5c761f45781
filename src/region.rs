//! Subregion identity and descriptor record

use crate::db::SqlValue;
use crate::error::{AggregateError, AggregateResult};
use serde::Serialize;
use std::fmt;

/// Subregion identifier as listed by the region directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RegionId(pub i64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four descriptor columns a region-mode query groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegionDescriptor {
    pub mun: i64,
    pub area: i64,
    pub dist: i64,
    pub reg_id: i64,
}

impl RegionDescriptor {
    /// Number of trailing columns a region-mode result row carries
    pub const WIDTH: usize = 4;

    /// Split the trailing descriptor columns off a raw region-mode row.
    ///
    /// Returns the leading value cells and the descriptor; the descriptor
    /// keeps the column order of the query (`mun, area, dist, reg_id`).
    pub fn split_row(row: &[SqlValue]) -> AggregateResult<(&[SqlValue], Self)> {
        if row.len() < Self::WIDTH {
            return Err(AggregateError::UnexpectedValue(format!(
                "region row has {} cells, expected at least {}",
                row.len(),
                Self::WIDTH
            )));
        }
        let (values, tail) = row.split_at(row.len() - Self::WIDTH);
        let descriptor = Self {
            mun: tail[0].as_integer()?,
            area: tail[1].as_integer()?,
            dist: tail[2].as_integer()?,
            reg_id: tail[3].as_integer()?,
        };
        Ok((values, descriptor))
    }

    /// Descriptor values in output column order
    pub fn to_values(&self) -> [SqlValue; 4] {
        [
            SqlValue::Integer(self.mun),
            SqlValue::Integer(self.area),
            SqlValue::Integer(self.dist),
            SqlValue::Integer(self.reg_id),
        ]
    }
}
