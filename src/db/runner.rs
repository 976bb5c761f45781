//! Query execution seam
//!
//! The core only needs "execute this statement with these parameters" and to
//! tell returned rows apart from an acknowledged DDL/DML statement.

use super::value::SqlValue;
use crate::error::{AggregateError, AggregateResult};
use async_trait::async_trait;

pub type ResultRows = Vec<Vec<SqlValue>>;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The statement produced a result set (possibly empty)
    Rows(ResultRows),
    /// The statement ran and has no result columns
    Acknowledged,
}

impl QueryOutcome {
    pub fn into_rows(self) -> ResultRows {
        match self {
            QueryOutcome::Rows(rows) => rows,
            QueryOutcome::Acknowledged => Vec::new(),
        }
    }

    pub fn expect_acknowledged(self, what: &str) -> AggregateResult<()> {
        match self {
            QueryOutcome::Acknowledged => Ok(()),
            QueryOutcome::Rows(_) => Err(AggregateError::Database(format!(
                "{} returned rows instead of an acknowledgement",
                what
            ))),
        }
    }
}

#[async_trait]
pub trait QueryRunner: Send {
    /// Execute one statement with positional parameters
    async fn run(&mut self, sql: &str, params: &[SqlValue]) -> AggregateResult<QueryOutcome>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
