//! Result assembly - raw per-aggregate result sets into output rows

pub mod row;
pub mod transpose;

pub use row::{AggregateValue, OutputRow};
pub use transpose::{RawResultMatrix, ResultAssembler};
