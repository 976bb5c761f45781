//! Query construction
//!
//! `Identifier` is the single gate for anything pasted into SQL text;
//! `QueryBuilder` only ever handles validated identifiers and binds the
//! remaining values as parameters.

pub mod builder;
pub mod identifier;
pub mod tables;

pub use builder::{BuiltQuery, QueryBuilder, BOTH_SEXES_CODE, MIN_CLASSIFIED_JOURNEYS};
pub use identifier::Identifier;
pub use tables::SourceTables;
