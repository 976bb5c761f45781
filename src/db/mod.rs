//! Database collaborators: query runner, destination table, region directory
//!
//! ```text
//! QueryRunner (trait) ← SqliteRunner (rusqlite, one connection per run)
//!     ↑
//!     ├─ TableWriter      CREATE / DROP / INSERT on the output table
//!     └─ list_region_ids  SELECT DISTINCT reg_id from the subregion lookup
//! ```

pub mod regions;
pub mod runner;
pub mod sqlite;
pub mod table;
pub mod value;

pub use regions::list_region_ids;
pub use runner::{QueryOutcome, QueryRunner, ResultRows};
pub use sqlite::SqliteRunner;
pub use table::TableWriter;
pub use value::SqlValue;
