use super::runner::{QueryOutcome, QueryRunner};
use super::value::SqlValue;
use crate::error::{AggregateError, AggregateResult};
use async_trait::async_trait;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;

/// Apply the PRAGMAs used for batch writes (WAL, NORMAL sync, in-memory temp)
pub fn apply_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    let mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;
    log::debug!("SQLite journal_mode={}", mode);
    Ok(())
}

/// Query runner over a single SQLite connection, owned for the whole run
pub struct SqliteRunner {
    conn: Connection,
}

impl SqliteRunner {
    pub fn open(db_path: impl AsRef<Path>) -> AggregateResult<Self> {
        let db_path = db_path.as_ref();
        if !db_path.exists() {
            return Err(AggregateError::Database(format!(
                "database file not found: {}",
                db_path.display()
            )));
        }

        let conn = Connection::open(db_path)?;
        apply_pragmas(&conn)?;

        log::info!("✅ Opened SQLite database {}", db_path.display());
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl QueryRunner for SqliteRunner {
    async fn run(&mut self, sql: &str, params: &[SqlValue]) -> AggregateResult<QueryOutcome> {
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();

        if width == 0 {
            stmt.execute(params_from_iter(params.iter()))?;
            return Ok(QueryOutcome::Acknowledged);
        }

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(SqlValue::from(row.get_ref(idx)?));
            }
            out.push(cells);
        }
        Ok(QueryOutcome::Rows(out))
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_rows_and_acknowledgements() {
        let mut runner = SqliteRunner::from_connection(Connection::open_in_memory().unwrap());

        let outcome = runner
            .run("CREATE TABLE t (id INTEGER, label TEXT)", &[])
            .await
            .unwrap();
        assert_eq!(outcome, QueryOutcome::Acknowledged);

        runner
            .run(
                "INSERT INTO t (id, label) VALUES (?1, ?2)",
                &[SqlValue::Integer(7), SqlValue::Text("seven".into())],
            )
            .await
            .unwrap()
            .expect_acknowledged("insert")
            .unwrap();

        let rows = runner
            .run("SELECT id, label FROM t WHERE id = ?1", &[SqlValue::Text("7".into())])
            .await
            .unwrap()
            .into_rows();
        assert_eq!(rows, vec![vec![SqlValue::Integer(7), SqlValue::Text("seven".into())]]);
    }

    #[tokio::test]
    async fn test_empty_result_is_rows() {
        let mut runner = SqliteRunner::from_connection(Connection::open_in_memory().unwrap());
        runner.run("CREATE TABLE t (id INTEGER)", &[]).await.unwrap();

        let outcome = runner.run("SELECT id FROM t", &[]).await.unwrap();
        assert_eq!(outcome, QueryOutcome::Rows(vec![]));

        let sum = runner.run("SELECT SUM(id) FROM t", &[]).await.unwrap().into_rows();
        assert_eq!(sum, vec![vec![SqlValue::Null]]);
    }

    #[tokio::test]
    async fn test_missing_table_is_missing_source() {
        let mut runner = SqliteRunner::from_connection(Connection::open_in_memory().unwrap());
        let err = runner.run("SELECT * FROM nowhere", &[]).await.unwrap_err();
        assert!(err.is_skippable());
    }

    #[test]
    fn test_open_applies_wal() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("tt.db");
        Connection::open(&db_path)
            .unwrap()
            .execute_batch("CREATE TABLE seed (id INTEGER)")
            .unwrap();

        let runner = SqliteRunner::open(&db_path).unwrap();
        let mode: String = runner
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_open_requires_existing_file() {
        let dir = tempdir().unwrap();
        let err = SqliteRunner::open(dir.path().join("missing.db")).err().unwrap();
        assert!(matches!(err, AggregateError::Database(_)));
    }
}
