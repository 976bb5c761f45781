//! Destination table materialization and row inserts
//!
//! `CREATE TABLE` and `INSERT` are both rendered from the one `OutputSchema`
//! held by the writer.

use super::runner::QueryRunner;
use super::value::SqlValue;
use crate::assembler::OutputRow;
use crate::catalog::OutputSchema;
use crate::error::{AggregateError, AggregateResult};
use crate::query::Identifier;

pub struct TableWriter {
    table: Identifier,
    schema: OutputSchema,
    columns: Vec<Identifier>,
    insert_sql: String,
}

impl TableWriter {
    pub fn new(table: Identifier, schema: OutputSchema) -> AggregateResult<Self> {
        let columns = schema
            .column_names()
            .into_iter()
            .map(Identifier::new)
            .collect::<AggregateResult<Vec<_>>>()?;

        let names: Vec<&str> = columns.iter().map(Identifier::as_str).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            names.join(", "),
            placeholders.join(", ")
        );

        Ok(Self {
            table,
            schema,
            columns,
            insert_sql,
        })
    }

    pub fn table(&self) -> &Identifier {
        &self.table
    }

    pub fn create_sql(&self) -> String {
        let definitions: Vec<String> = self
            .columns
            .iter()
            .zip(self.schema.columns())
            .map(|(name, column)| format!("{} {}", name, column.kind.as_sql()))
            .collect();
        format!("CREATE TABLE {} ({})", self.table, definitions.join(", "))
    }

    pub fn insert_sql(&self) -> &str {
        &self.insert_sql
    }

    pub async fn exists<R: QueryRunner + ?Sized>(&self, runner: &mut R) -> AggregateResult<bool> {
        let rows = runner
            .run(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                &[SqlValue::from(self.table.as_str())],
            )
            .await?
            .into_rows();
        Ok(!rows.is_empty())
    }

    /// Create the destination table.
    ///
    /// An existing table is a `SchemaConflict` unless `drop_existing` is set,
    /// in which case it is dropped first.
    pub async fn materialize<R: QueryRunner + ?Sized>(
        &self,
        runner: &mut R,
        drop_existing: bool,
    ) -> AggregateResult<()> {
        if self.exists(runner).await? {
            if !drop_existing {
                return Err(AggregateError::SchemaConflict(self.table.to_string()));
            }
            log::warn!("🗑️  Dropping existing table {}", self.table);
            runner
                .run(&format!("DROP TABLE IF EXISTS {}", self.table), &[])
                .await?
                .expect_acknowledged("DROP TABLE")?;
        }

        let sql = self.create_sql();
        log::debug!("{}", sql);
        runner.run(&sql, &[]).await?.expect_acknowledged("CREATE TABLE")?;

        log::info!(
            "✅ Created table {} ({} columns)",
            self.table,
            self.columns.len()
        );
        Ok(())
    }

    pub async fn insert<R: QueryRunner + ?Sized>(
        &self,
        runner: &mut R,
        row: &OutputRow,
    ) -> AggregateResult<()> {
        let params = row.to_params(&self.schema)?;
        runner
            .run(&self.insert_sql, &params)
            .await?
            .expect_acknowledged("INSERT")
    }
}
