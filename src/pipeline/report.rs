//! Report writer - mirrors inserted rows to a tab-separated or JSONL file

use crate::assembler::OutputRow;
use crate::catalog::OutputSchema;
use crate::db::SqlValue;
use crate::error::AggregateResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Tsv,
    Jsonl,
}

impl ReportFormat {
    /// `.jsonl` selects JSON Lines; anything else is tab-separated
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") => ReportFormat::Jsonl,
            _ => ReportFormat::Tsv,
        }
    }
}

pub struct ReportWriter {
    path: PathBuf,
    format: ReportFormat,
    schema: OutputSchema,
    writer: BufWriter<File>,
    rows_written: usize,
}

impl ReportWriter {
    pub fn create(path: impl Into<PathBuf>, schema: &OutputSchema) -> AggregateResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let format = ReportFormat::from_path(&path);
        let mut writer = BufWriter::new(File::create(&path)?);
        if format == ReportFormat::Tsv {
            writeln!(writer, "{}", schema.column_names().join("\t"))?;
        }

        log::info!("📝 Writing report to: {}", path.display());
        Ok(Self {
            path,
            format,
            schema: schema.clone(),
            writer,
            rows_written: 0,
        })
    }

    pub fn write_row(&mut self, row: &OutputRow) -> AggregateResult<()> {
        match self.format {
            ReportFormat::Tsv => {
                let cells: Vec<String> = row
                    .to_params(&self.schema)?
                    .into_iter()
                    .map(|cell| match cell {
                        SqlValue::Null => String::new(),
                        SqlValue::Integer(v) => v.to_string(),
                        SqlValue::Real(v) => v.to_string(),
                        SqlValue::Text(s) => s,
                    })
                    .collect();
                writeln!(self.writer, "{}", cells.join("\t"))?;
            }
            ReportFormat::Jsonl => {
                let json = serde_json::to_string(row)?;
                writeln!(self.writer, "{}", json)?;
            }
        }
        self.rows_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> AggregateResult<()> {
        self.writer.flush()?;
        log::debug!("Flushed {} report rows to {}", self.rows_written, self.path.display());
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

impl Drop for ReportWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
