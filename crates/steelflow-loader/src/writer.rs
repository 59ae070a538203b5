use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Serialize;
use steelflow_core::{OutputTable, TableName};
use steelflow_models::output_schema::{CHECKING_COLUMNS, OUTPUT_COLUMNS};
use steelflow_models::AllocatedFlow;

use crate::config::OutputPathsConfig;
use crate::error::LoaderError;

/// Writes delimited output tables, creating parent directories as needed.
///
/// The header is written from the schema constants so empty tables still
/// carry their columns.
pub struct CsvWriter {
    paths: OutputPathsConfig,
}

impl CsvWriter {
    pub fn new(paths: OutputPathsConfig) -> Self {
        Self { paths }
    }

    pub fn path_for(&self, name: TableName) -> &str {
        match name {
            TableName::All => &self.paths.combined,
            TableName::Imports => &self.paths.imports,
            TableName::Exports => &self.paths.exports,
        }
    }

    /// Write every table to its configured path. Returns the paths written.
    pub fn write_tables(&self, tables: &[OutputTable]) -> Result<Vec<PathBuf>, LoaderError> {
        let mut written = Vec::with_capacity(tables.len());
        for table in tables {
            let path = PathBuf::from(self.path_for(table.name));
            write_rows(&path, &OUTPUT_COLUMNS, &table.rows)?;
            tracing::info!(
                table = table.name.as_str(),
                path = %path.display(),
                rows = table.rows.len(),
                "Wrote output table"
            );
            written.push(path);
        }
        Ok(written)
    }

    /// Write the pre-aggregation checking table, if one is configured.
    pub fn write_checking(&self, flows: &[AllocatedFlow]) -> Result<Option<PathBuf>, LoaderError> {
        let Some(path) = self.paths.checking_table_path() else {
            return Ok(None);
        };
        let path = PathBuf::from(path);
        write_rows(&path, &CHECKING_COLUMNS, flows)?;
        tracing::info!(path = %path.display(), rows = flows.len(), "Wrote checking table");
        Ok(Some(path))
    }
}

/// Write `rows` under an explicit header.
pub fn write_rows<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: &[T],
) -> Result<(), LoaderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(path)?);
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
