/// Export layer: one writer per artifact, all reading the same registry.
///
/// ```text
///   FrequencyRegistry
///        │  all() / filter_by_service() / service_counts()
///        ├──► delimited  → frequency_data.csv, frequency_data.json
///        ├──► columnar   → frequency_data.parquet
///        ├──► sqlite     → Frequencies.db, database_schema.sql
///        ├──► workbook   → Frequencies.xlsx
///        └──► markdown   → FREQUENCY_REFERENCE.md, DATABASE_GUIDE.md
/// ```

pub mod columnar;
pub mod delimited;
pub mod markdown;
pub mod sqlite;
pub mod workbook;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;

use crate::data::FrequencyRegistry;

/// Artifact kinds the exporter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Parquet,
    Sqlite,
    Workbook,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Parquet,
        ExportFormat::Sqlite,
        ExportFormat::Workbook,
        ExportFormat::Markdown,
    ];

    /// File names written for this format, relative to the output directory.
    ///
    /// The first name is always the file that carries the allocation rows.
    pub fn file_names(self) -> &'static [&'static str] {
        match self {
            ExportFormat::Csv => &["frequency_data.csv"],
            ExportFormat::Json => &["frequency_data.json"],
            ExportFormat::Parquet => &["frequency_data.parquet"],
            ExportFormat::Sqlite => &["Frequencies.db", "database_schema.sql"],
            ExportFormat::Workbook => &["Frequencies.xlsx"],
            ExportFormat::Markdown => &["FREQUENCY_REFERENCE.md", "DATABASE_GUIDE.md"],
        }
    }

    /// The file holding the allocation rows; any other file is a companion
    /// (schema script, usage guide).
    pub fn data_file(self) -> &'static str {
        self.file_names()[0]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

/// Write one artifact into `out_dir`; returns the paths written.
pub fn export(
    registry: &FrequencyRegistry,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = format.file_names().iter().map(|n| out_dir.join(n)).collect();

    match format {
        ExportFormat::Csv => delimited::write_csv(registry, &paths[0]),
        ExportFormat::Json => delimited::write_json(registry, &paths[0]),
        ExportFormat::Parquet => columnar::write_parquet(registry, &paths[0]),
        ExportFormat::Sqlite => sqlite::write_database(registry, &paths[0])
            .and_then(|_| sqlite::write_schema(&paths[1])),
        ExportFormat::Workbook => workbook::write_workbook(registry, &paths[0]),
        ExportFormat::Markdown => markdown::write_reference(registry, &paths[0])
            .and_then(|_| markdown::write_database_guide(registry, &paths[1])),
    }
    .with_context(|| format!("exporting {format} to {}", out_dir.display()))?;

    for path in &paths {
        if path.ends_with(format.data_file()) {
            info!("Wrote {} ({} allocations)", path.display(), registry.len());
        } else {
            info!("Wrote {}", path.display());
        }
    }
    Ok(paths)
}

/// Create `out_dir` if needed and run each requested exporter in order.
///
/// Duplicate formats are written once.
pub fn export_all(
    registry: &FrequencyRegistry,
    formats: &[ExportFormat],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut seen = Vec::new();
    let mut written = Vec::new();
    for &format in formats {
        if seen.contains(&format) {
            continue;
        }
        seen.push(format);
        written.extend(export(registry, format, out_dir)?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seed;

    #[test]
    fn export_all_writes_every_file_once() {
        let reg = FrequencyRegistry::load(seed::allocations()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out");

        let written = export_all(
            &reg,
            &[ExportFormat::Csv, ExportFormat::Markdown, ExportFormat::Csv],
            &out,
        )
        .unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["frequency_data.csv", "FREQUENCY_REFERENCE.md", "DATABASE_GUIDE.md"]
        );
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn display_matches_cli_value_names() {
        for format in ExportFormat::ALL {
            let parsed = ExportFormat::from_str(&format.to_string(), false).unwrap();
            assert_eq!(parsed, format);
        }
        assert_eq!(ExportFormat::Workbook.to_string(), "workbook");
    }

    #[test]
    fn companion_files_are_not_data_files() {
        for format in ExportFormat::ALL {
            assert_eq!(format.file_names()[0], format.data_file());
        }
        assert_eq!(ExportFormat::Sqlite.data_file(), "Frequencies.db");
        assert_eq!(ExportFormat::Markdown.data_file(), "FREQUENCY_REFERENCE.md");
        for format in ExportFormat::ALL {
            assert_ne!(format.data_file(), "database_schema.sql");
            assert_ne!(format.data_file(), "DATABASE_GUIDE.md");
        }
    }
}
