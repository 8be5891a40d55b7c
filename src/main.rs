use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use freqref::data::{loader, seed};
use freqref::export::{self, ExportFormat};
use freqref::FrequencyRegistry;

/// Generate frequency allocation reference artifacts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Allocation table to load (.csv, .json or .parquet); defaults to the built-in table
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for generated files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Artifacts to generate (repeatable or comma-separated); defaults to all
    #[arg(short, long = "format", value_enum, value_delimiter = ',')]
    formats: Vec<ExportFormat>,

    /// Load and validate the table, then exit without writing anything
    #[arg(long)]
    validate_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let records = match &args.input {
        Some(path) => {
            info!("Loading allocations from {:?}", path);
            loader::load_file(path)?
        }
        None => seed::allocations(),
    };
    let registry = FrequencyRegistry::load(records).context("validating allocation table")?;

    info!(
        "Loaded {} allocations in {} service types",
        registry.len(),
        registry.service_types().count()
    );
    for (service, count) in registry.service_counts() {
        info!("  {service}: {count}");
    }

    if args.validate_only {
        info!("Validation passed; no files written");
        return Ok(());
    }

    let formats: &[ExportFormat] = if args.formats.is_empty() {
        &ExportFormat::ALL
    } else {
        &args.formats
    };
    let written = export::export_all(&registry, formats, &args.output)?;

    info!("Generated {} files in {:?}", written.len(), args.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["freqref"]);
        assert_eq!(args.input, None);
        assert_eq!(args.output, PathBuf::from("."));
        assert!(args.formats.is_empty());
        assert!(!args.validate_only);
    }

    #[test]
    fn test_format_list_parsing() {
        let args = Args::parse_from([
            "freqref",
            "--format", "csv,sqlite",
            "-f", "markdown",
            "--output", "out",
        ]);
        assert_eq!(
            args.formats,
            vec![ExportFormat::Csv, ExportFormat::Sqlite, ExportFormat::Markdown]
        );
        assert_eq!(args.output, PathBuf::from("out"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["freqref", "--format", "pdf"]).is_err());
    }
}
