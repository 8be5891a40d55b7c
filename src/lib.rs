//! Radio frequency allocation reference: a validated, read-only registry of
//! band allocations and exporters that turn it into CSV, JSON, Parquet,
//! SQLite, XLSX and Markdown artifacts.

pub mod data;
pub mod export;

pub use data::{FrequencyAllocation, FrequencyRegistry};
pub use export::ExportFormat;
