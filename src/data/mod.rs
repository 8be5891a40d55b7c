/// Data layer: allocation records, loading, and lookups.
///
/// Architecture:
/// ```text
///  seed table / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<FrequencyAllocation>
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ FrequencyRegistry  │  validated, immutable, service index
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  frequency / range / service predicates → indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod registry;
pub mod seed;

pub use model::{FrequencyAllocation, InvalidRangeError, ValidationError, ValidationIssue};
pub use registry::FrequencyRegistry;
