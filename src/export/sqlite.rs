//! SQLite database artifact.
//!
//! One `Frequencies` table keyed by a synthetic ID, with a range index for
//! point/overlap lookups and a category index for service filters.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::data::FrequencyRegistry;

pub const TABLE_NAME: &str = "Frequencies";

/// DDL for the persisted layout; also written out as `database_schema.sql`.
pub const SCHEMA_SQL: &str = "\
CREATE TABLE Frequencies (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Band TEXT NOT NULL,
    Frequency_Start_MHz REAL NOT NULL,
    Frequency_End_MHz REAL NOT NULL,
    Wavelength TEXT,
    Primary_Use TEXT,
    Service_Type TEXT,
    DateAdded DATETIME DEFAULT CURRENT_TIMESTAMP,
    Notes TEXT
);

CREATE INDEX idx_frequency_range ON Frequencies (Frequency_Start_MHz, Frequency_End_MHz);
CREATE INDEX idx_service_type ON Frequencies (Service_Type);
CREATE INDEX idx_band ON Frequencies (Band);
";

const INSERT_SQL: &str = "INSERT INTO Frequencies \
    (Band, Frequency_Start_MHz, Frequency_End_MHz, Wavelength, Primary_Use, Service_Type) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

/// Recreate the `Frequencies` table at `path` and fill it from the registry.
///
/// Any existing table is dropped first. All rows go in one transaction.
pub fn write_database(registry: &FrequencyRegistry, path: &Path) -> Result<()> {
    let mut conn = Connection::open(path).context("opening SQLite database")?;
    populate(&mut conn, registry)
}

/// Write the schema DDL as a standalone `.sql` script.
pub fn write_schema(path: &Path) -> Result<()> {
    std::fs::write(path, SCHEMA_SQL).context("writing schema file")
}

fn populate(conn: &mut Connection, registry: &FrequencyRegistry) -> Result<()> {
    let tx = conn.transaction().context("starting transaction")?;
    tx.execute_batch(&format!("DROP TABLE IF EXISTS {TABLE_NAME};"))
        .context("dropping old table")?;
    tx.execute_batch(SCHEMA_SQL).context("creating schema")?;
    {
        let mut stmt = tx.prepare(INSERT_SQL).context("preparing insert")?;
        for allocation in registry.all() {
            stmt.execute(params![
                allocation.band,
                allocation.frequency_start_mhz,
                allocation.frequency_end_mhz,
                allocation.wavelength,
                allocation.primary_use,
                allocation.service_type,
            ])
            .with_context(|| format!("inserting {}", allocation.band))?;
        }
    }
    tx.commit().context("committing allocations")?;
    Ok(())
}
