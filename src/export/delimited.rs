use std::path::Path;

use anyhow::{Context, Result};

use crate::data::FrequencyRegistry;

/// Write every allocation as CSV, header first, in registry order.
///
/// Columns: `band, frequency_start_mhz, frequency_end_mhz, wavelength,
/// primary_use, service_type`.
pub fn write_csv(registry: &FrequencyRegistry, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for (row_no, allocation) in registry.all().iter().enumerate() {
        writer
            .serialize(allocation)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

/// Write every allocation as a pretty-printed JSON array.
pub fn write_json(registry: &FrequencyRegistry, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(registry.all()).context("serializing JSON")?;
    std::fs::write(path, text + "\n").context("writing JSON file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FrequencyAllocation, loader};

    fn registry() -> FrequencyRegistry {
        FrequencyRegistry::load(vec![
            FrequencyAllocation::new(
                "2m",
                144.0,
                148.0,
                "2 meters",
                "Local/repeater",
                "Amateur Radio",
            ),
            FrequencyAllocation::new(
                "Marine Emergency",
                156.8,
                156.8,
                "N/A",
                "Distress, calling",
                "Marine",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn csv_has_stable_header_and_quotes_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&registry(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "band,frequency_start_mhz,frequency_end_mhz,wavelength,primary_use,service_type"
        );
        assert_eq!(lines.next().unwrap(), "2m,144.0,148.0,2 meters,Local/repeater,Amateur Radio");
        assert!(lines.next().unwrap().contains("\"Distress, calling\""));
    }

    #[test]
    fn csv_and_json_reload_to_the_same_records() {
        let dir = tempfile::tempdir().unwrap();
        let reg = registry();

        let csv_path = dir.path().join("out.csv");
        write_csv(&reg, &csv_path).unwrap();
        assert_eq!(loader::load_file(&csv_path).unwrap(), reg.all());

        let json_path = dir.path().join("out.json");
        write_json(&reg, &json_path).unwrap();
        assert_eq!(loader::load_file(&json_path).unwrap(), reg.all());
    }
}
