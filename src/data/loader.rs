use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Schema};
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{FIELD_NAMES, FrequencyAllocation, LEGACY_FIELD_NAMES};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an allocation table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the six allocation fields
/// * `.json`    – `[{ "band": ..., "frequency_start_mhz": ..., ... }, ...]`
/// * `.parquet` – text columns plus Float64/Float32 frequency columns
///
/// Field names may be snake_case or the legacy `Frequency_Start_MHz` style.
/// Records are returned unvalidated; `FrequencyRegistry::load` checks them.
pub fn load_file(path: &Path) -> Result<Vec<FrequencyAllocation>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading allocations from {}", path.display()))?;

    debug!("Read {} allocation records from {}", records.len(), path.display());
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<FrequencyAllocation>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    reader
        .deserialize()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "band": "2m",
///     "frequency_start_mhz": 144.0,
///     "frequency_end_mhz": 148.0,
///     "wavelength": "2 meters",
///     "primary_use": "Local/repeater communication",
///     "service_type": "Amateur Radio"
///   }
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<FrequencyAllocation>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            serde_json::from_value(rec.clone())
                .with_context(|| format!("Row {i} is not a valid allocation"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet table of allocations.
///
/// Expected schema:
/// - `band`, `wavelength`, `primary_use`, `service_type`: Utf8 / LargeUtf8
/// - `frequency_start_mhz`, `frequency_end_mhz`: Float64 or Float32
///
/// `wavelength` and `primary_use` may be absent or null; they read as empty.
fn load_parquet(path: &Path) -> Result<Vec<FrequencyAllocation>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let band = required_column(&schema, 0)?;
        let start = required_column(&schema, 1)?;
        let end = required_column(&schema, 2)?;
        let wavelength = optional_column(&schema, 3);
        let primary_use = optional_column(&schema, 4);
        let service_type = required_column(&schema, 5)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let text = |idx: Option<usize>| -> Result<String> {
                match idx {
                    Some(i) => extract_string(batch.column(i), row).with_context(|| {
                        format!("Row {row_no}: reading '{}'", schema.field(i).name())
                    }),
                    None => Ok(String::new()),
                }
            };
            let number = |idx: usize| -> Result<f64> {
                extract_f64(batch.column(idx), row).with_context(|| {
                    format!("Row {row_no}: reading '{}'", schema.field(idx).name())
                })
            };

            records.push(FrequencyAllocation {
                band: text(Some(band))?,
                frequency_start_mhz: number(start)?,
                frequency_end_mhz: number(end)?,
                wavelength: text(wavelength)?,
                primary_use: text(primary_use)?,
                service_type: text(Some(service_type))?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Column index for field `slot`, accepting either naming style.
fn optional_column(schema: &Schema, slot: usize) -> Option<usize> {
    schema
        .index_of(FIELD_NAMES[slot])
        .or_else(|_| schema.index_of(LEGACY_FIELD_NAMES[slot]))
        .ok()
}

fn required_column(schema: &Schema, slot: usize) -> Result<usize> {
    optional_column(schema, slot)
        .with_context(|| format!("Parquet file missing '{}' column", FIELD_NAMES[slot]))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in frequency column");
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!("Expected Float64 or Float32 column, got {:?}", col.data_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_snake_case_csv() {
        let file = write_temp(
            ".csv",
            "band,frequency_start_mhz,frequency_end_mhz,wavelength,primary_use,service_type\n\
             2m,144.0,148.0,2 meters,Repeaters,Amateur Radio\n\
             Marine Emergency,156.8,156.8,N/A,\"International distress, calling\",Marine\n",
        );
        let records = load_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].band, "2m");
        assert_eq!(records[1].frequency_start_mhz, 156.8);
        assert_eq!(records[1].primary_use, "International distress, calling");
    }

    #[test]
    fn loads_legacy_header_csv() {
        let file = write_temp(
            ".CSV",
            "Band,Frequency_Start_MHz,Frequency_End_MHz,Wavelength,Primary_Use,Service_Type\n\
             6m,50.0,54.0,6 meters,Sporadic E propagation,Amateur Radio\n",
        );
        let records = load_file(file.path()).unwrap();
        assert_eq!(records[0].frequency_end_mhz, 54.0);
        assert_eq!(records[0].service_type, "Amateur Radio");
    }

    #[test]
    fn csv_with_bad_number_names_the_row() {
        let file = write_temp(
            ".csv",
            "band,frequency_start_mhz,frequency_end_mhz,wavelength,primary_use,service_type\n\
             2m,abc,148.0,2 meters,Repeaters,Amateur Radio\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn loads_json_records() {
        let file = write_temp(
            ".json",
            r#"[{"band":"GPS L1","frequency_start_mhz":1575.42,"frequency_end_mhz":1575.42,
                 "wavelength":"N/A","primary_use":"GPS C/A code","service_type":"GPS"}]"#,
        );
        let records = load_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].is_spot_frequency());
    }

    #[test]
    fn json_must_be_an_array() {
        let file = write_temp(".json", r#"{"band":"x"}"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("top-level JSON array"));
    }

    #[test]
    fn json_row_missing_field_is_reported() {
        let file = write_temp(".json", r#"[{"band":"x","frequency_start_mhz":1.0}]"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0"));
    }

    #[test]
    fn loads_parquet_with_large_utf8_and_float32_columns() {
        use arrow::array::{ArrayRef, LargeStringArray};
        use arrow::datatypes::Field;
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Band", DataType::LargeUtf8, false),
            Field::new("Frequency_Start_MHz", DataType::Float32, false),
            Field::new("Frequency_End_MHz", DataType::Float32, false),
            Field::new("Primary_Use", DataType::LargeUtf8, true),
            Field::new("Service_Type", DataType::LargeUtf8, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(LargeStringArray::from(vec!["2m", "6m"])),
            Arc::new(Float32Array::from(vec![144.0_f32, 50.0])),
            Arc::new(Float32Array::from(vec![148.0_f32, 54.0])),
            Arc::new(LargeStringArray::from(vec![Some("Repeaters"), None])),
            Arc::new(LargeStringArray::from(vec!["Amateur Radio", "Amateur Radio"])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = Builder::new().suffix(".parquet").tempfile().unwrap();
        let out = std::fs::File::create(file.path()).unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let records = load_file(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].band, "2m");
        assert_eq!(records[0].frequency_start_mhz, 144.0);
        assert_eq!(records[0].frequency_end_mhz, 148.0);
        assert_eq!(records[0].primary_use, "Repeaters");
        assert_eq!(records[1].frequency_end_mhz, 54.0);
        assert_eq!(records[1].primary_use, "");
        assert_eq!(records[1].wavelength, "");
        assert_eq!(records[1].service_type, "Amateur Radio");
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".txt", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension: .txt"));
    }
}
