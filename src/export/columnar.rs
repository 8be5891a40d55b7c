use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::data::{FrequencyAllocation, FrequencyRegistry};
use crate::data::model::FIELD_NAMES;

/// Arrow schema of the exported table. Column order follows [`FIELD_NAMES`].
pub fn allocation_schema() -> Schema {
    Schema::new(vec![
        Field::new(FIELD_NAMES[0], DataType::Utf8, false),
        Field::new(FIELD_NAMES[1], DataType::Float64, false),
        Field::new(FIELD_NAMES[2], DataType::Float64, false),
        Field::new(FIELD_NAMES[3], DataType::Utf8, false),
        Field::new(FIELD_NAMES[4], DataType::Utf8, false),
        Field::new(FIELD_NAMES[5], DataType::Utf8, false),
    ])
}

/// Convert the registry into a single record batch.
pub fn to_record_batch(registry: &FrequencyRegistry) -> Result<RecordBatch> {
    let rows = registry.all();
    let text = |f: fn(&FrequencyAllocation) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        text(|a| a.band.as_str()),
        Arc::new(Float64Array::from(
            rows.iter().map(|a| a.frequency_start_mhz).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|a| a.frequency_end_mhz).collect::<Vec<_>>(),
        )),
        text(|a| a.wavelength.as_str()),
        text(|a| a.primary_use.as_str()),
        text(|a| a.service_type.as_str()),
    ];

    RecordBatch::try_new(Arc::new(allocation_schema()), columns)
        .context("building allocation record batch")
}

/// Write every allocation to a Parquet file.
pub fn write_parquet(registry: &FrequencyRegistry, path: &Path) -> Result<()> {
    let batch = to_record_batch(registry)?;
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{loader, seed};

    #[test]
    fn batch_has_one_row_per_allocation() {
        let reg = FrequencyRegistry::load(seed::allocations()).unwrap();
        let batch = to_record_batch(&reg).unwrap();
        assert_eq!(batch.num_rows(), reg.len());
        assert_eq!(batch.num_columns(), 6);
        assert_eq!(batch.schema().field(1).name(), "frequency_start_mhz");
    }

    #[test]
    fn parquet_reloads_to_the_same_records() {
        let reg = FrequencyRegistry::load(seed::allocations()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.parquet");
        write_parquet(&reg, &path).unwrap();
        assert_eq!(loader::load_file(&path).unwrap(), reg.all());
    }
}
