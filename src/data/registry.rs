use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use super::filter::{AllocationFilter, filtered_indices};
use super::model::{FrequencyAllocation, InvalidRangeError, ValidationError};

// ---------------------------------------------------------------------------
// FrequencyRegistry – the validated, read-only allocation table
// ---------------------------------------------------------------------------

/// The full allocation table with a pre-computed service index.
///
/// A registry never changes after [`FrequencyRegistry::load`]. Cloning shares
/// the underlying storage, so handing copies to several readers (or threads)
/// is cheap. Loading different data means building a new registry.
#[derive(Debug, Clone)]
pub struct FrequencyRegistry {
    allocations: Arc<[FrequencyAllocation]>,
    /// service_type → positions in `allocations`, ascending.
    by_service: Arc<BTreeMap<String, Vec<usize>>>,
}

impl FrequencyRegistry {
    /// Validate every record and build the registry.
    ///
    /// The first invalid record aborts the whole load. Duplicates and
    /// overlapping ranges are kept as given.
    pub fn load<I>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = FrequencyAllocation>,
    {
        let mut allocations = Vec::new();
        let mut by_service: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (index, record) in records.into_iter().enumerate() {
            record.check().map_err(|issue| ValidationError {
                index,
                band: record.band.clone(),
                issue,
            })?;
            by_service
                .entry(record.service_type.clone())
                .or_default()
                .push(index);
            allocations.push(record);
        }

        debug!(
            "Loaded {} allocations across {} service types",
            allocations.len(),
            by_service.len()
        );

        Ok(FrequencyRegistry {
            allocations: allocations.into(),
            by_service: Arc::new(by_service),
        })
    }

    /// Every allocation whose range contains `frequency_mhz`, edges included.
    pub fn find_by_frequency(&self, frequency_mhz: f64) -> Vec<&FrequencyAllocation> {
        self.select(&AllocationFilter::Frequency(frequency_mhz))
    }

    /// Every allocation intersecting `[start_mhz, end_mhz]`.
    pub fn find_overlapping(
        &self,
        start_mhz: f64,
        end_mhz: f64,
    ) -> Result<Vec<&FrequencyAllocation>, InvalidRangeError> {
        let filter = AllocationFilter::range(start_mhz, end_mhz)?;
        Ok(self.select(&filter))
    }

    /// Allocations whose service type equals `service_type` exactly.
    pub fn filter_by_service(&self, service_type: &str) -> Vec<&FrequencyAllocation> {
        self.by_service
            .get(service_type)
            .map(|indices| indices.iter().map(|&i| &self.allocations[i]).collect())
            .unwrap_or_default()
    }

    /// The full table in insertion order.
    pub fn all(&self) -> &[FrequencyAllocation] {
        &self.allocations
    }

    /// Distinct service types, sorted.
    pub fn service_types(&self) -> impl Iterator<Item = &str> {
        self.by_service.keys().map(String::as_str)
    }

    /// Number of allocations per service type, sorted by service type.
    pub fn service_counts(&self) -> Vec<(&str, usize)> {
        self.by_service
            .iter()
            .map(|(service, indices)| (service.as_str(), indices.len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    fn select(&self, filter: &AllocationFilter) -> Vec<&FrequencyAllocation> {
        filtered_indices(&self.allocations, filter)
            .into_iter()
            .map(|i| &self.allocations[i])
            .collect()
    }
}
