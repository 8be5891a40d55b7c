use super::model::{FrequencyAllocation, InvalidRangeError};

// ---------------------------------------------------------------------------
// Filter predicate: which allocations a query selects
// ---------------------------------------------------------------------------

/// A single query shape over the allocation table.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationFilter {
    /// Allocations whose closed range contains the frequency.
    Frequency(f64),
    /// Allocations whose closed range intersects `[start, end]`.
    Range { start: f64, end: f64 },
    /// Exact, case-sensitive service type match.
    Service(String),
}

impl AllocationFilter {
    /// Build a range filter, rejecting reversed or NaN bounds.
    pub fn range(start: f64, end: f64) -> Result<Self, InvalidRangeError> {
        // `!(start <= end)` is also true when either side is NaN.
        if !(start <= end) {
            return Err(InvalidRangeError { start, end });
        }
        Ok(AllocationFilter::Range { start, end })
    }

    pub fn matches(&self, allocation: &FrequencyAllocation) -> bool {
        match self {
            AllocationFilter::Frequency(f) => allocation.contains(*f),
            AllocationFilter::Range { start, end } => allocation.overlaps(*start, *end),
            AllocationFilter::Service(service) => allocation.service_type == *service,
        }
    }
}

/// Return indices of allocations that pass the filter, in input order.
pub fn filtered_indices(
    allocations: &[FrequencyAllocation],
    filter: &AllocationFilter,
) -> Vec<usize> {
    allocations
        .iter()
        .enumerate()
        .filter(|(_, a)| filter.matches(a))
        .map(|(i, _)| i)
        .collect()
}
