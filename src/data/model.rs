use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wavelength marker for allocations where a wavelength label makes no sense.
pub const WAVELENGTH_NOT_APPLICABLE: &str = "N/A";

/// Column order shared by every tabular artifact.
pub const FIELD_NAMES: [&str; 6] = [
    "band",
    "frequency_start_mhz",
    "frequency_end_mhz",
    "wavelength",
    "primary_use",
    "service_type",
];

/// Capitalised headers used by the database table and older CSV exports.
/// Same order as [`FIELD_NAMES`].
pub const LEGACY_FIELD_NAMES: [&str; 6] = [
    "Band",
    "Frequency_Start_MHz",
    "Frequency_End_MHz",
    "Wavelength",
    "Primary_Use",
    "Service_Type",
];

// ---------------------------------------------------------------------------
// FrequencyAllocation – one row of the reference table
// ---------------------------------------------------------------------------

/// A named frequency range assigned to a service.
///
/// Start and end are in MHz. A spot frequency (e.g. a calling channel) has
/// `frequency_start_mhz == frequency_end_mhz`.
///
/// The serde aliases accept the capitalised headers used by older exports
/// (`Band`, `Frequency_Start_MHz`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyAllocation {
    #[serde(alias = "Band")]
    pub band: String,
    #[serde(alias = "Frequency_Start_MHz")]
    pub frequency_start_mhz: f64,
    #[serde(alias = "Frequency_End_MHz")]
    pub frequency_end_mhz: f64,
    #[serde(alias = "Wavelength", default)]
    pub wavelength: String,
    #[serde(alias = "Primary_Use", default)]
    pub primary_use: String,
    #[serde(alias = "Service_Type")]
    pub service_type: String,
}

impl FrequencyAllocation {
    pub fn new(
        band: impl Into<String>,
        frequency_start_mhz: f64,
        frequency_end_mhz: f64,
        wavelength: impl Into<String>,
        primary_use: impl Into<String>,
        service_type: impl Into<String>,
    ) -> Self {
        Self {
            band: band.into(),
            frequency_start_mhz,
            frequency_end_mhz,
            wavelength: wavelength.into(),
            primary_use: primary_use.into(),
            service_type: service_type.into(),
        }
    }

    /// True when the allocation is a single frequency rather than a range.
    pub fn is_spot_frequency(&self) -> bool {
        self.frequency_start_mhz == self.frequency_end_mhz
    }

    /// Closed-interval membership: both edges count.
    pub fn contains(&self, frequency_mhz: f64) -> bool {
        self.frequency_start_mhz <= frequency_mhz && frequency_mhz <= self.frequency_end_mhz
    }

    /// Closed-interval intersection with `[start, end]`.
    pub fn overlaps(&self, start_mhz: f64, end_mhz: f64) -> bool {
        self.frequency_start_mhz <= end_mhz && self.frequency_end_mhz >= start_mhz
    }

    pub fn bandwidth_mhz(&self) -> f64 {
        self.frequency_end_mhz - self.frequency_start_mhz
    }

    /// False for the "N/A" sentinel and for blank wavelengths.
    pub fn has_wavelength(&self) -> bool {
        let w = self.wavelength.trim();
        !w.is_empty() && w != WAVELENGTH_NOT_APPLICABLE
    }

    /// Check the structural invariants of a single record.
    pub fn check(&self) -> Result<(), ValidationIssue> {
        if self.band.trim().is_empty() {
            return Err(ValidationIssue::EmptyBand);
        }
        if self.service_type.trim().is_empty() {
            return Err(ValidationIssue::EmptyServiceType);
        }
        let (start, end) = (self.frequency_start_mhz, self.frequency_end_mhz);
        if !start.is_finite() || !end.is_finite() {
            return Err(ValidationIssue::NonFiniteFrequency { start, end });
        }
        if start < 0.0 || end < 0.0 {
            return Err(ValidationIssue::NegativeFrequency { start, end });
        }
        if start > end {
            return Err(ValidationIssue::InvertedRange { start, end });
        }
        Ok(())
    }
}

impl fmt::Display for FrequencyAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_spot_frequency() {
            write!(
                f,
                "{} ({} MHz, {})",
                self.band, self.frequency_start_mhz, self.service_type
            )
        } else {
            write!(
                f,
                "{} ({}-{} MHz, {})",
                self.band, self.frequency_start_mhz, self.frequency_end_mhz, self.service_type
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// What is wrong with a single record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("band label is empty")]
    EmptyBand,
    #[error("service type is empty")]
    EmptyServiceType,
    #[error("frequency range {start}..{end} MHz is not finite")]
    NonFiniteFrequency { start: f64, end: f64 },
    #[error("frequency range {start}..{end} MHz contains a negative value")]
    NegativeFrequency { start: f64, end: f64 },
    #[error("start {start} MHz is above end {end} MHz")]
    InvertedRange { start: f64, end: f64 },
}

/// A record rejected while building a registry.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid allocation #{index} ({band:?}): {issue}")]
pub struct ValidationError {
    /// Position of the record in the input sequence.
    pub index: usize,
    pub band: String,
    pub issue: ValidationIssue,
}

/// Returned by overlap queries whose bounds are reversed or not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid query range: start {start} MHz is not <= end {end} MHz")]
pub struct InvalidRangeError {
    pub start: f64,
    pub end: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(start: f64, end: f64) -> FrequencyAllocation {
        FrequencyAllocation::new("2m", start, end, "2 meters", "Repeaters", "Amateur Radio")
    }

    #[test]
    fn contains_includes_both_edges() {
        let a = alloc(144.0, 148.0);
        assert!(a.contains(144.0));
        assert!(a.contains(148.0));
        assert!(a.contains(146.52));
        assert!(!a.contains(143.999));
        assert!(!a.contains(f64::NAN));
    }

    #[test]
    fn overlaps_covers_every_intersection_shape() {
        let a = alloc(50.0, 54.0);
        assert!(a.overlaps(30.0, 52.0)); // lower edge
        assert!(a.overlaps(53.0, 60.0)); // upper edge
        assert!(a.overlaps(51.0, 52.0)); // inside
        assert!(a.overlaps(10.0, 100.0)); // containing
        assert!(a.overlaps(54.0, 54.0)); // touching
        assert!(!a.overlaps(54.1, 60.0));
    }

    #[test]
    fn spot_frequency_and_bandwidth() {
        let spot = alloc(146.52, 146.52);
        assert!(spot.is_spot_frequency());
        assert_eq!(spot.bandwidth_mhz(), 0.0);
        assert!(!alloc(144.0, 148.0).is_spot_frequency());
    }

    #[test]
    fn wavelength_sentinel_is_not_a_wavelength() {
        let mut a = alloc(1.0, 2.0);
        assert!(a.has_wavelength());
        a.wavelength = WAVELENGTH_NOT_APPLICABLE.to_string();
        assert!(!a.has_wavelength());
        a.wavelength = "  ".to_string();
        assert!(!a.has_wavelength());
    }

    #[test]
    fn check_reports_each_issue() {
        assert_eq!(alloc(1.0, 2.0).check(), Ok(()));
        assert_eq!(alloc(2.0, 2.0).check(), Ok(()));
        assert!(matches!(
            alloc(3.0, 2.0).check(),
            Err(ValidationIssue::InvertedRange { .. })
        ));
        assert!(matches!(
            alloc(-1.0, 2.0).check(),
            Err(ValidationIssue::NegativeFrequency { .. })
        ));
        assert!(matches!(
            alloc(f64::NAN, 2.0).check(),
            Err(ValidationIssue::NonFiniteFrequency { .. })
        ));
        assert!(matches!(
            alloc(1.0, f64::INFINITY).check(),
            Err(ValidationIssue::NonFiniteFrequency { .. })
        ));

        let mut a = alloc(1.0, 2.0);
        a.band = " ".into();
        assert_eq!(a.check(), Err(ValidationIssue::EmptyBand));
        let mut a = alloc(1.0, 2.0);
        a.service_type.clear();
        assert_eq!(a.check(), Err(ValidationIssue::EmptyServiceType));
    }

    #[test]
    fn deserializes_legacy_headers() {
        let json = r#"{"Band":"6m","Frequency_Start_MHz":50.0,"Frequency_End_MHz":54.0,
            "Wavelength":"6 meters","Primary_Use":"Sporadic E","Service_Type":"Amateur Radio"}"#;
        let a: FrequencyAllocation = serde_json::from_str(json).unwrap();
        assert_eq!(a.band, "6m");
        assert_eq!(a.frequency_end_mhz, 54.0);
        assert_eq!(a.service_type, "Amateur Radio");
    }

    #[test]
    fn display_distinguishes_spot_frequencies() {
        assert_eq!(
            alloc(146.52, 146.52).to_string(),
            "2m (146.52 MHz, Amateur Radio)"
        );
        assert_eq!(alloc(144.0, 148.0).to_string(), "2m (144-148 MHz, Amateur Radio)");
    }
}
