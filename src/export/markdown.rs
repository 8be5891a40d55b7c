//! Markdown documentation: the per-service reference tables and the
//! database access guide.
//!
//! Each service type maps to a [`Section`] in a lookup table. Most services
//! are a single [`TableLayout`]; amateur radio is split into HF, VHF/UHF and
//! calling-frequency tables. Unknown service types fall back to
//! [`GENERIC_LAYOUT`].

use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::{FrequencyAllocation, FrequencyRegistry};
use crate::export::sqlite::{SCHEMA_SQL, TABLE_NAME};

/// Preferred section order; service types not listed follow alphabetically.
pub const SERVICE_ORDER: &[&str] = &[
    "Amateur Radio",
    "Broadcast",
    "Public Safety",
    "Aviation",
    "Marine",
    "Citizens Band",
    "Personal Radio",
    "WiFi",
    "ISM",
    "Cellular",
    "GPS",
    "Satellite",
    "Time Standard",
    "Emergency",
    "Personal Area Network",
];

/// Upper edge of the HF amateur table.
const HF_LIMIT_MHZ: f64 = 30.0;

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

/// One markdown table: its column headers and how a record fills a row.
#[derive(Clone, Copy)]
pub struct TableLayout {
    pub summary: &'static str,
    pub headers: &'static [&'static str],
    pub row: fn(&FrequencyAllocation) -> Vec<String>,
}

/// How a service type is rendered.
#[derive(Clone, Copy)]
pub enum Section {
    Table(TableLayout),
    /// HF bands, VHF/UHF bands and calling frequencies as three tables.
    Amateur,
}

pub const GENERIC_LAYOUT: TableLayout = TableLayout {
    summary: "",
    headers: &["Service", "Frequency Range", "Purpose"],
    row: |a| vec![a.band.clone(), format_range(a, 2, 1), a.primary_use.clone()],
};

const BROADCAST_LAYOUT: TableLayout = TableLayout {
    summary: "Commercial AM, FM and over-the-air television broadcasting.",
    headers: &["Service", "Frequency Range", "Band", "Modulation/Standard"],
    row: |a| {
        vec![
            a.band.clone(),
            format_range(a, 1, 1),
            a.wavelength.clone(),
            a.primary_use.clone(),
        ]
    },
};

const PUBLIC_SAFETY_LAYOUT: TableLayout = TableLayout {
    summary: "Police, fire and EMS allocations. Specific assignments vary by region.",
    headers: &["Service", "Frequency Range", "Primary Users", "Notes"],
    row: |a| {
        vec![
            a.band.clone(),
            format_range(a, 1, 1),
            a.primary_use.clone(),
            "Regional variations apply".to_string(),
        ]
    },
};

const AVIATION_LAYOUT: TableLayout = TableLayout {
    summary: "Air traffic control, aircraft communication and emergency beacons.",
    headers: &["Service", "Frequency", "Band", "Purpose"],
    row: |a| {
        vec![
            a.band.clone(),
            format_range(a, 1, 0),
            "VHF/UHF".to_string(),
            a.primary_use.clone(),
        ]
    },
};

const MARINE_LAYOUT: TableLayout = TableLayout {
    summary: "Maritime mobile and distress frequencies. \
              156.8 MHz is the international calling channel.",
    headers: &["Service", "Frequency Range", "Band", "Purpose"],
    row: |a| {
        vec![
            a.band.clone(),
            format_range(a, 1, 1),
            "Marine".to_string(),
            a.primary_use.clone(),
        ]
    },
};

const WIFI_LAYOUT: TableLayout = TableLayout {
    summary: "IEEE 802.11 bands in unlicensed spectrum.",
    headers: &["Band", "Frequency Range", "Standard", "Typical Use"],
    row: |a| {
        vec![
            a.band.clone(),
            format_span(a, 0),
            a.primary_use.clone(),
            "Wireless networking".to_string(),
        ]
    },
};

const CELLULAR_LAYOUT: TableLayout = TableLayout {
    summary: "2G through 5G bands. Designations follow 3GPP and vary by carrier and region.",
    headers: &["Band", "Frequency Range", "Technology", "Primary Carriers"],
    row: |a| {
        vec![
            a.band.clone(),
            format_range(a, 1, 0),
            a.primary_use.clone(),
            "Major carriers".to_string(),
        ]
    },
};

const GNSS_LAYOUT: TableLayout = TableLayout {
    summary: "Satellite navigation signals (GPS, GLONASS, Galileo).",
    headers: &["System", "Frequency (MHz)", "Signal", "Purpose"],
    row: |a| {
        vec![
            a.band.clone(),
            format!("{:.2}", a.frequency_start_mhz),
            "Navigation".to_string(),
            a.primary_use.clone(),
        ]
    },
};

const TIME_STANDARD_LAYOUT: TableLayout = TableLayout {
    summary: "Time and frequency standard stations.",
    headers: &["Station", "Frequency (MHz)", "Location", "Operator"],
    row: |a| {
        let station = a.band.split_whitespace().next().unwrap_or_default();
        let (location, operator) = station_origin(station);
        vec![
            station.to_string(),
            format!("{:.2}", a.frequency_start_mhz),
            location.to_string(),
            operator.to_string(),
        ]
    },
};

const AMATEUR_BAND_HEADERS: &[&str] = &["Band", "Frequency Range", "Wavelength", "Primary Use"];

/// The rendering strategy for a service type.
pub fn section_for(service_type: &str) -> Section {
    match service_type {
        "Amateur Radio" => Section::Amateur,
        "Broadcast" => Section::Table(BROADCAST_LAYOUT),
        "Public Safety" => Section::Table(PUBLIC_SAFETY_LAYOUT),
        "Aviation" => Section::Table(AVIATION_LAYOUT),
        "Marine" => Section::Table(MARINE_LAYOUT),
        "WiFi" => Section::Table(WIFI_LAYOUT),
        "Cellular" => Section::Table(CELLULAR_LAYOUT),
        "GPS" => Section::Table(GNSS_LAYOUT),
        "Time Standard" => Section::Table(TIME_STANDARD_LAYOUT),
        _ => Section::Table(GENERIC_LAYOUT),
    }
}

fn station_origin(station: &str) -> (&'static str, &'static str) {
    match station {
        "WWV" => ("Colorado", "NIST"),
        "WWVH" => ("Hawaii", "NIST"),
        _ => ("Canada", "NRC"),
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// `146.52 MHz` for a spot frequency, `144.0 - 148.0 MHz` for a range.
pub fn format_range(
    a: &FrequencyAllocation,
    spot_precision: usize,
    span_precision: usize,
) -> String {
    if a.is_spot_frequency() {
        format!("{:.*} MHz", spot_precision, a.frequency_start_mhz)
    } else {
        format_span(a, span_precision)
    }
}

fn format_span(a: &FrequencyAllocation, precision: usize) -> String {
    format!(
        "{:.*} - {:.*} MHz",
        precision, a.frequency_start_mhz, precision, a.frequency_end_mhz
    )
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn push_table(
    out: &mut String,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> fmt::Result {
    writeln!(out, "| {} |", headers.join(" | "))?;
    let rule: Vec<String> = headers.iter().map(|h| "-".repeat(h.len().max(3))).collect();
    writeln!(out, "|{}|", rule.join("|"))?;
    for cells in rows {
        let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
        writeln!(out, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}

fn is_calling_frequency(a: &FrequencyAllocation) -> bool {
    a.band.to_lowercase().contains("simplex")
}

fn sorted_by_start(mut rows: Vec<&FrequencyAllocation>) -> Vec<&FrequencyAllocation> {
    rows.sort_by(|a, b| a.frequency_start_mhz.total_cmp(&b.frequency_start_mhz));
    rows
}

// ---------------------------------------------------------------------------
// Reference document
// ---------------------------------------------------------------------------

/// Service types in document order.
pub fn section_order(registry: &FrequencyRegistry) -> Vec<&str> {
    let present: Vec<&str> = registry.service_types().collect();
    let mut order: Vec<&str> = SERVICE_ORDER
        .iter()
        .copied()
        .filter(|s| present.contains(s))
        .collect();
    order.extend(present.iter().copied().filter(|s| !SERVICE_ORDER.contains(s)));
    order
}

/// Render the full frequency reference document.
pub fn render_reference(registry: &FrequencyRegistry) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# Frequency Reference Database\n")?;
    writeln!(
        out,
        "{} frequency allocations across {} service types. \
         Overlapping ranges under different services are co-primary or secondary allocations.\n",
        registry.len(),
        registry.service_types().count()
    )?;
    writeln!(out, "See `DATABASE_GUIDE.md` for the SQLite layout and example queries.")?;

    for service in section_order(registry) {
        let rows = sorted_by_start(registry.filter_by_service(service));
        writeln!(out, "\n## {service}\n")?;
        match section_for(service) {
            Section::Table(layout) => {
                if !layout.summary.is_empty() {
                    writeln!(out, "{}\n", layout.summary)?;
                }
                push_table(&mut out, layout.headers, rows.into_iter().map(layout.row))?;
            }
            Section::Amateur => push_amateur(&mut out, &rows)?,
        }
    }
    Ok(out)
}

/// HF holds bands ending at or below 30 MHz; everything else that is not a
/// calling frequency goes to VHF/UHF, including bands that straddle 30 MHz.
fn push_amateur(out: &mut String, rows: &[&FrequencyAllocation]) -> fmt::Result {
    let (calling, bands): (Vec<&FrequencyAllocation>, Vec<&FrequencyAllocation>) =
        rows.iter().copied().partition(|a| is_calling_frequency(a));
    let (hf, vhf): (Vec<&FrequencyAllocation>, Vec<&FrequencyAllocation>) = bands
        .into_iter()
        .partition(|a| a.frequency_end_mhz <= HF_LIMIT_MHZ);

    let band_row = |a: &FrequencyAllocation, precision: usize| {
        vec![
            a.band.clone(),
            format_range(a, precision, precision),
            a.wavelength.clone(),
            a.primary_use.clone(),
        ]
    };

    if !hf.is_empty() {
        writeln!(out, "### HF Amateur Bands (up to 30 MHz)\n")?;
        push_table(out, AMATEUR_BAND_HEADERS, hf.into_iter().map(|a| band_row(a, 3)))?;
    }
    if !vhf.is_empty() {
        writeln!(out, "\n### VHF/UHF Amateur Bands (above 30 MHz)\n")?;
        push_table(out, AMATEUR_BAND_HEADERS, vhf.into_iter().map(|a| band_row(a, 1)))?;
    }
    if !calling.is_empty() {
        writeln!(out, "\n### Calling Frequencies\n")?;
        push_table(
            out,
            &["Frequency", "Description", "Use"],
            calling.into_iter().map(|a| {
                vec![
                    format!("{:.2} MHz", a.frequency_start_mhz),
                    a.band.clone(),
                    a.primary_use.clone(),
                ]
            }),
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Database guide
// ---------------------------------------------------------------------------

const EXAMPLE_QUERIES: &[(&str, &str)] = &[
    (
        "Which allocations contain 146.52 MHz?",
        "WHERE 146.52 BETWEEN Frequency_Start_MHz AND Frequency_End_MHz\nORDER BY ID;",
    ),
    (
        "All amateur radio allocations",
        "WHERE Service_Type = 'Amateur Radio'\nORDER BY Frequency_Start_MHz;",
    ),
    (
        "Allocations overlapping 144-148 MHz",
        "WHERE Frequency_Start_MHz <= 148 AND Frequency_End_MHz >= 144;",
    ),
];

/// Render the database access guide with example SQL.
pub fn render_database_guide(registry: &FrequencyRegistry) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# Using the Frequency Database\n")?;
    writeln!(out, "## Files\n")?;
    writeln!(out, "- `Frequencies.db`: SQLite database, table `{TABLE_NAME}`")?;
    writeln!(out, "- `database_schema.sql`: schema for recreating the table elsewhere")?;
    writeln!(out, "- `Frequencies.xlsx`: workbook with one sheet per service type")?;
    writeln!(
        out,
        "- `frequency_data.csv`, `frequency_data.json`, `frequency_data.parquet`: flat exports"
    )?;

    writeln!(out, "\n## Example Queries\n")?;
    writeln!(out, "```sql")?;
    for (title, filter) in EXAMPLE_QUERIES {
        writeln!(out, "-- {title}\nSELECT * FROM {TABLE_NAME}\n{filter}\n")?;
    }
    writeln!(out, "-- Pairs of overlapping allocations")?;
    writeln!(
        out,
        "SELECT f1.Band, f2.Band, f1.Service_Type, f2.Service_Type\n\
         FROM {TABLE_NAME} f1 JOIN {TABLE_NAME} f2 ON f1.ID < f2.ID\n\
         WHERE f1.Frequency_Start_MHz <= f2.Frequency_End_MHz\n  \
         AND f1.Frequency_End_MHz >= f2.Frequency_Start_MHz;"
    )?;
    writeln!(out, "```")?;

    writeln!(out, "\n## Schema\n")?;
    writeln!(out, "```sql\n{SCHEMA_SQL}```")?;

    writeln!(out, "\n## Entries by Service Type\n")?;
    push_table(
        &mut out,
        &["Service Type", "Entries"],
        registry
            .service_counts()
            .into_iter()
            .map(|(service, count)| vec![service.to_string(), count.to_string()]),
    )?;
    Ok(out)
}

pub fn write_reference(registry: &FrequencyRegistry, path: &Path) -> Result<()> {
    let doc = render_reference(registry).context("rendering reference document")?;
    std::fs::write(path, doc).context("writing reference document")
}

pub fn write_database_guide(registry: &FrequencyRegistry, path: &Path) -> Result<()> {
    let doc = render_database_guide(registry).context("rendering database guide")?;
    std::fs::write(path, doc).context("writing database guide")
}
