use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};

use crate::data::model::LEGACY_FIELD_NAMES;
use crate::data::{FrequencyAllocation, FrequencyRegistry};

/// Excel's hard limit on worksheet name length.
pub const MAX_SHEET_NAME_LEN: usize = 31;

pub const SUMMARY_SHEET: &str = "Summary";
pub const COMPLETE_SHEET: &str = "Complete Database";

/// Write the workbook: a summary sheet, one sheet per service type and a
/// sheet with every allocation.
///
/// Service sheets are sorted by start frequency; the complete sheet by
/// service type, then start frequency.
pub fn write_workbook(registry: &FrequencyRegistry, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = header_format();
    let mut names = SheetNames::default();
    names.reserve(SUMMARY_SHEET);
    names.reserve(COMPLETE_SHEET);

    // ---- Summary: service type → count ----
    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;
    sheet.write_string_with_format(0, 0, "Service Type", &header)?;
    sheet.write_string_with_format(0, 1, "Number of Entries", &header)?;
    for (i, (service, count)) in registry.service_counts().into_iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, service)?;
        sheet.write_number(row, 1, count as f64)?;
    }
    sheet.autofit();

    // ---- One sheet per service type ----
    for service in registry.service_types() {
        let mut rows = registry.filter_by_service(service);
        rows.sort_by(|a, b| a.frequency_start_mhz.total_cmp(&b.frequency_start_mhz));

        let name = names.claim(service);
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(&name)
            .with_context(|| format!("naming worksheet for {service:?}"))?;
        write_table(sheet, &rows, &header)
            .with_context(|| format!("writing worksheet {name:?}"))?;
    }

    // ---- Complete database ----
    let mut rows: Vec<&FrequencyAllocation> = registry.all().iter().collect();
    rows.sort_by(|a, b| {
        a.service_type
            .cmp(&b.service_type)
            .then(a.frequency_start_mhz.total_cmp(&b.frequency_start_mhz))
    });
    let sheet = workbook.add_worksheet();
    sheet.set_name(COMPLETE_SHEET)?;
    write_table(sheet, &rows, &header).context("writing complete worksheet")?;

    workbook.save(path).context("saving workbook")?;
    Ok(())
}

/// Make a service type usable as a worksheet name.
///
/// Characters Excel rejects (`[]:*?/\`) become `_`, leading and trailing
/// apostrophes are dropped, and the result is cut to [`MAX_SHEET_NAME_LEN`]
/// characters.
pub fn sanitize_sheet_name(service_type: &str) -> String {
    let name: String = service_type
        .trim_start_matches('\'')
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let name = name.trim_end_matches('\'');
    if name.trim().is_empty() {
        "Sheet".to_string()
    } else {
        name.to_string()
    }
}

/// Worksheet names already taken in one workbook.
///
/// Excel compares names case-insensitively, so the set holds lowercased names.
#[derive(Debug, Default)]
struct SheetNames {
    used: HashSet<String>,
}

impl SheetNames {
    fn reserve(&mut self, name: &str) -> bool {
        self.used.insert(name.to_lowercase())
    }

    /// A sanitized, unused name for `service_type`. Clashes get a ` (2)`,
    /// ` (3)`, ... suffix, truncating the base so the limit still holds.
    fn claim(&mut self, service_type: &str) -> String {
        let base = sanitize_sheet_name(service_type);
        if self.reserve(&base) {
            return base;
        }
        let mut n = 2usize;
        loop {
            let suffix = format!(" ({n})");
            let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
            let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
            if self.reserve(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x366092))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn write_table(
    sheet: &mut Worksheet,
    rows: &[&FrequencyAllocation],
    header: &Format,
) -> Result<()> {
    for (col, name) in LEGACY_FIELD_NAMES.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, header)?;
    }
    for (i, a) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &a.band)?;
        sheet.write_number(row, 1, a.frequency_start_mhz)?;
        sheet.write_number(row, 2, a.frequency_end_mhz)?;
        sheet.write_string(row, 3, &a.wavelength)?;
        sheet.write_string(row, 4, &a.primary_use)?;
        sheet.write_string(row, 5, &a.service_type)?;
    }
    sheet.autofit();
    Ok(())
}
