//! Three-line Tucson header extraction
//!
//! The per-line header patterns are loose and match ordinary prose, so a block
//! is only accepted when all three lines have the right shapes and share the
//! same six-character site code. Each line is read with the column layout its
//! own shape matched, standard or legacy.

use super::diagnostics::{DiagnosticKind, Diagnostics};
use super::line_classifier::{
    HeaderLayout, column, header_line1_layout, header_line2_layout, header_line3_layout,
};
use crate::app::models::HeaderFields;
use crate::constants::header_columns::SITE_CODE;
use chrono::NaiveDate;
use std::ops::Range;

/// A header-shaped line held back until its block is complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedLine {
    pub line_number: usize,
    pub text: String,
}

impl CachedLine {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    fn field(&self, range: Range<usize>) -> String {
        column(&self.text, range).trim().to_string()
    }
}

/// Layouts of three lines that form a genuine header block
fn header_layouts(
    line1: &str,
    line2: &str,
    line3: &str,
) -> Option<(HeaderLayout, HeaderLayout, HeaderLayout)> {
    let layouts = (
        header_line1_layout(line1)?,
        header_line2_layout(line2)?,
        header_line3_layout(line3)?,
    );

    let code = column(line1, SITE_CODE);
    (code == column(line2, SITE_CODE) && code == column(line3, SITE_CODE)).then_some(layouts)
}

/// Whether three lines form a genuine header block
pub fn is_likely_header(line1: &str, line2: &str, line3: &str) -> bool {
    header_layouts(line1, line2, line3).is_some()
}

/// Extract header metadata, or `None` if the lines are not a header block
///
/// Malformed individual fields (elevation, years, completion date) do not reject
/// the block; they are left empty and reported as warnings.
pub fn try_extract_header(
    line1: &CachedLine,
    line2: &CachedLine,
    line3: &CachedLine,
    diagnostics: &mut Diagnostics,
) -> Option<HeaderFields> {
    let (layout1, layout2, layout3) = header_layouts(&line1.text, &line2.text, &line3.text)?;
    let (columns1, columns2, columns3) = (layout1.columns(), layout2.columns(), layout3.columns());

    let mut header = HeaderFields {
        site_code: line1.field(SITE_CODE),
        site_name: line1.field(columns1.site_name),
        species_code: line1.field(columns1.species_code),
        state_country: line2.field(columns2.state_country),
        species_name: line2.field(columns2.species_name),
        lat_long: line2.field(columns2.lat_long),
        investigator: line3.field(columns3.investigator),
        completion_date_raw: line3.field(columns3.completion_date),
        ..HeaderFields::default()
    };

    // Line 2: elevation
    let elevation = line2.field(columns2.elevation);
    if !elevation.is_empty() {
        match parse_elevation(&elevation) {
            Some((value, unit)) => {
                header.elevation = Some(value);
                header.elevation_unit = unit;
            }
            None => diagnostics.warn(
                DiagnosticKind::InvalidHeaderField,
                format!("Invalid elevation '{}' in header", elevation),
                Some(line2.line_number),
            ),
        }
    }

    // Line 2: year range
    header.first_year = parse_year_field(line2, columns2.first_year, "first year", diagnostics);
    header.last_year = parse_year_field(line2, columns2.last_year, "last year", diagnostics);

    // Line 3: completion date
    if !header.completion_date_raw.is_empty() {
        match NaiveDate::parse_from_str(&header.completion_date_raw, "%Y%m%d") {
            Ok(date) => header.completion_date = Some(date),
            Err(_) => diagnostics.warn(
                DiagnosticKind::InvalidHeaderField,
                format!(
                    "Invalid completion date '{}' in header",
                    header.completion_date_raw
                ),
                Some(line3.line_number),
            ),
        }
    }

    Some(header)
}

/// Split an elevation such as "2450m" or "  800" into value and unit
fn parse_elevation(text: &str) -> Option<(i32, Option<String>)> {
    let split = text
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);

    if !unit.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let number = number.trim();
    let value = match number.parse::<i32>() {
        Ok(value) => value,
        Err(_) => number.parse::<f64>().ok().filter(|v| v.is_finite())?.round() as i32,
    };

    let unit = (!unit.is_empty()).then(|| unit.to_lowercase());
    Some((value, unit))
}

fn parse_year_field(
    line: &CachedLine,
    range: Range<usize>,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> Option<i32> {
    let text = line.field(range);
    if text.is_empty() {
        return None;
    }

    match text.parse::<i32>() {
        Ok(year) => Some(year),
        Err(_) => {
            diagnostics.warn(
                DiagnosticKind::InvalidHeaderField,
                format!("Invalid {} '{}' in header", name, text),
                Some(line.line_number),
            );
            None
        }
    }
}
