//! Data models for Tucson processing
//!
//! This module contains the core data structures produced by the Tucson reader:
//! the inferred file dialect, year markers, site header metadata, and the
//! reconstructed measurement series.

use crate::constants::{KEYCODE_WIDTH_LONG, KEYCODE_WIDTH_SHORT, YEAR_MARKER_CHARS_EXTENDED};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;

// =============================================================================
// Dialect
// =============================================================================

/// Whether a Tucson file holds raw ring widths or a chronology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    /// Raw ring-width series (`.rwl`)
    Rwl,
    /// Pre-built chronology (`.crn`)
    Crn,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Rwl => "RWL",
            FileKind::Crn => "CRN",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width of the series keycode at the start of each data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeycodeWidth {
    Six,
    Eight,
}

impl KeycodeWidth {
    /// Nominal number of keycode characters
    pub fn chars(&self) -> usize {
        match self {
            KeycodeWidth::Six => KEYCODE_WIDTH_SHORT,
            KeycodeWidth::Eight => KEYCODE_WIDTH_LONG,
        }
    }

    /// Keycode characters actually in use for a given year-marker width
    ///
    /// Files that need five-character year markers borrow the last keycode
    /// column, so the keycode shrinks by one.
    pub fn effective_chars(&self, year_marker_chars: usize) -> usize {
        if year_marker_chars >= YEAR_MARKER_CHARS_EXTENDED {
            self.chars() - 1
        } else {
            self.chars()
        }
    }

    /// Parse a CLI-style width ("6" or "8")
    pub fn from_chars(chars: usize) -> Option<Self> {
        match chars {
            KEYCODE_WIDTH_SHORT => Some(KeycodeWidth::Six),
            KEYCODE_WIDTH_LONG => Some(KeycodeWidth::Eight),
            _ => None,
        }
    }
}

impl fmt::Display for KeycodeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chars())
    }
}

/// The file-level format decision made by the format sniffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    pub file_kind: FileKind,
    pub keycode_width: KeycodeWidth,
}

impl Dialect {
    pub fn new(file_kind: FileKind, keycode_width: KeycodeWidth) -> Self {
        Self {
            file_kind,
            keycode_width,
        }
    }
}

// =============================================================================
// Years
// =============================================================================

/// Dating convention used to read year markers
///
/// Tucson files officially use astronomical numbering, where marker `0` is
/// 1 BC. Many BC-only workers write plain BC/AD numbers instead, so the
/// convention can be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DatingConvention {
    #[default]
    Astronomical,
    BcAd,
}

/// A calendar year taken from a decade block
///
/// The stored year follows the BC/AD calendar with no year zero: -1 is 1 BC
/// and is immediately followed by 1 AD. Arithmetic skips the missing zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearMarker {
    year: i32,
    convention: DatingConvention,
}

impl YearMarker {
    /// Create a marker from a calendar year
    pub fn new(year: i32) -> Self {
        Self {
            year,
            convention: DatingConvention::Astronomical,
        }
    }

    /// Parse marker text read under `convention`
    pub fn from_marker_text(
        text: &str,
        convention: DatingConvention,
    ) -> std::result::Result<Self, ParseIntError> {
        let mut year: i32 = text.trim().parse()?;
        if convention == DatingConvention::Astronomical && year <= 0 {
            year -= 1;
        }
        Ok(Self { year, convention })
    }

    /// Calendar year value
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Convention the marker text was read under
    pub fn convention(&self) -> DatingConvention {
        self.convention
    }

    /// Offset by `years`, skipping year zero
    pub fn add(&self, years: i32) -> Self {
        let mut r = self.year;
        if r < 0 {
            r += 1;
        }
        r += years;
        if r <= 0 {
            r -= 1;
        }
        Self {
            year: r,
            convention: self.convention,
        }
    }

    /// Number of years from `other` to `self`, skipping year zero
    pub fn diff(&self, other: &YearMarker) -> i32 {
        let zero_based = |y: i32| if y < 0 { y + 1 } else { y };
        zero_based(self.year) - zero_based(other.year)
    }

    /// Whether this marker falls before 1 AD
    pub fn is_before_common_era(&self) -> bool {
        self.year < 0
    }

    /// Whether `next` is a valid successor block: one to ten years later
    pub fn accepts_successor(&self, next: &YearMarker) -> bool {
        let years = next.diff(self);
        (1..=10).contains(&years)
    }
}

impl fmt::Display for YearMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)
    }
}

// =============================================================================
// Precision
// =============================================================================

/// Measurement precision, declared retroactively by a stop marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrecisionUnit {
    HundredthMillimetre,
    ThousandthMillimetre,
    #[default]
    Unspecified,
}

impl PrecisionUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrecisionUnit::HundredthMillimetre => "0.01mm",
            PrecisionUnit::ThousandthMillimetre => "0.001mm",
            PrecisionUnit::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for PrecisionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Header Metadata
// =============================================================================

/// Site metadata extracted from a standard three-line header
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeaderFields {
    /// Site code shared by the three header lines
    pub site_code: String,

    /// Site name (line 1)
    pub site_name: String,

    /// Four-letter species code (line 1)
    pub species_code: String,

    /// State or country (line 2)
    pub state_country: String,

    /// Species name (line 2)
    pub species_name: String,

    /// Elevation value with any unit suffix removed (line 2)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i32>,

    /// Elevation unit suffix such as "m" or "ft", if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_unit: Option<String>,

    /// Latitude/longitude string as written (line 2)
    pub lat_long: String,

    /// First year declared in the header (line 2)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_year: Option<i32>,

    /// Last year declared in the header (line 2)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_year: Option<i32>,

    /// Investigator (line 3)
    pub investigator: String,

    /// Completion date exactly as written (line 3)
    pub completion_date_raw: String,

    /// Completion date, when the raw text is a valid YYYYMMDD date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
}

// =============================================================================
// Series
// =============================================================================

/// One reconstructed measurement series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Keycode shared by all decade blocks of the series
    pub key: String,

    /// Header metadata, if a well-formed header preceded the series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderFields>,

    /// Ring values in chronological order
    pub ring_widths: Vec<i32>,

    /// Per-value sample depth (chronology files only)
    pub sample_depths: Vec<i32>,

    /// Precision declared by the stop marker
    pub precision: PrecisionUnit,

    /// Whether a stop or missing-value sentinel ended the series
    pub terminated: bool,

    /// Year of the first value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_year: Option<YearMarker>,

    /// 1-based line on which the series was opened
    pub start_line: usize,
}

impl Series {
    /// Open a series keyed by a data line, with no header
    pub fn headerless(key: impl Into<String>, start_line: usize) -> Self {
        Self {
            key: key.into(),
            header: None,
            ring_widths: Vec::new(),
            sample_depths: Vec::new(),
            precision: PrecisionUnit::Unspecified,
            terminated: false,
            first_year: None,
            start_line,
        }
    }

    /// Open a series seeded with header metadata; the key is adopted from
    /// the first data line that follows
    pub fn with_header(header: HeaderFields, start_line: usize) -> Self {
        Self {
            header: Some(header),
            ..Self::headerless(String::new(), start_line)
        }
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.ring_widths.len()
    }

    /// Whether the series holds no values
    pub fn is_empty(&self) -> bool {
        self.ring_widths.is_empty()
    }

    /// Year of the last value
    pub fn last_year(&self) -> Option<YearMarker> {
        match (self.first_year, self.ring_widths.len()) {
            (Some(first), len) if len > 0 => Some(first.add(len as i32 - 1)),
            _ => None,
        }
    }

    /// Calendar year of each value, in order
    pub fn years(&self) -> impl Iterator<Item = YearMarker> + '_ {
        let first = self.first_year;
        (0..self.ring_widths.len()).filter_map(move |i| first.map(|f| f.add(i as i32)))
    }

    /// Sample depth for value `index`, if the series carries depths
    pub fn sample_depth(&self, index: usize) -> Option<i32> {
        self.sample_depths.get(index).copied()
    }
}
