//! Fixed-column line classification
//!
//! Every line of a Tucson file is one of three header shapes, an RWL or CRN
//! decade block at keycode width 6 or 8, or something else. Classification is
//! a pure function of the line text; evidence tallying lives in the format
//! sniffer.

use crate::app::models::{FileKind, KeycodeWidth};
use crate::constants::header_columns::{HeaderColumns, LEGACY, STANDARD};
use crate::constants::patterns::{
    CRN_VALUE, HEADER_LINE1, HEADER_LINE1_LEGACY, HEADER_LINE2, HEADER_LINE2_LEGACY, HEADER_LINE3,
    HEADER_LINE3_LEGACY, KEYCODE_CHAR, RWL_VALUE, YEAR,
};
use crate::constants::{KEYCODE_WIDTH_LONG, KEYCODE_WIDTH_SHORT, MIN_DATA_LINE_CHARS};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Shape of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    HeaderLine1,
    HeaderLine2,
    HeaderLine3,
    RwlDataPartial6,
    RwlDataComplete6,
    RwlDataPartial8,
    RwlDataComplete8,
    CrnDataComplete6,
    CrnDataComplete8,
    Unclassified,
}

impl LineKind {
    pub fn is_header(&self) -> bool {
        matches!(
            self,
            LineKind::HeaderLine1 | LineKind::HeaderLine2 | LineKind::HeaderLine3
        )
    }

    pub fn is_data(&self) -> bool {
        self.file_kind().is_some()
    }

    /// File kind a data line is evidence for
    pub fn file_kind(&self) -> Option<FileKind> {
        match self {
            LineKind::RwlDataPartial6
            | LineKind::RwlDataComplete6
            | LineKind::RwlDataPartial8
            | LineKind::RwlDataComplete8 => Some(FileKind::Rwl),
            LineKind::CrnDataComplete6 | LineKind::CrnDataComplete8 => Some(FileKind::Crn),
            _ => None,
        }
    }

    /// Keycode width a data line is evidence for
    pub fn keycode_width(&self) -> Option<KeycodeWidth> {
        match self {
            LineKind::RwlDataPartial6 | LineKind::RwlDataComplete6 | LineKind::CrnDataComplete6 => {
                Some(KeycodeWidth::Six)
            }
            LineKind::RwlDataPartial8 | LineKind::RwlDataComplete8 | LineKind::CrnDataComplete8 => {
                Some(KeycodeWidth::Eight)
            }
            _ => None,
        }
    }
}

/// Column layout a header-shaped line was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderLayout {
    Standard,
    Legacy,
}

impl HeaderLayout {
    pub fn columns(self) -> HeaderColumns {
        match self {
            HeaderLayout::Standard => STANDARD,
            HeaderLayout::Legacy => LEGACY,
        }
    }
}

/// Result of classifying one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: LineKind,

    /// The last keycode column of a data line holds `-`, which may be the
    /// sign of a five-character year marker
    pub five_char_year_candidate: bool,
}

impl Classification {
    fn of(kind: LineKind) -> Self {
        Self {
            kind,
            five_char_year_candidate: false,
        }
    }
}

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).expect("line pattern is a valid regular expression")
}

fn data_pattern(keycode_chars: usize, value: &str, repeat: &str) -> String {
    format!(
        "^{}{{{}}}{}(?:{}){}",
        KEYCODE_CHAR, keycode_chars, YEAR, value, repeat
    )
}

static CRN_COMPLETE_8: LazyLock<Regex> =
    LazyLock::new(|| compile(data_pattern(KEYCODE_WIDTH_LONG, CRN_VALUE, "{10}")));
static CRN_COMPLETE_6: LazyLock<Regex> =
    LazyLock::new(|| compile(data_pattern(KEYCODE_WIDTH_SHORT, CRN_VALUE, "{10}")));
static RWL_COMPLETE_8: LazyLock<Regex> =
    LazyLock::new(|| compile(data_pattern(KEYCODE_WIDTH_LONG, RWL_VALUE, "{10}")));
static RWL_COMPLETE_6: LazyLock<Regex> =
    LazyLock::new(|| compile(data_pattern(KEYCODE_WIDTH_SHORT, RWL_VALUE, "{10}")));
static RWL_PARTIAL_8: LazyLock<Regex> =
    LazyLock::new(|| compile(data_pattern(KEYCODE_WIDTH_LONG, RWL_VALUE, "")));
static RWL_PARTIAL_6: LazyLock<Regex> =
    LazyLock::new(|| compile(data_pattern(KEYCODE_WIDTH_SHORT, RWL_VALUE, "")));
static HEADER_1: LazyLock<Regex> = LazyLock::new(|| compile(HEADER_LINE1.to_string()));
static HEADER_2: LazyLock<Regex> = LazyLock::new(|| compile(HEADER_LINE2.to_string()));
static HEADER_3: LazyLock<Regex> = LazyLock::new(|| compile(HEADER_LINE3.to_string()));
static HEADER_1_LEGACY: LazyLock<Regex> =
    LazyLock::new(|| compile(HEADER_LINE1_LEGACY.to_string()));
static HEADER_2_LEGACY: LazyLock<Regex> =
    LazyLock::new(|| compile(HEADER_LINE2_LEGACY.to_string()));
static HEADER_3_LEGACY: LazyLock<Regex> =
    LazyLock::new(|| compile(HEADER_LINE3_LEGACY.to_string()));

/// Classify a line by its fixed-column shape
///
/// Patterns are tried most specific first: complete CRN blocks, complete RWL
/// blocks, partial RWL blocks, then the three header shapes. Within each group
/// width 8 is tried before width 6. A short line 3 also fits the loose line 2
/// shape, so line 3 is tried first.
pub fn classify(line: &str) -> Classification {
    if line.chars().count() < MIN_DATA_LINE_CHARS {
        return Classification::of(LineKind::Unclassified);
    }

    let data_kinds: [(&Regex, LineKind); 6] = [
        (&CRN_COMPLETE_8, LineKind::CrnDataComplete8),
        (&CRN_COMPLETE_6, LineKind::CrnDataComplete6),
        (&RWL_COMPLETE_8, LineKind::RwlDataComplete8),
        (&RWL_COMPLETE_6, LineKind::RwlDataComplete6),
        (&RWL_PARTIAL_8, LineKind::RwlDataPartial8),
        (&RWL_PARTIAL_6, LineKind::RwlDataPartial6),
    ];

    for (pattern, kind) in data_kinds {
        if pattern.is_match(line) {
            let five_char_year_candidate = kind
                .keycode_width()
                .map(|width| column(line, width.chars() - 1..width.chars()) == "-")
                .unwrap_or(false);
            return Classification {
                kind,
                five_char_year_candidate,
            };
        }
    }

    let kind = if is_header_line1(line) {
        LineKind::HeaderLine1
    } else if is_header_line3(line) {
        LineKind::HeaderLine3
    } else if is_header_line2(line) {
        LineKind::HeaderLine2
    } else {
        LineKind::Unclassified
    };
    Classification::of(kind)
}

pub fn is_header_line1(line: &str) -> bool {
    header_line1_layout(line).is_some()
}

pub fn is_header_line2(line: &str) -> bool {
    header_line2_layout(line).is_some()
}

pub fn is_header_line3(line: &str) -> bool {
    header_line3_layout(line).is_some()
}

pub fn header_line1_layout(line: &str) -> Option<HeaderLayout> {
    layout_of(line, &HEADER_1, &HEADER_1_LEGACY)
}

pub fn header_line2_layout(line: &str) -> Option<HeaderLayout> {
    layout_of(line, &HEADER_2, &HEADER_2_LEGACY)
}

pub fn header_line3_layout(line: &str) -> Option<HeaderLayout> {
    layout_of(line, &HEADER_3, &HEADER_3_LEGACY)
}

fn layout_of(line: &str, standard: &Regex, legacy: &Regex) -> Option<HeaderLayout> {
    if standard.is_match(line) {
        Some(HeaderLayout::Standard)
    } else if legacy.is_match(line) {
        Some(HeaderLayout::Legacy)
    } else {
        None
    }
}

/// Characters `range` of `line`, clamped to the line length
///
/// Columns are counted in characters, not bytes, so a stray multi-byte
/// character cannot split a slice.
pub fn column(line: &str, range: Range<usize>) -> &str {
    let start = byte_offset(line, range.start);
    let end = byte_offset(line, range.end.max(range.start));
    &line[start..end]
}

/// Everything from character `start` onwards
pub fn column_from(line: &str, start: usize) -> &str {
    &line[byte_offset(line, start)..]
}

fn byte_offset(line: &str, chars: usize) -> usize {
    line.char_indices()
        .nth(chars)
        .map(|(offset, _)| offset)
        .unwrap_or(line.len())
}
