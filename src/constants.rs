//! Application constants for the Tucson processor
//!
//! This module contains the fixed-column layout of Tucson files, the sentinel
//! tokens recognised in decade blocks, the regular-expression fragments used to
//! classify lines, and default values used throughout the application.

// =============================================================================
// Keycode and Year Marker Layout
// =============================================================================

/// Standard short keycode width
pub const KEYCODE_WIDTH_SHORT: usize = 6;

/// Standard long keycode width
pub const KEYCODE_WIDTH_LONG: usize = 8;

/// Number of characters in a standard year marker
pub const YEAR_MARKER_CHARS: usize = 4;

/// Number of characters in a year marker once the keycode has been pinched by one
pub const YEAR_MARKER_CHARS_EXTENDED: usize = 5;

/// Lines shorter than this cannot hold a keycode plus a year marker
pub const MIN_DATA_LINE_CHARS: usize = KEYCODE_WIDTH_SHORT + YEAR_MARKER_CHARS;

/// Values per complete decade block
pub const VALUES_PER_DECADE: usize = 10;

// =============================================================================
// Value Zones
// =============================================================================

/// Width of one RWL value zone (sign plus up to five digits)
pub const RWL_VALUE_WIDTH: usize = 6;

/// Width of the index part of a CRN value zone
pub const CRN_INDEX_WIDTH: usize = 4;

/// Width of the sample-depth part of a CRN value zone
pub const CRN_DEPTH_WIDTH: usize = 3;

/// Width of one complete CRN value zone
pub const CRN_VALUE_WIDTH: usize = CRN_INDEX_WIDTH + CRN_DEPTH_WIDTH;

// =============================================================================
// Sentinel Tokens
// =============================================================================

/// Stop marker declaring 0.01mm precision
pub mod sentinels {
    /// Stop marker for series measured in hundredths of a millimetre
    pub const STOP_HUNDREDTH_MM: &str = "999";

    /// Stop marker for series measured in thousandths of a millimetre
    pub const STOP_THOUSANDTH_MM: &str = "-9999";

    /// Missing ring marker
    pub const MISSING_VALUE: &str = "-999";

    /// Page-filling placeholder written after a stop marker
    pub const PLACEHOLDER: &str = ".";

    /// Ring value substituted for a missing ring
    pub const MISSING_VALUE_SUBSTITUTE: i32 = 0;

    /// CRN no-data index value (lead-in or lead-out)
    pub const CRN_NO_DATA: i32 = 9990;
}

// =============================================================================
// Header Layout
// =============================================================================

/// Character ranges of the fields in the three-line header
///
/// Two layouts are in circulation. The standard ITRDB layout gives the species
/// name 18 columns and ends line 2 with the year range at column 67. Older
/// writers used an 8-column species name, a 10-column elevation and shorter
/// site name and investigator fields, which shifts every later field left.
pub mod header_columns {
    use std::ops::Range;

    /// Site code shared by all three header lines
    pub const SITE_CODE: Range<usize> = 0..6;

    /// Field ranges of one header layout
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct HeaderColumns {
        pub site_name: Range<usize>,
        pub species_code: Range<usize>,
        pub state_country: Range<usize>,
        pub species_name: Range<usize>,
        /// Elevation with optional unit suffix
        pub elevation: Range<usize>,
        pub lat_long: Range<usize>,
        pub first_year: Range<usize>,
        pub last_year: Range<usize>,
        pub investigator: Range<usize>,
        /// Completion date (YYYYMMDD)
        pub completion_date: Range<usize>,
    }

    pub const STANDARD: HeaderColumns = HeaderColumns {
        site_name: 9..61,
        species_code: 61..65,
        state_country: 9..22,
        species_name: 22..40,
        elevation: 40..47,
        lat_long: 47..57,
        first_year: 67..71,
        last_year: 72..76,
        investigator: 9..72,
        completion_date: 72..80,
    };

    pub const LEGACY: HeaderColumns = HeaderColumns {
        site_name: 9..59,
        species_code: 59..63,
        state_country: 9..22,
        species_name: 22..30,
        elevation: 30..40,
        lat_long: 40..51,
        first_year: 61..65,
        last_year: 66..70,
        investigator: 9..70,
        completion_date: 70..78,
    };
}

// =============================================================================
// Line Patterns
// =============================================================================

/// Regular-expression fragments describing the fixed-column line shapes
///
/// Character classes are spelled out in ASCII so they match the same bytes as
/// the published Tucson format description regardless of Unicode settings.
pub mod patterns {
    /// One keycode character: word characters, tab, and the range space..='.'
    pub const KEYCODE_CHAR: &str = r"[A-Za-z0-9_\t -.]";

    /// Year marker zone
    pub const YEAR: &str = r"[\t0-9\- ]{3}[0-9]";

    /// One RWL value zone
    pub const RWL_VALUE: &str = r"[ \-][\t0-9\- ]{4}[0-9]";

    /// One CRN value zone (index plus sample depth)
    pub const CRN_VALUE: &str = r"[0-9 ]{4}(?:[0-9]{3}| [0-9]{2}|  [0-9])";

    /// Header line 1: nine free characters, site name, four-letter species code
    pub const HEADER_LINE1: &str = r"(?i)^.{9}.{52}[A-Z]{4}";

    /// Header line 2: location and species name, elevation, coordinates and
    /// year range
    pub const HEADER_LINE2: &str =
        r"(?i)^.{9}.{31}[0-9mft.\t \-]{7}[0-9\t+\- ]{10}[\t ]{10}[0-9\t\- ]{9}";

    /// Header line 3: investigator and completion date
    pub const HEADER_LINE3: &str = r"(?i)^.{9}[A-Za-z0-9_\t. ,\-]{63}[0-9\t ]{8}";

    /// Legacy header line 1: shorter site name, nothing after the species code
    pub const HEADER_LINE1_LEGACY: &str = r"(?i)^.{9}.{50}[A-Z]{4}\s*$";

    /// Legacy header line 2: 8-column species name and 10-column elevation
    pub const HEADER_LINE2_LEGACY: &str =
        r"(?i)^.{9}.{21}[0-9mft.\t \-]{10}.{11}[\t ]{10}[0-9\t\- ]{9}\s*$";

    /// Legacy header line 3: shorter investigator field
    pub const HEADER_LINE3_LEGACY: &str = r"(?i)^.{9}[A-Za-z0-9_\t. ,\-]{61}[0-9\t ]{8}\s*$";
}

// =============================================================================
// Defaults
// =============================================================================

/// Default cap on stored diagnostics per file
pub const DEFAULT_MAX_DIAGNOSTICS: usize = 10_000;

/// File extensions associated with the Tucson family
pub const TUCSON_EXTENSIONS: &[&str] = &["rwl", "crn"];

/// Default Parquet compression name for the CLI
pub const DEFAULT_COMPRESSION: &str = "snappy";
