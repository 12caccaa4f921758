//! Tucson Processor Library
//!
//! A Rust library for reading dendrochronology ring-width data stored in the
//! Tucson family of formats (`.rwl` raw measurement files and `.crn`
//! chronology files) and converting it into tabular Parquet or CSV output.
//!
//! Tucson files carry no format identifier, so this library provides tools for:
//! - Classifying fixed-column lines into header and decade-block shapes
//! - Inferring the file kind (RWL or CRN) and keycode width from whole-file statistics
//! - Extracting site metadata from the standard three-line header
//! - Reconstructing measurement series from a flat stream of decade blocks,
//!   enforcing decade continuity and honouring stop and missing-value sentinels
//! - Collecting non-fatal diagnostics with 1-based line numbers
//! - Exporting parsed series to Parquet or CSV through polars

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod series_export;
        pub mod tucson_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    DatingConvention, Dialect, FileKind, HeaderFields, KeycodeWidth, PrecisionUnit, Series,
    YearMarker,
};
pub use app::services::tucson_parser::{
    Diagnostic, DiagnosticKind, ParseResult, Severity, TucsonParser,
};
pub use config::{ExportConfig, ParserConfig};

/// Result type alias for the Tucson processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Tucson parsing and export operations
///
/// The first five variants are the fatal outcomes of a parse. Everything the
/// reader can recover from is reported as a [`Diagnostic`] instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No line in the input looks like RWL or CRN data
    #[error("No data lines found: input does not look like a Tucson file")]
    NoDataFound,

    /// Equal evidence for RWL and CRN data
    #[error(
        "Unable to determine whether file is RWL or CRN: {rwl_lines} RWL-like and {crn_lines} CRN-like lines"
    )]
    AmbiguousFormat { rwl_lines: usize, crn_lines: usize },

    /// No data line matched either keycode width
    #[error("Unable to determine keycode width (6 or 8 characters)")]
    UndeterminedKeycodeWidth,

    /// Year marker is not numeric, or breaks the decade sequence
    #[error(
        "Invalid decade marker '{found}' on line {line_number}{}",
        continuity_context(.previous)
    )]
    InvalidDecadeMarker {
        line_number: usize,
        found: String,
        previous: Option<YearMarker>,
    },

    /// Non-numeric token where a ring value was required
    #[error("Invalid data value '{token}' on line {line_number}")]
    InvalidDataValue { line_number: usize, token: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Export (DataFrame construction or file writing) failed
    #[error("Export error: {message}")]
    Export {
        message: String,
        #[source]
        source: Option<polars::error::PolarsError>,
    },
}

fn continuity_context(previous: &Option<YearMarker>) -> String {
    match previous {
        Some(previous) => format!(
            " (expected a year between {} and {})",
            previous.add(1),
            previous.add(10)
        ),
        None => String::new(),
    }
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an export error wrapping a polars failure
    pub fn export(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Export {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an export error with no underlying source
    pub fn export_message(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid decade marker error for a non-numeric marker
    pub fn invalid_decade_marker(line_number: usize, found: impl Into<String>) -> Self {
        Self::InvalidDecadeMarker {
            line_number,
            found: found.into(),
            previous: None,
        }
    }

    /// Create an invalid decade marker error for a continuity violation
    pub fn decade_discontinuity(
        line_number: usize,
        found: YearMarker,
        previous: YearMarker,
    ) -> Self {
        Self::InvalidDecadeMarker {
            line_number,
            found: found.to_string(),
            previous: Some(previous),
        }
    }

    /// Create an invalid data value error
    pub fn invalid_data_value(line_number: usize, token: impl Into<String>) -> Self {
        Self::InvalidDataValue {
            line_number,
            token: token.into(),
        }
    }

    /// Line number of the offending input line, if the error has one
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::InvalidDecadeMarker { line_number, .. }
            | Self::InvalidDataValue { line_number, .. } => Some(*line_number),
            _ => None,
        }
    }

    /// Whether this error is one of the fatal parse outcomes (as opposed to
    /// an I/O, configuration or export failure)
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::NoDataFound
                | Self::AmbiguousFormat { .. }
                | Self::UndeterminedKeycodeWidth
                | Self::InvalidDecadeMarker { .. }
                | Self::InvalidDataValue { .. }
        )
    }

    /// Present this error as a fatal [`Diagnostic`]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let kind = match self {
            Self::NoDataFound => DiagnosticKind::NoDataFound,
            Self::AmbiguousFormat { .. } => DiagnosticKind::AmbiguousFormat,
            Self::UndeterminedKeycodeWidth => DiagnosticKind::UndeterminedKeycodeWidth,
            Self::InvalidDecadeMarker { .. } => DiagnosticKind::InvalidDecadeMarker,
            Self::InvalidDataValue { .. } => DiagnosticKind::InvalidDataValue,
            Self::Io { .. } | Self::Configuration { .. } | Self::Export { .. } => {
                DiagnosticKind::Other
            }
        };
        Diagnostic::fatal(kind, self.to_string(), self.line_number())
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Export {
            message: "DataFrame operation failed".to_string(),
            source: Some(error),
        }
    }
}
