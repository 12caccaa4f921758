//! Diagnostics collected while reading a Tucson file
//!
//! Recoverable anomalies are recorded here as warnings and parsing continues.
//! Fatal outcomes are returned as [`crate::Error`] and can be converted into a
//! [`Diagnostic`] with [`crate::Error::to_diagnostic`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Fatal => f.write_str("fatal"),
        }
    }
}

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    // Warnings
    UnrecognizedLine,
    UnrecognizedHeaderLine,
    NegativeYears,
    FiveCharacterYears,
    MissingValueSentinel,
    MissingHeader,
    InvalidHeaderField,
    IgnoredChronologyHeader,
    NonUtf8Input,
    DiagnosticLimitReached,

    // Fatal
    NoDataFound,
    AmbiguousFormat,
    UndeterminedKeycodeWidth,
    InvalidDecadeMarker,
    InvalidDataValue,
    Other,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnrecognizedLine => "unrecognized-line",
            DiagnosticKind::UnrecognizedHeaderLine => "unrecognized-header-line",
            DiagnosticKind::NegativeYears => "negative-years",
            DiagnosticKind::FiveCharacterYears => "five-character-years",
            DiagnosticKind::MissingValueSentinel => "missing-value-sentinel",
            DiagnosticKind::MissingHeader => "missing-header",
            DiagnosticKind::InvalidHeaderField => "invalid-header-field",
            DiagnosticKind::IgnoredChronologyHeader => "ignored-chronology-header",
            DiagnosticKind::NonUtf8Input => "non-utf8-input",
            DiagnosticKind::DiagnosticLimitReached => "diagnostic-limit-reached",
            DiagnosticKind::NoDataFound => "no-data-found",
            DiagnosticKind::AmbiguousFormat => "ambiguous-format",
            DiagnosticKind::UndeterminedKeycodeWidth => "undetermined-keycode-width",
            DiagnosticKind::InvalidDecadeMarker => "invalid-decade-marker",
            DiagnosticKind::InvalidDataValue => "invalid-data-value",
            DiagnosticKind::Other => "other",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single warning or fatal error, located by 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub line_number: Option<usize>,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, message: String, line_number: Option<usize>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message,
            line_number,
        }
    }

    pub fn fatal(kind: DiagnosticKind, message: String, line_number: Option<usize>) -> Self {
        Self {
            severity: Severity::Fatal,
            kind,
            message,
            line_number,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "line {}: {} ({})", line, self.message, self.kind),
            None => write!(f, "{} ({})", self.message, self.kind),
        }
    }
}

/// Accumulates warnings for one parse
///
/// Storage is capped at `max_stored` entries (0 disables the cap). Once the cap
/// is hit a single [`DiagnosticKind::DiagnosticLimitReached`] entry is added and
/// further warnings are only counted.
#[derive(Debug)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    reported_once: HashSet<DiagnosticKind>,
    max_stored: usize,
    suppressed: usize,
}

impl Diagnostics {
    pub fn new(max_stored: usize) -> Self {
        Self {
            entries: Vec::new(),
            reported_once: HashSet::new(),
            max_stored,
            suppressed: 0,
        }
    }

    /// Record a warning
    pub fn warn(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        line_number: Option<usize>,
    ) {
        let diagnostic = Diagnostic::warning(kind, message.into(), line_number);

        if self.max_stored > 0 && self.entries.len() >= self.max_stored {
            if self.suppressed == 0 {
                warn!(
                    "Diagnostic limit of {} reached, further warnings are counted only",
                    self.max_stored
                );
                self.entries.push(Diagnostic::warning(
                    DiagnosticKind::DiagnosticLimitReached,
                    format!("Diagnostic limit of {} reached", self.max_stored),
                    line_number,
                ));
            }
            self.suppressed += 1;
            return;
        }

        warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Record a warning the first time `kind` is seen in this parse
    pub fn warn_once(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        line_number: Option<usize>,
    ) {
        if self.reported_once.insert(kind) {
            self.warn(kind, message, line_number);
        }
    }

    /// Number of warnings dropped after the storage cap was reached
    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
