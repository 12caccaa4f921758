//! Whole-file format inference
//!
//! Tucson files declare neither their kind nor their keycode width, so both are
//! decided from counts taken over every line before any series is built.

use super::line_classifier::{LineKind, classify};
use crate::app::models::{Dialect, FileKind, KeycodeWidth};
use crate::{Error, Result};
use tracing::debug;

/// Line counts gathered by a single forward scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evidence {
    pub rwl_lines: usize,
    pub crn_lines: usize,
    pub header_lines: usize,
    pub keycode_len_6_hits: usize,
    pub keycode_len_8_hits: usize,
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified line
    pub fn record(&mut self, kind: LineKind) {
        match kind.file_kind() {
            Some(FileKind::Rwl) => self.rwl_lines += 1,
            Some(FileKind::Crn) => self.crn_lines += 1,
            None if kind.is_header() => self.header_lines += 1,
            None => {}
        }

        match kind.keycode_width() {
            Some(KeycodeWidth::Six) => self.keycode_len_6_hits += 1,
            Some(KeycodeWidth::Eight) => self.keycode_len_8_hits += 1,
            None => {}
        }
    }

    /// Decide the dialect from the counts
    ///
    /// A width tie resolves to eight characters. When `width_hint` is given it
    /// replaces the width tally entirely.
    pub fn resolve(&self, width_hint: Option<KeycodeWidth>) -> Result<Dialect> {
        if self.rwl_lines == 0 && self.crn_lines == 0 {
            return Err(Error::NoDataFound);
        }

        if width_hint.is_none() && self.keycode_len_6_hits == 0 && self.keycode_len_8_hits == 0 {
            return Err(Error::UndeterminedKeycodeWidth);
        }

        if self.rwl_lines == self.crn_lines {
            return Err(Error::AmbiguousFormat {
                rwl_lines: self.rwl_lines,
                crn_lines: self.crn_lines,
            });
        }

        let file_kind = if self.crn_lines > self.rwl_lines {
            FileKind::Crn
        } else {
            FileKind::Rwl
        };

        let evidence_width = if self.keycode_len_6_hits > self.keycode_len_8_hits {
            KeycodeWidth::Six
        } else {
            KeycodeWidth::Eight
        };
        let keycode_width = width_hint.unwrap_or(evidence_width);

        Ok(Dialect::new(file_kind, keycode_width))
    }
}

/// Classify every line once and infer the file's dialect
pub fn sniff<S: AsRef<str>>(
    lines: &[S],
    width_hint: Option<KeycodeWidth>,
) -> Result<(Dialect, Evidence)> {
    let mut evidence = Evidence::new();
    for line in lines {
        evidence.record(classify(line.as_ref()).kind);
    }

    debug!(
        "Sniffed {} lines: rwl={} crn={} header={} width6={} width8={}",
        lines.len(),
        evidence.rwl_lines,
        evidence.crn_lines,
        evidence.header_lines,
        evidence.keycode_len_6_hits,
        evidence.keycode_len_8_hits
    );

    let dialect = evidence.resolve(width_hint)?;
    debug!(
        "Resolved dialect: {} with {}-character keycodes",
        dialect.file_kind, dialect.keycode_width
    );

    Ok((dialect, evidence))
}
