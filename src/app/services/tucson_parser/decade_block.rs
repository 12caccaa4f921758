//! Decade block decoding
//!
//! A data line is a keycode, a year marker and up to ten value zones. RWL zones
//! are six characters wide and may hold stop or missing-value sentinels. CRN
//! zones are seven characters: a four-character index and a three-character
//! sample depth.

use super::line_classifier::{column, column_from};
use crate::app::models::{DatingConvention, Dialect, FileKind, PrecisionUnit, YearMarker};
use crate::constants::sentinels::{
    CRN_NO_DATA, MISSING_VALUE, MISSING_VALUE_SUBSTITUTE, PLACEHOLDER, STOP_HUNDREDTH_MM,
    STOP_THOUSANDTH_MM,
};
use crate::constants::{CRN_INDEX_WIDTH, CRN_VALUE_WIDTH, RWL_VALUE_WIDTH, VALUES_PER_DECADE};
use crate::{Error, Result};

/// How a decade block ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    /// Values ran to the end of the line; the series may continue
    Open,
    /// A stop sentinel closed the series and declared its precision
    Stop(PrecisionUnit),
    /// A missing-value sentinel closed the series after substituting zero
    MissingValue,
}

impl BlockEnd {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BlockEnd::Open)
    }
}

/// One decoded data line
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBlock {
    pub key: String,
    pub marker: YearMarker,
    pub values: Vec<i32>,

    /// Sample depths, one per value (CRN only)
    pub depths: Vec<i32>,

    /// Years between the marker and the first emitted value
    pub first_value_offset: usize,

    pub end: BlockEnd,
}

/// Decoder for data lines under a resolved dialect
#[derive(Debug, Clone, Copy)]
pub struct DecadeBlockDecoder {
    dialect: Dialect,
    year_marker_chars: usize,
    dating: DatingConvention,
}

impl DecadeBlockDecoder {
    pub fn new(dialect: Dialect, year_marker_chars: usize, dating: DatingConvention) -> Self {
        Self {
            dialect,
            year_marker_chars,
            dating,
        }
    }

    fn keycode_chars(&self) -> usize {
        self.dialect
            .keycode_width
            .effective_chars(self.year_marker_chars)
    }

    /// Series key: the keycode columns, trimmed
    pub fn series_key(&self, line: &str) -> String {
        column(line, 0..self.keycode_chars()).trim().to_string()
    }

    /// Year marker following the keycode
    pub fn year_marker(&self, line: &str, line_number: usize) -> Result<YearMarker> {
        let start = self.keycode_chars();
        let text = column(line, start..start + self.year_marker_chars);
        YearMarker::from_marker_text(text, self.dating)
            .map_err(|_| Error::invalid_decade_marker(line_number, text.trim()))
    }

    /// Decode one data line
    ///
    /// `awaiting_first_value` tells a CRN decoder that the series has no values
    /// yet, so leading no-data zones are lead-in rather than lead-out.
    pub fn decode(
        &self,
        line: &str,
        line_number: usize,
        awaiting_first_value: bool,
    ) -> Result<DecodedBlock> {
        let key = self.series_key(line);
        let marker = self.year_marker(line, line_number)?;
        let body = column_from(line, self.keycode_chars() + self.year_marker_chars);

        let mut block = DecodedBlock {
            key,
            marker,
            values: Vec::new(),
            depths: Vec::new(),
            first_value_offset: 0,
            end: BlockEnd::Open,
        };

        match self.dialect.file_kind {
            FileKind::Rwl => decode_rwl_values(body, line_number, &mut block)?,
            FileKind::Crn => {
                decode_crn_values(body, line_number, awaiting_first_value, &mut block)?
            }
        }

        Ok(block)
    }
}

fn decode_rwl_values(body: &str, line_number: usize, block: &mut DecodedBlock) -> Result<()> {
    let zones = body.chars().count() / RWL_VALUE_WIDTH;

    for zone in 0..zones {
        let start = zone * RWL_VALUE_WIDTH;
        let token = column(body, start..start + RWL_VALUE_WIDTH).trim();
        if token.is_empty() {
            continue;
        }

        match token {
            STOP_HUNDREDTH_MM => {
                block.end = BlockEnd::Stop(PrecisionUnit::HundredthMillimetre);
                break;
            }
            STOP_THOUSANDTH_MM => {
                block.end = BlockEnd::Stop(PrecisionUnit::ThousandthMillimetre);
                break;
            }
            MISSING_VALUE => {
                block.values.push(MISSING_VALUE_SUBSTITUTE);
                block.end = BlockEnd::MissingValue;
                break;
            }
            PLACEHOLDER => break,
            _ => {
                let value = token
                    .parse::<i32>()
                    .map_err(|_| Error::invalid_data_value(line_number, token))?;
                block.values.push(value);
            }
        }
    }

    Ok(())
}

fn decode_crn_values(
    body: &str,
    line_number: usize,
    awaiting_first_value: bool,
    block: &mut DecodedBlock,
) -> Result<()> {
    // Trailing characters past the tenth zone are not data
    let zones = (body.chars().count() / CRN_VALUE_WIDTH).min(VALUES_PER_DECADE);
    let mut seen_value = !awaiting_first_value;

    for zone in 0..zones {
        let start = zone * CRN_VALUE_WIDTH;
        let index_text = column(body, start..start + CRN_INDEX_WIDTH).trim();
        let depth_text = column(body, start + CRN_INDEX_WIDTH..start + CRN_VALUE_WIDTH).trim();

        let index = index_text
            .parse::<i32>()
            .map_err(|_| Error::invalid_data_value(line_number, index_text))?;
        let depth = depth_text
            .parse::<i32>()
            .map_err(|_| Error::invalid_data_value(line_number, depth_text))?;

        if index == CRN_NO_DATA {
            if seen_value {
                break;
            }
            block.first_value_offset += 1;
            continue;
        }

        seen_value = true;
        block.values.push(index);
        block.depths.push(depth);
    }

    Ok(())
}
