//! Test utilities for Tucson parser testing
//!
//! Builders for fixed-column header and data lines, so individual tests can
//! describe files by content rather than by hand-counted columns.

use crate::Result;
use crate::app::services::tucson_parser::{ParseResult, TucsonParser};
use crate::config::ParserConfig;

// Test modules
mod assembler_tests;
mod decoder_tests;

/// Header line 1: site code, site name, species code
pub fn header_line1(code: &str) -> String {
    format!("{:<6}   {:<52}{}", code, "Tree Site Name", "PIPO")
}

/// Header line 2: location, species, elevation, coordinates, year range
pub fn header_line2(code: &str) -> String {
    header_line2_with(code, "2450m", "1850", "1990")
}

pub fn header_line2_with(code: &str, elevation: &str, first: &str, last: &str) -> String {
    header_line2_species(code, "Ponderos", elevation, first, last)
}

/// Header line 2 with an 18-column species name zone
pub fn header_line2_species(
    code: &str,
    species: &str,
    elevation: &str,
    first: &str,
    last: &str,
) -> String {
    format!(
        "{:<6}   {:<13}{:<18}{:>5}  {:<10}{:10}{:>4} {:>4}",
        code, "Arizona", species, elevation, "3512-11143", "", first, last
    )
}

/// Header line 3: investigator and completion date
pub fn header_line3(code: &str) -> String {
    header_line3_with(code, "19950612")
}

pub fn header_line3_with(code: &str, date: &str) -> String {
    format!("{:<6}   {:<63}{}", code, "J. Smith", date)
}

/// A well-formed three-line header block
pub fn header_block(code: &str) -> Vec<String> {
    vec![header_line1(code), header_line2(code), header_line3(code)]
}

/// A header block in the older layout: 50-column site name, 8-column species
/// name, 10-column elevation, 11-column coordinates, 61-column investigator
pub fn legacy_header_block(code: &str) -> Vec<String> {
    vec![
        format!("{:<6}   {:<50}{}", code, "Tree Site Name", "PIPO"),
        format!(
            "{:<6}   {:<13}{:<8}{:>10}{:<11}{:10}{:>4} {:>4}",
            code, "Arizona", "Ponderos", "2450", "3512-11143", "", "1850", "1990"
        ),
        format!("{:<6}   {:<61}{}", code, "J. Smith", "19950612"),
    ]
}

/// RWL data line with a six-character keycode
pub fn rwl_line(key: &str, year: i32, values: &[i32]) -> String {
    let tokens: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
    rwl_tokens_line(key, year, &tokens)
}

/// RWL data line with raw value tokens (sentinels, placeholders)
pub fn rwl_tokens_line(key: &str, year: i32, tokens: &[&str]) -> String {
    let mut line = format!("{:<6}{:>4}", key, year);
    for token in tokens {
        line.push_str(&format!("{:>6}", token));
    }
    line
}

/// RWL data line with an eight-character keycode
pub fn rwl_line8(key: &str, year: i32, values: &[i32]) -> String {
    let mut line = format!("{:<8}{:>4}", key, year);
    for value in values {
        line.push_str(&format!("{:>6}", value));
    }
    line
}

/// CRN data line: ten (index, sample depth) zones
pub fn crn_line(key: &str, year: i32, zones: &[(i32, i32)]) -> String {
    let mut line = format!("{:<6}{:>4}", key, year);
    for (index, depth) in zones {
        line.push_str(&format!("{:>4}{:>3}", index, depth));
    }
    line
}

/// The decade used throughout the tests
pub const CLEAN_DECADE: [i32; 10] = [10, 12, 9, 11, 13, 14, 8, 9, 10, 12];

/// Parse with the default configuration
pub fn parse(lines: &[String]) -> Result<ParseResult> {
    TucsonParser::new(ParserConfig::default()).parse_lines(lines)
}

/// Parse with a custom configuration
pub fn parse_with(config: ParserConfig, lines: &[String]) -> Result<ParseResult> {
    TucsonParser::new(config).parse_lines(lines)
}
