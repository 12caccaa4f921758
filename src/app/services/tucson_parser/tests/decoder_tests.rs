//! Tests for decade block decoding

use super::*;
use crate::Error;
use crate::app::models::{
    DatingConvention, Dialect, FileKind, KeycodeWidth, PrecisionUnit, YearMarker,
};
use crate::app::services::tucson_parser::{BlockEnd, DecadeBlockDecoder};

fn rwl_decoder() -> DecadeBlockDecoder {
    DecadeBlockDecoder::new(
        Dialect::new(FileKind::Rwl, KeycodeWidth::Six),
        4,
        DatingConvention::Astronomical,
    )
}

fn crn_decoder() -> DecadeBlockDecoder {
    DecadeBlockDecoder::new(
        Dialect::new(FileKind::Crn, KeycodeWidth::Six),
        4,
        DatingConvention::Astronomical,
    )
}

#[test]
fn test_decode_clean_decade() {
    let line = rwl_line("ABCDEF", 1900, &CLEAN_DECADE);
    let block = rwl_decoder().decode(&line, 4, true).unwrap();

    assert_eq!(block.key, "ABCDEF");
    assert_eq!(block.marker, YearMarker::new(1900));
    assert_eq!(block.values, CLEAN_DECADE.to_vec());
    assert!(block.depths.is_empty());
    assert_eq!(block.end, BlockEnd::Open);
}

#[test]
fn test_hundredth_stop_marker_ignores_rest_of_line() {
    let line = rwl_tokens_line("ABC", 1905, &["10", "12", "999", "44", "55"]);
    let block = rwl_decoder().decode(&line, 1, false).unwrap();

    assert_eq!(block.key, "ABC");
    assert_eq!(block.values, vec![10, 12]);
    assert_eq!(block.end, BlockEnd::Stop(PrecisionUnit::HundredthMillimetre));
    assert!(block.end.is_terminal());
}

#[test]
fn test_thousandth_stop_marker() {
    let line = rwl_tokens_line("ABC", 1905, &["1010", "-9999"]);
    let block = rwl_decoder().decode(&line, 1, false).unwrap();

    assert_eq!(block.values, vec![1010]);
    assert_eq!(block.end, BlockEnd::Stop(PrecisionUnit::ThousandthMillimetre));
}

#[test]
fn test_missing_value_sentinel_substitutes_zero_and_terminates() {
    let line = rwl_tokens_line("ABC", 1905, &["10", "-999", "12"]);
    let block = rwl_decoder().decode(&line, 1, false).unwrap();

    assert_eq!(block.values, vec![10, 0]);
    assert_eq!(block.end, BlockEnd::MissingValue);
}

#[test]
fn test_placeholder_stops_without_terminating() {
    let line = rwl_tokens_line("ABC", 1905, &["10", ".", "."]);
    let block = rwl_decoder().decode(&line, 1, false).unwrap();

    assert_eq!(block.values, vec![10]);
    assert_eq!(block.end, BlockEnd::Open);
}

#[test]
fn test_blank_zones_and_short_trailing_zone() {
    let mut line = rwl_tokens_line("ABC", 1900, &["10", "", "12"]);
    line.push_str("   7");

    let block = rwl_decoder().decode(&line, 1, false).unwrap();
    assert_eq!(block.values, vec![10, 12]);
}

#[test]
fn test_invalid_data_value() {
    let line = rwl_tokens_line("ABC", 1900, &["10", "1x2"]);

    match rwl_decoder().decode(&line, 7, false) {
        Err(Error::InvalidDataValue { line_number, token }) => {
            assert_eq!(line_number, 7);
            assert_eq!(token, "1x2");
        }
        other => panic!("expected InvalidDataValue, got {:?}", other),
    }
}

#[test]
fn test_invalid_decade_marker() {
    let line = "ABC   19x0    10    12";

    match rwl_decoder().decode(line, 3, false) {
        Err(Error::InvalidDecadeMarker {
            line_number,
            found,
            previous,
        }) => {
            assert_eq!(line_number, 3);
            assert_eq!(found, "19x0");
            assert_eq!(previous, None);
        }
        other => panic!("expected InvalidDecadeMarker, got {:?}", other),
    }
}

#[test]
fn test_astronomical_and_bc_ad_markers() {
    let line = rwl_tokens_line("ABC", -100, &["10"]);

    let block = rwl_decoder().decode(&line, 1, false).unwrap();
    assert_eq!(block.marker.year(), -101);

    let bc_ad = DecadeBlockDecoder::new(
        Dialect::new(FileKind::Rwl, KeycodeWidth::Six),
        4,
        DatingConvention::BcAd,
    );
    assert_eq!(bc_ad.decode(&line, 1, false).unwrap().marker.year(), -100);
}

#[test]
fn test_five_character_year_layout() {
    let decoder = DecadeBlockDecoder::new(
        Dialect::new(FileKind::Rwl, KeycodeWidth::Six),
        5,
        DatingConvention::BcAd,
    );
    let line = rwl_tokens_line("ABCDE-", 1234, &["10", "12"]);

    let block = decoder.decode(&line, 1, false).unwrap();
    assert_eq!(block.key, "ABCDE");
    assert_eq!(block.marker.year(), -1234);
    assert_eq!(block.values, vec![10, 12]);
}

#[test]
fn test_crn_values_and_depths() {
    let zones = [
        (1023, 12),
        (998, 11),
        (1001, 9),
        (1100, 9),
        (870, 8),
        (930, 8),
        (1010, 8),
        (1040, 7),
        (990, 7),
        (1000, 6),
    ];
    let line = crn_line("CAM", 1850, &zones);

    let block = crn_decoder().decode(&line, 1, true).unwrap();
    assert_eq!(block.values, zones.iter().map(|z| z.0).collect::<Vec<_>>());
    assert_eq!(block.depths, zones.iter().map(|z| z.1).collect::<Vec<_>>());
    assert_eq!(block.first_value_offset, 0);
    assert_eq!(block.end, BlockEnd::Open);
}

#[test]
fn test_crn_lead_in_and_lead_out() {
    let mut zones = vec![(9990, 0); 3];
    zones.extend([(1023, 12); 7]);
    let lead_in = crn_line("CAM", 1850, &zones);

    let block = crn_decoder().decode(&lead_in, 1, true).unwrap();
    assert_eq!(block.first_value_offset, 3);
    assert_eq!(block.values.len(), 7);

    let mut zones = vec![(1023, 12); 4];
    zones.extend([(9990, 0); 6]);
    let lead_out = crn_line("CAM", 1990, &zones);

    let block = crn_decoder().decode(&lead_out, 2, false).unwrap();
    assert_eq!(block.first_value_offset, 0);
    assert_eq!(block.values, vec![1023; 4]);
    assert_eq!(block.depths, vec![12; 4]);
}

#[test]
fn test_crn_ignores_characters_past_tenth_zone() {
    let mut line = crn_line("CAM", 1850, &[(1000, 5); 10]);
    line.push_str("  junk!");

    let block = crn_decoder().decode(&line, 1, true).unwrap();
    assert_eq!(block.values.len(), 10);
}
