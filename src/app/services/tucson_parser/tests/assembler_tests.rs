//! Tests for series reconstruction over whole files

use super::*;
use crate::Error;
use crate::app::models::{
    DatingConvention, Dialect, FileKind, KeycodeWidth, PrecisionUnit, YearMarker,
};
use crate::app::services::tucson_parser::{DiagnosticKind, Diagnostics, SeriesAssembler};
use crate::config::ParserConfig;

fn count_kind(result: &crate::ParseResult, kind: DiagnosticKind) -> usize {
    result.diagnostics.iter().filter(|d| d.kind == kind).count()
}

#[test]
fn test_header_and_clean_decade() {
    let mut lines = header_block("ABCDEF");
    lines.push(rwl_line("ABCDEF", 1900, &CLEAN_DECADE));

    let result = parse(&lines).unwrap();

    assert_eq!(result.dialect, Dialect::new(FileKind::Rwl, KeycodeWidth::Six));
    assert_eq!(result.year_marker_chars, 4);
    assert_eq!(result.series.len(), 1);

    let series = &result.series[0];
    assert_eq!(series.key, "ABCDEF");
    assert_eq!(series.ring_widths, CLEAN_DECADE.to_vec());
    assert!(!series.terminated);
    assert_eq!(series.precision, PrecisionUnit::Unspecified);
    assert_eq!(series.first_year, Some(YearMarker::new(1900)));
    assert_eq!(series.last_year(), Some(YearMarker::new(1909)));
    assert_eq!(series.start_line, 1);
    assert_eq!(
        series.header.as_ref().map(|h| h.site_name.as_str()),
        Some("Tree Site Name")
    );

    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_multi_decade_series_with_stop_marker() {
    let mut lines = header_block("ABCDEF");
    lines.push(rwl_tokens_line("ABCDEF", 1895, &["21", "22", "23", "24", "25"]));
    lines.push(rwl_line("ABCDEF", 1900, &CLEAN_DECADE));
    lines.push(rwl_tokens_line("ABCDEF", 1910, &["30", "31", "999"]));

    let result = parse(&lines).unwrap();
    assert_eq!(result.series.len(), 1);

    let series = &result.series[0];
    assert_eq!(series.len(), 17);
    assert_eq!(series.first_year, Some(YearMarker::new(1895)));
    assert_eq!(series.last_year(), Some(YearMarker::new(1911)));
    assert_eq!(series.precision, PrecisionUnit::HundredthMillimetre);
    assert!(series.terminated);
    assert_eq!(result.stats.data_lines, 3);
    assert_eq!(result.stats.header_lines, 3);
}

#[test]
fn test_decade_discontinuity_is_fatal() {
    let mut lines = header_block("ABCDEF");
    lines.push(rwl_line("ABCDEF", 1900, &CLEAN_DECADE));
    lines.push(rwl_line("ABCDEF", 1920, &CLEAN_DECADE));

    match parse(&lines) {
        Err(Error::InvalidDecadeMarker {
            line_number,
            found,
            previous,
        }) => {
            assert_eq!(line_number, 5);
            assert_eq!(found, "1920");
            assert_eq!(previous, Some(YearMarker::new(1900)));
        }
        other => panic!("expected InvalidDecadeMarker, got {:?}", other),
    }
}

#[test]
fn test_repeated_decade_is_fatal() {
    let lines = vec![
        rwl_line("ABCDEF", 1900, &CLEAN_DECADE),
        rwl_line("ABCDEF", 1900, &CLEAN_DECADE),
    ];

    let error = parse(&lines).unwrap_err();
    assert!(matches!(error, Error::InvalidDecadeMarker { line_number: 2, .. }));
    assert!(error.to_string().contains("between 1901 and 1910"));
}

#[test]
fn test_mismatched_header_triple_creates_nothing() {
    let lines = [
        header_line1("ABCDEF"),
        header_line2("XYZXYZ"),
        header_line3("ABCDEF"),
    ];
    let mut assembler = SeriesAssembler::new(
        Dialect::new(FileKind::Rwl, KeycodeWidth::Six),
        DatingConvention::Astronomical,
    );
    let mut diagnostics = Diagnostics::new(0);

    for (index, line) in lines.iter().enumerate() {
        assembler.process_line(index + 1, line, &mut diagnostics).unwrap();
    }
    let (series, _, stats) = assembler.finish(&mut diagnostics);

    assert!(series.is_empty());
    assert_eq!(stats.header_lines, 3);

    let diagnostics = diagnostics.into_vec();
    assert_eq!(diagnostics.len(), 3);
    assert!(
        diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::UnrecognizedHeaderLine)
    );
    let lines: Vec<_> = diagnostics.iter().map(|d| d.line_number).collect();
    assert_eq!(lines, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn test_mismatched_header_before_data() {
    let mut lines = vec![
        header_line1("ABCDEF"),
        header_line2("XYZXYZ"),
        header_line3("ABCDEF"),
    ];
    lines.push(rwl_line("ABCDEF", 1900, &CLEAN_DECADE));

    let result = parse(&lines).unwrap();
    assert_eq!(result.series.len(), 1);
    assert!(result.series[0].header.is_none());
    assert_eq!(count_kind(&result, DiagnosticKind::UnrecognizedHeaderLine), 3);
    assert_eq!(count_kind(&result, DiagnosticKind::MissingHeader), 1);
}

#[test]
fn test_partial_header_cache_flushed_by_data() {
    let lines = vec![
        header_line1("ABCDEF"),
        header_line2("ABCDEF"),
        rwl_line("ABCDEF", 1900, &CLEAN_DECADE),
    ];

    let result = parse(&lines).unwrap();
    assert_eq!(count_kind(&result, DiagnosticKind::UnrecognizedHeaderLine), 2);
    assert!(result.series[0].header.is_none());
}

#[test]
fn test_headerless_series_split_on_key_change() {
    let lines = vec![
        rwl_line("AAA01", 1900, &CLEAN_DECADE),
        rwl_tokens_line("AAA01", 1910, &["5", "6", "999"]),
        rwl_line("AAA02", 1850, &CLEAN_DECADE),
        rwl_tokens_line("AAA02", 1860, &["7", "-9999"]),
    ];

    let result = parse(&lines).unwrap();
    assert_eq!(result.series.len(), 2);

    assert_eq!(result.series[0].key, "AAA01");
    assert_eq!(result.series[0].len(), 12);
    assert_eq!(result.series[0].precision, PrecisionUnit::HundredthMillimetre);

    assert_eq!(result.series[1].key, "AAA02");
    assert_eq!(result.series[1].start_line, 3);
    assert_eq!(result.series[1].first_year, Some(YearMarker::new(1850)));
    assert_eq!(result.series[1].precision, PrecisionUnit::ThousandthMillimetre);

    assert_eq!(count_kind(&result, DiagnosticKind::MissingHeader), 1);
    assert_eq!(result.stats.series_count, 2);
}

#[test]
fn test_same_key_after_stop_opens_new_series() {
    let lines = vec![
        rwl_tokens_line("AAA01", 1900, &["5", "6", "999"]),
        rwl_line("AAA01", 1700, &CLEAN_DECADE),
    ];

    let result = parse(&lines).unwrap();
    assert_eq!(result.series.len(), 2);
    assert!(result.series[0].terminated);
    assert!(!result.series[1].terminated);
    assert_eq!(result.series[1].first_year, Some(YearMarker::new(1700)));
}

#[test]
fn test_missing_value_sentinel_ends_series() {
    let lines = vec![
        rwl_tokens_line("AAA01", 1900, &["5", "6", "-999", "8"]),
        rwl_line("AAA01", 1910, &CLEAN_DECADE),
    ];

    let result = parse(&lines).unwrap();
    assert_eq!(result.series.len(), 2);
    assert_eq!(result.series[0].ring_widths, vec![5, 6, 0]);
    assert!(result.series[0].terminated);
    assert_eq!(result.series[0].precision, PrecisionUnit::Unspecified);
    assert_eq!(count_kind(&result, DiagnosticKind::MissingValueSentinel), 1);
}

#[test]
fn test_unclassified_lines_are_warnings() {
    let lines = vec![
        "Site notes: cores taken 1995".to_string(),
        rwl_line("AAA01", 1900, &CLEAN_DECADE),
        String::new(),
        "   ".to_string(),
        rwl_line("AAA01", 1910, &CLEAN_DECADE),
    ];

    let result = parse(&lines).unwrap();
    assert_eq!(result.series.len(), 1);
    assert_eq!(result.series[0].len(), 20);

    assert_eq!(count_kind(&result, DiagnosticKind::UnrecognizedLine), 1);
    assert_eq!(result.stats.total_lines, 5);
    assert_eq!(result.stats.blank_lines, 2);
    assert_eq!(result.stats.unclassified_lines, 1);
}

#[test]
fn test_negative_years_warned_once_and_cross_year_zero() {
    let lines = vec![
        rwl_line("AAA01", -10, &CLEAN_DECADE),
        rwl_line("AAA01", 0, &CLEAN_DECADE),
        rwl_line("AAA01", 10, &CLEAN_DECADE),
    ];

    let result = parse(&lines).unwrap();
    let series = &result.series[0];

    // Astronomical -10 is 11 BC
    assert_eq!(series.first_year, Some(YearMarker::new(-11)));
    assert_eq!(series.last_year(), Some(YearMarker::new(19)));
    assert_eq!(count_kind(&result, DiagnosticKind::NegativeYears), 1);
}

#[test]
fn test_bc_ad_dating_reads_markers_literally() {
    let lines = vec![
        rwl_line("AAA01", -20, &CLEAN_DECADE),
        rwl_line("AAA01", -10, &CLEAN_DECADE),
        rwl_line("AAA01", 1, &CLEAN_DECADE),
    ];

    let config = ParserConfig::new().with_dating(DatingConvention::BcAd);
    let result = parse_with(config, &lines).unwrap();
    let series = &result.series[0];

    assert_eq!(series.first_year.map(|y| y.year()), Some(-20));
    assert_eq!(series.last_year().map(|y| y.year()), Some(10));
}

#[test]
fn test_five_character_years_switch() {
    let lines = vec![
        rwl_line("ABCDE-", 1234, &CLEAN_DECADE),
        rwl_line("ABCDE-", 1224, &CLEAN_DECADE),
        rwl_tokens_line("ABCDE-", 1214, &["10", "999"]),
    ];

    let result = parse(&lines).unwrap();
    assert_eq!(result.year_marker_chars, 5);
    assert_eq!(result.series.len(), 1);

    let series = &result.series[0];
    assert_eq!(series.key, "ABCDE");
    assert_eq!(series.len(), 21);
    assert_eq!(series.first_year, Some(YearMarker::new(-1235)));
    assert!(series.terminated);

    assert_eq!(count_kind(&result, DiagnosticKind::FiveCharacterYears), 1);
    assert_eq!(count_kind(&result, DiagnosticKind::NegativeYears), 1);
}

#[test]
fn test_chronology_file() {
    let mut lead_in = vec![(9990, 0); 2];
    lead_in.extend([(1023, 12); 8]);
    let mut lead_out = vec![(987, 20); 3];
    lead_out.extend([(9990, 0); 7]);

    let lines = vec![
        crn_line("CAM", 1850, &lead_in),
        crn_line("CAM", 1860, &[(1001, 15); 10]),
        header_line1("CAM"),
        crn_line("CAM", 1870, &lead_out),
    ];

    let result = parse(&lines).unwrap();
    assert_eq!(result.dialect.file_kind, FileKind::Crn);
    assert_eq!(result.series.len(), 1);

    let series = &result.series[0];
    assert_eq!(series.key, "CAM");
    assert_eq!(series.len(), 21);
    assert_eq!(series.sample_depths.len(), 21);
    assert_eq!(series.first_year, Some(YearMarker::new(1852)));
    assert_eq!(series.last_year(), Some(YearMarker::new(1872)));
    assert_eq!(series.sample_depth(0), Some(12));
    assert_eq!(series.sample_depth(20), Some(20));

    assert_eq!(count_kind(&result, DiagnosticKind::IgnoredChronologyHeader), 1);
}

#[test]
fn test_diagnostic_limit() {
    let mut lines = vec![rwl_line("AAA01", 1900, &CLEAN_DECADE)];
    for i in 0..5 {
        lines.push(format!("comment line number {}", i));
    }

    let config = ParserConfig::new().with_max_diagnostics(2);
    let result = parse_with(config, &lines).unwrap();

    assert_eq!(result.diagnostics.len(), 3);
    assert_eq!(
        result.diagnostics.last().map(|d| d.kind),
        Some(DiagnosticKind::DiagnosticLimitReached)
    );
    assert_eq!(result.stats.suppressed_diagnostics, 4);
}

#[test]
fn test_fatal_error_as_diagnostic() {
    let lines = vec![
        rwl_line("AAA01", 1900, &CLEAN_DECADE),
        rwl_line("AAA01", 1950, &CLEAN_DECADE),
    ];

    let diagnostic = parse(&lines).unwrap_err().to_diagnostic();
    assert!(diagnostic.is_fatal());
    assert_eq!(diagnostic.kind, DiagnosticKind::InvalidDecadeMarker);
    assert_eq!(diagnostic.line_number, Some(2));
}

#[test]
fn test_header_with_long_species_name_attaches_to_series() {
    let lines = vec![
        header_line1("ABCDEF"),
        header_line2_species("ABCDEF", "Douglas Fir", "2790m", "1900", "1909"),
        header_line3("ABCDEF"),
        rwl_line("ABCDEF", 1900, &CLEAN_DECADE),
    ];

    let result = parse(&lines).unwrap();
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

    let header = result.series[0].header.as_ref().unwrap();
    assert_eq!(header.species_name, "Douglas Fir");
    assert_eq!(result.stats.header_lines, 3);
}

#[test]
fn test_legacy_header_attaches_to_series() {
    let mut lines = legacy_header_block("ABCDEF");
    lines.push(rwl_line("ABCDEF", 1900, &CLEAN_DECADE));

    let result = parse(&lines).unwrap();
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(result.series.len(), 1);

    let header = result.series[0].header.as_ref().unwrap();
    assert_eq!(header.site_name, "Tree Site Name");
    assert_eq!(header.elevation, Some(2450));
}
