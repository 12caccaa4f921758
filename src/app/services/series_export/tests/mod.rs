//! Test utilities for series export testing

use crate::app::models::{HeaderFields, PrecisionUnit, Series, YearMarker};


/// A dated RWL series with optional header
pub fn sample_series(key: &str, first_year: i32, values: &[i32], with_header: bool) -> Series {
    let mut series = if with_header {
        let header = HeaderFields {
            site_code: "ABCDEF".to_string(),
            site_name: "Tree Site Name".to_string(),
            species_code: "PIPO".to_string(),
            ..HeaderFields::default()
        };
        let mut series = Series::with_header(header, 1);
        series.key = key.to_string();
        series
    } else {
        Series::headerless(key, 1)
    };

    series.first_year = Some(YearMarker::new(first_year));
    series.ring_widths = values.to_vec();
    series.precision = PrecisionUnit::HundredthMillimetre;
    series.terminated = true;
    series
}

/// A dated chronology series with sample depths
pub fn sample_chronology(key: &str, first_year: i32, values: &[(i32, i32)]) -> Series {
    let mut series = Series::headerless(key, 1);
    series.first_year = Some(YearMarker::new(first_year));
    series.ring_widths = values.iter().map(|v| v.0).collect();
    series.sample_depths = values.iter().map(|v| v.1).collect();
    series
}
