//! Conversion of parsed series into a long-format DataFrame
//!
//! One row per ring value. Series without a first year carry no values and
//! produce no rows.

use crate::app::models::Series;
use crate::config::ExportConfig;
use crate::{Error, Result};
use polars::prelude::{Column, DataFrame};
use tracing::debug;

/// Output column names
pub mod columns {
    pub const SERIES: &str = "series";
    pub const YEAR: &str = "year";
    pub const VALUE: &str = "value";
    pub const SAMPLE_DEPTH: &str = "sample_depth";
    pub const PRECISION: &str = "precision";
    pub const SITE_CODE: &str = "site_code";
    pub const SITE_NAME: &str = "site_name";
    pub const SPECIES_CODE: &str = "species_code";
}

/// Build the export table for a set of series
pub fn series_to_frame(series: &[Series], config: &ExportConfig) -> Result<DataFrame> {
    let rows: usize = series
        .iter()
        .filter(|s| s.first_year.is_some())
        .map(Series::len)
        .sum();

    let mut keys: Vec<&str> = Vec::with_capacity(rows);
    let mut years: Vec<i32> = Vec::with_capacity(rows);
    let mut values: Vec<i32> = Vec::with_capacity(rows);
    let mut depths: Vec<Option<i32>> = Vec::with_capacity(rows);
    let mut precisions: Vec<&str> = Vec::with_capacity(rows);
    let mut site_codes: Vec<Option<&str>> = Vec::new();
    let mut site_names: Vec<Option<&str>> = Vec::new();
    let mut species_codes: Vec<Option<&str>> = Vec::new();

    for s in series {
        if s.first_year.is_none() {
            debug!("Series '{}' has no dated values, skipping", s.key);
            continue;
        }

        for (index, (value, year)) in s.ring_widths.iter().zip(s.years()).enumerate() {
            keys.push(&s.key);
            years.push(year.year());
            values.push(*value);
            depths.push(s.sample_depth(index));
            precisions.push(s.precision.as_str());

            if config.include_header_columns {
                let header = s.header.as_ref();
                site_codes.push(header.map(|h| h.site_code.as_str()));
                site_names.push(header.map(|h| h.site_name.as_str()));
                species_codes.push(header.map(|h| h.species_code.as_str()));
            }
        }
    }

    let mut frame_columns = vec![
        Column::new(columns::SERIES.into(), keys),
        Column::new(columns::YEAR.into(), years),
        Column::new(columns::VALUE.into(), values),
        Column::new(columns::SAMPLE_DEPTH.into(), depths),
        Column::new(columns::PRECISION.into(), precisions),
    ];

    if config.include_header_columns {
        frame_columns.push(Column::new(columns::SITE_CODE.into(), site_codes));
        frame_columns.push(Column::new(columns::SITE_NAME.into(), site_names));
        frame_columns.push(Column::new(columns::SPECIES_CODE.into(), species_codes));
    }

    let frame = DataFrame::new(frame_columns)
        .map_err(|e| Error::export("Failed to build series DataFrame", e))?;
    debug!(
        "Built frame with {} rows and {} columns",
        frame.height(),
        frame.width()
    );
    Ok(frame)
}
