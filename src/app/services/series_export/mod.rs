//! Tabular export of parsed Tucson series
//!
//! Series are flattened into one row per ring value with the calendar year,
//! the value, an optional CRN sample depth and the series precision, then
//! written as Parquet or CSV through polars.
//!
//! - [`frame`] - Series to DataFrame conversion
//! - [`writer`] - File output and export statistics

pub mod frame;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use frame::{columns, series_to_frame};
pub use writer::{ExportStats, SeriesExporter};
