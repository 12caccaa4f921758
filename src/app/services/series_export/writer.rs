//! Parquet and CSV output for series frames

use super::frame::{columns, series_to_frame};
use crate::app::models::Series;
use crate::config::{ExportConfig, ExportFormat};
use crate::{Error, Result};
use polars::prelude::{
    CsvWriter, DataFrame, ParquetWriter as PolarsParquetWriter, SerWriter,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Statistics for one export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    /// Rows (ring values) written
    pub rows_written: usize,

    /// Series that contributed at least one row
    pub series_written: usize,

    /// Size of the output file
    pub bytes_written: u64,
}

/// Writes series frames to disk in the configured format
#[derive(Debug, Clone)]
pub struct SeriesExporter {
    config: ExportConfig,
}

impl SeriesExporter {
    /// Create an exporter, validating the configuration
    pub fn new(config: ExportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build the frame for `series` and write it to `path`
    pub fn export(&self, series: &[Series], path: &Path) -> Result<ExportStats> {
        let mut frame = series_to_frame(series, &self.config)?;
        let series_written = series
            .iter()
            .filter(|s| s.first_year.is_some() && !s.is_empty())
            .count();

        let stats = ExportStats {
            series_written,
            ..self.write_frame(path, &mut frame)?
        };
        debug!("Export statistics: {:?}", stats);
        Ok(stats)
    }

    /// Write a prepared frame to `path`
    ///
    /// Without the source series, `series_written` counts runs of equal keys in
    /// the frame, so adjacent series sharing a key count once.
    pub fn write(&self, path: &Path, frame: &mut DataFrame) -> Result<ExportStats> {
        let stats = ExportStats {
            series_written: count_series_runs(frame)?,
            ..self.write_frame(path, frame)?
        };
        debug!("Export statistics: {:?}", stats);
        Ok(stats)
    }

    /// Write the frame and report rows and bytes; `series_written` is left at 0
    fn write_frame(&self, path: &Path, frame: &mut DataFrame) -> Result<ExportStats> {
        info!(
            "Writing {} rows to {} as {:?}",
            frame.height(),
            path.display(),
            self.config.format
        );

        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

        match self.config.format {
            ExportFormat::Parquet => {
                PolarsParquetWriter::new(file)
                    .with_compression(self.config.compression.to_polars_compression())
                    .finish(frame)
                    .map_err(|e| Error::export("Failed to write Parquet output", e))?;
            }
            ExportFormat::Csv => {
                CsvWriter::new(file)
                    .include_header(true)
                    .finish(frame)
                    .map_err(|e| Error::export("Failed to write CSV output", e))?;
            }
        }

        let bytes_written = std::fs::metadata(path)
            .map_err(|e| Error::io(format!("Failed to stat {}", path.display()), e))?
            .len();

        Ok(ExportStats {
            rows_written: frame.height(),
            bytes_written,
            ..ExportStats::default()
        })
    }
}

/// Number of runs of equal keys in the series column
fn count_series_runs(frame: &DataFrame) -> Result<usize> {
    let keys = frame
        .column(columns::SERIES)
        .and_then(|column| column.str())
        .map_err(|e| Error::export("Frame has no usable series column", e))?;

    let mut runs = 0;
    let mut previous: Option<&str> = None;
    for key in keys.into_iter() {
        if runs == 0 || key != previous {
            runs += 1;
            previous = key;
        }
    }
    Ok(runs)
}
