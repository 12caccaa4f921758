//! Configuration management and validation.
//!
//! Provides the configuration structures for the Tucson reader (dating
//! convention, optional keycode-width hint, diagnostic limits) and for series
//! export (output format and compression).

use crate::app::models::{DatingConvention, KeycodeWidth};
use crate::constants::DEFAULT_MAX_DIAGNOSTICS;
use crate::{Error, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration for a single parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Convention used to read year markers
    pub dating: DatingConvention,

    /// Caller-supplied keycode width, replacing the width tally when set
    pub keycode_width_hint: Option<KeycodeWidth>,

    /// Maximum number of diagnostics stored per file (0 = unlimited)
    pub max_diagnostics: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            dating: DatingConvention::Astronomical,
            keycode_width_hint: None,
            max_diagnostics: DEFAULT_MAX_DIAGNOSTICS,
        }
    }
}

impl ParserConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dating convention
    pub fn with_dating(mut self, dating: DatingConvention) -> Self {
        self.dating = dating;
        self
    }

    /// Fix the keycode width instead of inferring it
    pub fn with_keycode_width(mut self, width: KeycodeWidth) -> Self {
        self.keycode_width_hint = Some(width);
        self
    }

    /// Set the diagnostic storage limit
    pub fn with_max_diagnostics(mut self, limit: usize) -> Self {
        self.max_diagnostics = limit;
        self
    }
}

/// Output format for series export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    Parquet,
    Csv,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Parquet => "parquet",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "parquet" => Ok(ExportFormat::Parquet),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(Error::configuration(format!(
                "Unknown export format '{}': expected parquet or csv",
                other
            ))),
        }
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(Error::configuration(format!(
                "Unknown compression '{}': expected snappy, zstd, lz4 or none",
                other
            ))),
        }
    }
}

/// Configuration for writing parsed series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output file format
    pub format: ExportFormat,

    /// Parquet compression (ignored for CSV)
    pub compression: CompressionAlgorithm,

    /// Add site code, site name and species code columns from the header
    pub include_header_columns: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Parquet,
            compression: CompressionAlgorithm::Snappy,
            include_header_columns: false,
        }
    }
}

impl ExportConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the Parquet compression algorithm
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    /// Include header metadata columns
    pub fn with_header_columns(mut self) -> Self {
        self.include_header_columns = true;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.format == ExportFormat::Csv && self.compression != CompressionAlgorithm::Snappy
        {
            // Snappy is the default, so anything else was asked for explicitly
            return Err(Error::configuration(
                "Compression only applies to Parquet output".to_string(),
            ));
        }
        Ok(())
    }
}
