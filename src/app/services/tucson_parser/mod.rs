//! Tucson RWL/CRN parser for dendrochronology ring-width files
//!
//! Tucson files carry no format identifier. The parser infers whether a file
//! holds raw ring widths (RWL) or a chronology (CRN) and how wide its keycodes
//! are, then rebuilds discrete series from the flat stream of decade blocks.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`line_classifier`] - Pure fixed-column classification of single lines
//! - [`format_sniffer`] - Whole-file evidence counting and dialect inference
//! - [`header`] - Standard three-line header extraction
//! - [`decade_block`] - Decoding of one data line, including sentinels
//! - [`assembler`] - The stateful second pass that builds series
//! - [`diagnostics`] - Warning collection with line numbers
//! - [`parser`] - File handling and orchestration of the two passes
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use tucson_processor::{ParserConfig, TucsonParser};
//!
//! # fn example() -> tucson_processor::Result<()> {
//! let parser = TucsonParser::new(ParserConfig::default());
//! let result = parser.parse_file(std::path::Path::new("site.rwl"))?;
//!
//! for series in &result.series {
//!     println!("{}: {} rings", series.key, series.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod decade_block;
pub mod diagnostics;
pub mod format_sniffer;
pub mod header;
pub mod line_classifier;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use assembler::SeriesAssembler;
pub use decade_block::{BlockEnd, DecadeBlockDecoder, DecodedBlock};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use format_sniffer::{Evidence, sniff};
pub use header::{CachedLine, try_extract_header};
pub use line_classifier::{Classification, HeaderLayout, LineKind, classify};
pub use parser::TucsonParser;
pub use stats::{ParseResult, ParseStats};
