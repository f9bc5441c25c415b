//! # tdfprobe-core
//!
//! A library for finding TDF element headers embedded in arbitrary binaries.
//!
//! TDF is a schema-less tagged binary format. Each element starts with a six
//! byte header: a packed three byte tag, a separator byte, a type byte and the
//! distance to the next sibling element. This crate locates such headers
//! without knowing where any TDF data begins, using cheap local checks plus a
//! one-hop lookahead along the sibling chain.
//!
//! ## Architecture
//!
//! - [`tag`]: tag codec boundary and the standard 6-bit packing
//! - [`data_type`]: catalogue of known type bytes
//! - [`header`]: the six byte header model and its sanity predicate
//! - [`scanner`]: exhaustive scanning with chain validation
//! - [`report`]: turning hits into addressed entries for display
//! - [`error`]: error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use tdfprobe_core::{report, ScanStrategy, Scanner, DEFAULT_BASE_ADDRESS};
//!
//! let data = std::fs::read("./EBOOT.elf")?;
//!
//! let result = Scanner::new().scan(&data);
//! for hit in &result {
//!     println!("{:#x} {}", hit.offset, hit.header.tag());
//! }
//!
//! print!("{}", report::render_text(&result, DEFAULT_BASE_ADDRESS));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`TagCodec`]: plug in a different tag decoding
//! - [`ScanStrategy`]: customize the scanning algorithm
//! - [`ReportSink`]: customize how results are presented

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod data_type;
pub mod error;
pub mod header;
pub mod report;
pub mod scanner;
pub mod tag;

// Re-export primary types for convenience
pub use data_type::DataType;
pub use error::{Error, Result};
pub use header::HeaderCandidate;
pub use report::{NullSink, ReportEntry, ReportSink, StatsSink, TextSink, DEFAULT_BASE_ADDRESS};
pub use scanner::{ScanHit, ScanResult, ScanStrategy, Scanner, ScannerConfig};
pub use tag::{SixBitTagCodec, Tag, TagCodec};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Size of an element header in bytes
pub const HEADER_LEN: usize = 6;
