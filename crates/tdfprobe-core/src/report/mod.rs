//! Scan report module.
//!
//! Turns a [`ScanResult`] into a stream of [`ReportEntry`] values with
//! absolute addresses and hands them to a [`ReportSink`].
//!
//! Runs of siblings end at a header whose next distance is zero. Sinks get a
//! [`ReportSink::group_end`] call after such an entry; [`TextSink`] uses it to
//! draw a separator line.

mod sink;

use crate::data_type::DataType;
use crate::scanner::{ScanHit, ScanResult};
use crate::tag::Tag;
use std::fmt::{self, Write as FmtWrite};

pub use sink::{NullSink, ReportSink, StatsSink};

/// Load address added to buffer offsets when none is supplied
pub const DEFAULT_BASE_ADDRESS: u64 = 0x0001_0000;

/// Width of the separator lines in text reports
const RULE_WIDTH: usize = 80;

/// One accepted header, ready for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportEntry {
    /// Base address plus buffer offset
    pub address: u64,
    /// Offset in the scanned buffer
    pub offset: usize,
    /// Decoded tag name
    pub tag: Tag,
    /// Declared data type
    pub data_type: DataType,
    /// Distance to the next sibling header, zero for the last one
    pub next_distance: u8,
}

impl ReportEntry {
    /// Creates an entry for a hit loaded at `base_address`
    pub fn from_hit(hit: &ScanHit, base_address: u64) -> Self {
        Self {
            address: base_address.wrapping_add(hit.offset as u64),
            offset: hit.offset,
            tag: hit.header.tag(),
            data_type: hit.header.data_type(),
            next_distance: hit.header.next_distance(),
        }
    }

    /// Returns true if this entry ends a run of siblings
    pub fn is_group_end(&self) -> bool {
        self.next_distance == 0
    }
}

/// Feeds every hit of `result` to `sink`
pub fn report<S: ReportSink + ?Sized>(
    result: &ScanResult,
    base_address: u64,
    sink: &mut S,
) -> fmt::Result {
    sink.begin(result.input_len())?;

    for hit in result {
        let entry = ReportEntry::from_hit(hit, base_address);
        sink.entry(&entry)?;
        if entry.is_group_end() {
            sink.group_end()?;
        }
    }

    sink.finish(result.len())
}

/// A sink that renders a plain text listing
///
/// ```text
/// [0x00010000] Tag: TEST | Type: STRING (0x04)             | Next: 0
/// ```
#[derive(Debug, Default)]
pub struct TextSink<W> {
    out: W,
}

impl<W: FmtWrite> TextSink<W> {
    /// Creates a sink writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self) -> fmt::Result {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }
}

impl<W: FmtWrite> ReportSink for TextSink<W> {
    fn begin(&mut self, input_len: usize) -> fmt::Result {
        writeln!(self.out, "Loaded {} bytes.", input_len)?;
        self.rule()?;
        writeln!(self.out)
    }

    fn entry(&mut self, entry: &ReportEntry) -> fmt::Result {
        writeln!(
            self.out,
            "[0x{:08X}] Tag: {:<4} | Type: {:<25} | Next: {}",
            entry.address,
            entry.tag,
            entry.data_type.label(),
            entry.next_distance
        )
    }

    fn group_end(&mut self) -> fmt::Result {
        self.rule()?;
        writeln!(self.out)
    }

    fn finish(&mut self, total: usize) -> fmt::Result {
        self.rule()?;
        writeln!(self.out, "Found {} valid elements.", total)
    }
}

/// Renders a complete text report into a string
pub fn render_text(result: &ScanResult, base_address: u64) -> String {
    let mut sink = TextSink::new(String::new());
    // Writing to a String cannot fail
    let _ = report(result, base_address, &mut sink);
    sink.into_inner()
}
