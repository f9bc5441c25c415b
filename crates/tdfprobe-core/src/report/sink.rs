//! Extensible report sinks.
//!
//! This module provides the [`ReportSink`] trait for customizing
//! how scan results are presented.

use super::ReportEntry;
use std::fmt::Result;

/// Trait for consuming the entries of a scan report.
///
/// Every method has a no-op default, so a sink only implements what it needs.
///
/// # Example
///
/// ```
/// use tdfprobe_core::report::{ReportEntry, ReportSink};
///
/// struct TagCollector(Vec<String>);
///
/// impl ReportSink for TagCollector {
///     fn entry(&mut self, entry: &ReportEntry) -> std::fmt::Result {
///         self.0.push(entry.tag.to_string());
///         Ok(())
///     }
/// }
/// ```
pub trait ReportSink {
    /// Called once before any entry, with the size of the scanned input
    fn begin(&mut self, input_len: usize) -> Result {
        let _ = input_len;
        Ok(())
    }

    /// Called for each accepted header, in address order
    fn entry(&mut self, entry: &ReportEntry) -> Result {
        let _ = entry;
        Ok(())
    }

    /// Called right after an entry whose next distance is zero
    fn group_end(&mut self) -> Result {
        Ok(())
    }

    /// Called once after the last entry
    fn finish(&mut self, total: usize) -> Result {
        let _ = total;
        Ok(())
    }
}

/// A no-op sink that discards all output
pub struct NullSink;

impl ReportSink for NullSink {}

/// A sink that collects statistics about a report
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatsSink {
    /// Number of entries
    pub entries: usize,
    /// Number of runs closed by a terminator
    pub groups: usize,
    /// Entries whose type byte is catalogued
    pub known_types: usize,
    /// Entries whose type byte is not catalogued
    pub unknown_types: usize,
}

impl ReportSink for StatsSink {
    fn entry(&mut self, entry: &ReportEntry) -> Result {
        self.entries += 1;
        if entry.data_type.is_known() {
            self.known_types += 1;
        } else {
            self.unknown_types += 1;
        }
        Ok(())
    }

    fn group_end(&mut self) -> Result {
        self.groups += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataType;
    use crate::tag::Tag;

    fn entry(ty: u8, next: u8) -> ReportEntry {
        ReportEntry {
            address: 0x1000,
            offset: 0,
            tag: Tag::new("NAME").unwrap(),
            data_type: DataType(ty),
            next_distance: next,
        }
    }

    #[test]
    fn test_null_sink() {
        let mut sink = NullSink;
        assert!(sink.begin(10).is_ok());
        assert!(sink.entry(&entry(0x04, 0)).is_ok());
        assert!(sink.finish(1).is_ok());
    }

    #[test]
    fn test_stats_sink() {
        let mut sink = StatsSink::default();
        sink.entry(&entry(0x04, 6)).unwrap();
        sink.entry(&entry(0x1B, 0)).unwrap();
        sink.group_end().unwrap();

        assert_eq!(sink.entries, 2);
        assert_eq!(sink.known_types, 1);
        assert_eq!(sink.unknown_types, 1);
        assert_eq!(sink.groups, 1);
    }
}
