//! Binary scanning module for finding TDF element headers.
//!
//! This module slides a six byte window over every offset of the input and
//! keeps the windows that look like element headers.
//!
//! ## Algorithm Overview
//!
//! 1. Read the [`HeaderCandidate`] at the current offset
//! 2. Discard it unless it passes [`HeaderCandidate::is_sane`]
//! 3. Accept it if its next distance is zero (it ends a run)
//! 4. Otherwise accept it only if the header it points at is sane too
//! 5. Advance by a single byte; real header alignment is unknown
//!
//! Hits may overlap and are never deduplicated.
//!
//! ## Extensibility
//!
//! The [`ScanStrategy`] trait allows custom scanning algorithms:
//!
//! ```no_run
//! use tdfprobe_core::scanner::{ScanResult, ScanStrategy};
//!
//! struct NothingScanner;
//!
//! impl ScanStrategy for NothingScanner {
//!     fn scan(&self, data: &[u8]) -> ScanResult {
//!         ScanResult::new(Vec::new(), data.len())
//!     }
//! }
//! ```

mod chain;

use crate::error::{Error, Result};
use crate::header::HeaderCandidate;
use crate::tag::{SixBitTagCodec, TagCodec};
use std::path::Path;
use tracing::{debug, trace};

/// A header accepted by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanHit {
    /// Byte offset of the header in the scanned buffer
    pub offset: usize,
    /// The header found there
    pub header: HeaderCandidate,
}

/// Accepted headers of one scan, in ascending offset order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    hits: Vec<ScanHit>,
    input_len: usize,
}

impl ScanResult {
    /// Creates a scan result from hits already in offset order
    pub fn new(hits: Vec<ScanHit>, input_len: usize) -> Self {
        Self { hits, input_len }
    }

    /// The accepted hits
    pub fn hits(&self) -> &[ScanHit] {
        &self.hits
    }

    /// Iterates over the accepted hits
    pub fn iter(&self) -> std::slice::Iter<'_, ScanHit> {
        self.hits.iter()
    }

    /// Number of accepted hits
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns true if nothing was accepted
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Length of the buffer that was scanned
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Offsets of the accepted hits
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.hits.iter().map(|hit| hit.offset)
    }

    /// Number of hits that end a run of siblings
    pub fn terminator_count(&self) -> usize {
        self.hits.iter().filter(|hit| hit.header.is_terminator()).count()
    }
}

impl IntoIterator for ScanResult {
    type Item = ScanHit;
    type IntoIter = std::vec::IntoIter<ScanHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a ScanHit;
    type IntoIter = std::slice::Iter<'a, ScanHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

/// Configuration for the scanner
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    /// Maximum number of headers to report (0 = unlimited)
    pub max_results: usize,
}

impl ScannerConfig {
    /// Creates a new scanner config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of results to return
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// Trait for implementing custom scanning strategies
///
/// Scanning never fails: every window is either accepted or rejected.
pub trait ScanStrategy: Send + Sync {
    /// Scan the provided data for element headers
    fn scan(&self, data: &[u8]) -> ScanResult;

    /// Scan the data and return an iterator over hits
    fn scan_iter<'a>(&'a self, data: &'a [u8]) -> Box<dyn Iterator<Item = ScanHit> + 'a> {
        Box::new(self.scan(data).into_iter())
    }
}

/// Primary scanner for finding element headers
#[derive(Debug, Clone, Default)]
pub struct Scanner<C = SixBitTagCodec> {
    config: ScannerConfig,
    codec: C,
}

impl Scanner {
    /// Creates a new scanner with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new scanner with custom configuration
    pub fn with_config(config: ScannerConfig) -> Self {
        Self::from_parts(config, SixBitTagCodec)
    }
}

impl<C: TagCodec> Scanner<C> {
    /// Creates a scanner that decodes tags with a custom codec
    pub fn with_codec(codec: C) -> Self {
        Self::from_parts(ScannerConfig::default(), codec)
    }

    /// Creates a scanner from a configuration and a codec
    pub fn from_parts(config: ScannerConfig, codec: C) -> Self {
        Self { config, codec }
    }

    /// Returns the scanner configuration
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Returns the header at `offset` if the scanner would accept it
    pub fn accepts(&self, data: &[u8], offset: usize) -> Option<HeaderCandidate> {
        let header = HeaderCandidate::at(data, offset, &self.codec)?;
        self.judge(data, offset, header).then_some(header)
    }

    /// Lazily yields accepted headers in offset order
    pub fn hits<'a>(&'a self, data: &'a [u8]) -> Hits<'a, C> {
        Hits {
            scanner: self,
            data,
            offset: 0,
            emitted: 0,
        }
    }

    fn judge(&self, data: &[u8], offset: usize, header: HeaderCandidate) -> bool {
        if !header.is_sane() {
            return false;
        }

        let link = chain::follow(data, offset, &header, &self.codec);
        if link.is_accepted() {
            trace!("Accepted {:?} at offset {}: {:?}", header.tag(), offset, link);
        } else {
            trace!("Rejected {:?} at offset {}: {:?}", header.tag(), offset, link);
        }
        link.is_accepted()
    }
}

impl<C: TagCodec> ScanStrategy for Scanner<C> {
    fn scan(&self, data: &[u8]) -> ScanResult {
        debug!("Starting scan of {} bytes", data.len());

        let hits: Vec<ScanHit> = self.hits(data).collect();

        debug!("Scan complete: found {} headers", hits.len());
        ScanResult::new(hits, data.len())
    }

    fn scan_iter<'a>(&'a self, data: &'a [u8]) -> Box<dyn Iterator<Item = ScanHit> + 'a> {
        Box::new(self.hits(data))
    }
}

/// Iterator over accepted headers, created by [`Scanner::hits`]
#[derive(Debug)]
pub struct Hits<'a, C> {
    scanner: &'a Scanner<C>,
    data: &'a [u8],
    offset: usize,
    emitted: usize,
}

impl<C: TagCodec> Iterator for Hits<'_, C> {
    type Item = ScanHit;

    fn next(&mut self) -> Option<ScanHit> {
        let limit = self.scanner.config.max_results;
        if limit > 0 && self.emitted >= limit {
            return None;
        }

        loop {
            let offset = self.offset;
            let header = HeaderCandidate::at(self.data, offset, &self.scanner.codec)?;
            self.offset += 1;

            if self.scanner.judge(self.data, offset, header) {
                self.emitted += 1;
                return Some(ScanHit { offset, header });
            }
        }
    }
}

/// Reads a whole input file into memory.
///
/// Paths that do not name an existing regular file yield
/// [`Error::FileNotFound`].
pub fn read_input(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::file_not_found(path));
    }
    std::fs::read(path).map_err(|e| Error::file_read(path, e))
}

/// Scan a file for element headers
///
/// This is a convenience function that reads the file and scans it.
pub fn scan_file(path: impl AsRef<Path>) -> Result<ScanResult> {
    scan_file_with_config(path, ScannerConfig::default())
}

/// Scan a file with custom configuration
pub fn scan_file_with_config(path: impl AsRef<Path>, config: ScannerConfig) -> Result<ScanResult> {
    let data = read_input(path)?;
    Ok(Scanner::with_config(config).scan(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::DataType;
    use crate::tag::Tag;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn raw(tag: &str, ty: DataType, next: u8) -> [u8; 6] {
        HeaderCandidate::encode(tag, 0x00, ty, next).unwrap()
    }

    #[test]
    fn test_scanner_config_builder() {
        let config = ScannerConfig::new().max_results(10);
        assert_eq!(config.max_results, 10);
        assert_eq!(ScannerConfig::default().max_results, 0);
    }

    #[test]
    fn test_empty_and_short_input() {
        let scanner = Scanner::new();
        assert!(scanner.scan(&[]).is_empty());
        for len in 1..6 {
            let data = &raw("TEST", DataType::STRING, 0)[..len];
            assert!(scanner.scan(data).is_empty());
        }
    }

    #[test]
    fn test_single_terminator() {
        let data = raw("TEST", DataType::STRING, 0);
        let result = Scanner::new().scan(&data);

        assert_eq!(result.len(), 1);
        assert_eq!(result.input_len(), 6);
        let hit = result.hits()[0];
        assert_eq!(hit.offset, 0);
        assert_eq!(hit.header.tag().as_str(), "TEST");
        assert_eq!(hit.header.next_distance(), 0);
        assert_eq!(result.terminator_count(), 1);
    }

    #[test]
    fn test_back_to_back_headers() {
        let mut data = raw("ABC", DataType::STRUCT, 6).to_vec();
        data.extend_from_slice(&raw("DEFG", DataType::STRING, 0));

        let result = Scanner::new().scan(&data);
        assert_eq!(result.offsets().collect::<Vec<_>>(), vec![0, 6]);
    }

    #[test]
    fn test_linked_header_not_added_by_lookahead() {
        // The second header points past the end, so only the first survives
        let mut data = raw("ABC", DataType::STRUCT, 6).to_vec();
        data.extend_from_slice(&raw("DEF", DataType::STRING, 40));

        let result = Scanner::new().scan(&data);
        assert_eq!(result.offsets().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_pointer_one_byte_past_end() {
        // Lookahead window at offset 7 needs 13 bytes; buffer has 12
        let mut data = raw("ONE", DataType::STRING, 7).to_vec();
        data.extend_from_slice(&[0x00; 6]);

        assert!(Scanner::new().scan(&data).is_empty());
        assert!(Scanner::new().accepts(&data, 0).is_none());
    }

    #[test]
    fn test_max_results() {
        let mut data = Vec::new();
        for tag in ["AAA", "BBB", "CCC"] {
            data.extend_from_slice(&raw(tag, DataType::LIST, 0));
        }

        let all = Scanner::new().scan(&data);
        assert_eq!(all.len(), 3);

        let limited = Scanner::with_config(ScannerConfig::new().max_results(2)).scan(&data);
        assert_eq!(limited.hits(), &all.hits()[..2]);
    }

    #[test]
    fn test_scan_iter_matches_scan() {
        let mut data = vec![0xAA; 3];
        data.extend_from_slice(&raw("NAME", DataType::STRING, 0));
        data.extend_from_slice(&[0xAA; 5]);

        let scanner = Scanner::new();
        let collected: Vec<ScanHit> = scanner.scan_iter(&data).collect();
        assert_eq!(collected, scanner.scan(&data).hits());
        assert_eq!(collected[0].offset, 3);
    }

    #[test]
    fn test_custom_codec() {
        struct Always;
        impl TagCodec for Always {
            fn decode(&self, _raw: [u8; 3]) -> Tag {
                Tag::new("ANY").unwrap_or_default()
            }
        }

        // Every window with separator 0 and next distance 0 is accepted
        let data = [0u8; 8];
        let result = Scanner::with_codec(Always).scan(&data);
        assert_eq!(result.offsets().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_scan_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x13, 0x37]).unwrap();
        file.write_all(&raw("TEST", DataType::STRING, 0)).unwrap();
        file.flush().unwrap();

        let result = scan_file(file.path()).unwrap();
        assert_eq!(result.offsets().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_scan_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_file(dir.path().join("missing.elf")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));

        // A directory is not a file either
        let err = scan_file(dir.path()).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
