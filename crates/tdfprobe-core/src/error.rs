//! Error types for the tdfprobe-core library.
//!
//! Scanning itself never fails: every byte pattern is either accepted or
//! silently rejected. Errors only arise at the edges, when a file cannot be
//! loaded or when a caller hands a header constructor the wrong number of bytes.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tdfprobe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all tdfprobe operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A header window was built from something other than six bytes
    #[error("invalid header length: expected {expected} bytes, got {len}")]
    InvalidHeaderLength {
        /// Length of the slice that was supplied
        len: usize,
        /// Required window length
        expected: usize,
    },

    /// A tag string cannot be packed into three bytes
    #[error("cannot encode tag '{tag}': {reason}")]
    InvalidTag {
        /// The offending tag text
        tag: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Input path does not exist or is not a regular file
    #[error("file not found: '{path}'")]
    FileNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new header length error
    pub fn invalid_header_length(len: usize) -> Self {
        Self::InvalidHeaderLength {
            len,
            expected: crate::HEADER_LEN,
        }
    }

    /// Creates a new tag encoding error
    pub fn invalid_tag(tag: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            reason,
        }
    }

    /// Creates a new file-not-found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error can only come from a bug in the caller.
    ///
    /// Such errors are not meant to be caught and recovered from.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidHeaderLength { .. } | Self::InvalidTag { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_header_length(5);
        assert_eq!(
            err.to_string(),
            "invalid header length: expected 6 bytes, got 5"
        );

        let err = Error::file_not_found("/nope/EBOOT.elf");
        assert!(err.to_string().contains("/nope/EBOOT.elf"));
    }

    #[test]
    fn test_is_contract_violation() {
        assert!(Error::invalid_header_length(7).is_contract_violation());
        assert!(Error::invalid_tag("TOOLONG", "too long").is_contract_violation());
        assert!(!Error::file_not_found("/test").is_contract_violation());
    }
}
