//! The six byte element header model.
//!
//! ```text
//!  0      1      2      3           4      5
//! +------+------+------+-----------+------+---------------+
//! |      tag (3 bytes) | separator | type | next distance |
//! +------+------+------+-----------+------+---------------+
//! ```
//!
//! The next distance counts bytes from the start of this header to the start
//! of the next sibling header; zero marks the last element of a run.

use crate::data_type::DataType;
use crate::error::{Error, Result};
use crate::tag::{SixBitTagCodec, Tag, TagCodec};
use crate::HEADER_LEN;
use std::fmt;

/// Shortest tag accepted by the sanity predicate.
///
/// Single letter tags exist but match far too much arbitrary data.
pub const MIN_SANE_TAG_LEN: usize = 3;

/// Longest tag accepted by the sanity predicate
pub const MAX_SANE_TAG_LEN: usize = 4;

/// Separator values seen in real headers; 0x00 is the common one
pub const SEPARATORS: [u8; 2] = [0x00, 0x01];

/// One six byte window interpreted as an element header
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderCandidate {
    bytes: [u8; HEADER_LEN],
    tag: Tag,
}

impl HeaderCandidate {
    /// Interprets a window, decoding the tag with the given codec
    pub fn new<C: TagCodec + ?Sized>(bytes: [u8; HEADER_LEN], codec: &C) -> Self {
        let tag = codec.decode([bytes[0], bytes[1], bytes[2]]);
        Self { bytes, tag }
    }

    /// Interprets a window using the standard tag codec
    pub fn from_bytes(bytes: [u8; HEADER_LEN]) -> Self {
        Self::new(bytes, &SixBitTagCodec)
    }

    /// Interprets a slice that must be exactly [`HEADER_LEN`] bytes long.
    ///
    /// Any other length is a bug in the caller and yields
    /// [`Error::InvalidHeaderLength`].
    pub fn from_slice<C: TagCodec + ?Sized>(bytes: &[u8], codec: &C) -> Result<Self> {
        let window: [u8; HEADER_LEN] = bytes
            .try_into()
            .map_err(|_| Error::invalid_header_length(bytes.len()))?;
        Ok(Self::new(window, codec))
    }

    /// Reads the window starting at `offset`, or `None` if it runs past the end
    pub fn at<C: TagCodec + ?Sized>(data: &[u8], offset: usize, codec: &C) -> Option<Self> {
        let end = offset.checked_add(HEADER_LEN)?;
        let window: [u8; HEADER_LEN] = data.get(offset..end)?.try_into().ok()?;
        Some(Self::new(window, codec))
    }

    /// Builds the raw bytes of a header, mostly useful for planting test data
    pub fn encode(
        tag: &str,
        separator: u8,
        data_type: DataType,
        next_distance: u8,
    ) -> Result<[u8; HEADER_LEN]> {
        let [t0, t1, t2] = SixBitTagCodec::encode(tag)?;
        Ok([t0, t1, t2, separator, data_type.raw(), next_distance])
    }

    /// The raw window
    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.bytes
    }

    /// The three undecoded tag bytes
    pub fn tag_bytes(&self) -> [u8; 3] {
        [self.bytes[0], self.bytes[1], self.bytes[2]]
    }

    /// The decoded tag name
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The separator byte
    pub fn separator(&self) -> u8 {
        self.bytes[3]
    }

    /// The raw type byte
    pub fn type_byte(&self) -> u8 {
        self.bytes[4]
    }

    /// The declared data type
    pub fn data_type(&self) -> DataType {
        DataType(self.bytes[4])
    }

    /// Bytes from the start of this header to the start of the next one
    pub fn next_distance(&self) -> u8 {
        self.bytes[5]
    }

    /// Returns true if this header ends a run of siblings
    pub fn is_terminator(&self) -> bool {
        self.next_distance() == 0
    }

    /// Context-free plausibility check.
    ///
    /// The type byte is deliberately ignored: the catalogue of type codes is
    /// incomplete and filtering on it would drop real headers.
    pub fn is_sane(&self) -> bool {
        let tag_len = self.tag.len();
        if !(MIN_SANE_TAG_LEN..=MAX_SANE_TAG_LEN).contains(&tag_len) {
            return false;
        }

        if !self.tag.is_uppercase_alpha() {
            return false;
        }

        SEPARATORS.contains(&self.separator())
    }
}

impl fmt::Debug for HeaderCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderCandidate")
            .field("tag", &self.tag.as_str())
            .field("separator", &self.separator())
            .field("data_type", &self.data_type())
            .field("next_distance", &self.next_distance())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header(tag: &str, separator: u8, next: u8) -> HeaderCandidate {
        HeaderCandidate::from_bytes(
            HeaderCandidate::encode(tag, separator, DataType::STRING, next).unwrap(),
        )
    }

    #[test]
    fn test_field_layout() {
        let h = HeaderCandidate::from_bytes([0xD2, 0x5C, 0xF4, 0x00, 0x04, 0x0C]);
        assert_eq!(h.tag_bytes(), [0xD2, 0x5C, 0xF4]);
        assert_eq!(h.tag().as_str(), "TEST");
        assert_eq!(h.separator(), 0x00);
        assert_eq!(h.type_byte(), 0x04);
        assert_eq!(h.data_type(), DataType::STRING);
        assert_eq!(h.next_distance(), 12);
        assert!(!h.is_terminator());
    }

    #[test]
    fn test_from_slice_length_contract() {
        let codec = SixBitTagCodec;
        assert!(HeaderCandidate::from_slice(&[0u8; 6], &codec).is_ok());

        for len in [0, 1, 5, 7, 12] {
            let err = HeaderCandidate::from_slice(&vec![0u8; len], &codec).unwrap_err();
            assert!(matches!(err, Error::InvalidHeaderLength { len: l, .. } if l == len));
            assert!(err.is_contract_violation());
        }
    }

    #[test]
    fn test_at_bounds() {
        let data = [0u8; 10];
        assert!(HeaderCandidate::at(&data, 4, &SixBitTagCodec).is_some());
        assert!(HeaderCandidate::at(&data, 5, &SixBitTagCodec).is_none());
        assert!(HeaderCandidate::at(&data, usize::MAX, &SixBitTagCodec).is_none());
    }

    #[test]
    fn test_sane_headers() {
        assert!(header("TEST", 0x00, 0).is_sane());
        assert!(header("UID", 0x00, 6).is_sane());
        assert!(header("ABCD", 0x01, 6).is_sane());
    }

    #[test]
    fn test_tag_length_filter() {
        assert!(!header("A", 0x00, 0).is_sane());
        assert!(!header("AB", 0x00, 0).is_sane());
        // Empty tag: all zero tag bytes
        assert!(!HeaderCandidate::from_bytes([0, 0, 0, 0, 0, 0]).is_sane());
    }

    #[test]
    fn test_alphabet_filter() {
        assert!(!header("AB1", 0x00, 0).is_sane());
        assert!(!header("A_CD", 0x00, 0).is_sane());
        assert!(!header("[ABC", 0x00, 0).is_sane());
        assert!(!header("AB@", 0x00, 0).is_sane());
    }

    #[test]
    fn test_separator_filter() {
        for sep in [0x02u8, 0x10, 0x7F, 0xFF] {
            assert!(!header("TEST", sep, 0).is_sane());
        }
    }

    #[test]
    fn test_type_byte_ignored() {
        let mut raw = HeaderCandidate::encode("NAME", 0x00, DataType::STRING, 0).unwrap();
        for ty in [0x05u8, 0x1B, 0xFF] {
            raw[4] = ty;
            let h = HeaderCandidate::from_bytes(raw);
            assert!(!h.data_type().is_known());
            assert!(h.is_sane());
        }
    }

    #[test]
    fn test_custom_codec() {
        struct Fixed;
        impl TagCodec for Fixed {
            fn decode(&self, _raw: [u8; 3]) -> Tag {
                Tag::new("ZZZ").unwrap_or_default()
            }
        }

        let h = HeaderCandidate::new([0xFF; 6], &Fixed);
        assert_eq!(h.tag().as_str(), "ZZZ");
        // Separator 0xFF still fails
        assert!(!h.is_sane());
    }
}
