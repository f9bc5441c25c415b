//! Tag decoding.
//!
//! Every TDF element header starts with a three byte tag identifier. The
//! bytes only become a readable name after they pass through a [`TagCodec`].
//! The scanner treats the codec as a black box: it must be deterministic and
//! total, and a tag that makes no sense simply fails the sanity predicate.
//!
//! [`SixBitTagCodec`] implements the packing used on the wire: the three bytes
//! are read as a 24-bit big-endian integer holding four 6-bit groups, most
//! significant first. A non-zero group `v` stands for the ASCII character
//! `v + 0x20`, and the first zero group ends the tag.

use crate::error::{Error, Result};
use std::fmt;

/// Maximum number of characters a decoded tag can hold
pub const MAX_TAG_LEN: usize = 4;

/// Offset added to each 6-bit group to obtain its ASCII character
const CHAR_BASE: u8 = 0x20;

/// Mask selecting a single 6-bit group
const SEXTET_MASK: u32 = 0x3F;

/// A decoded tag name, stored inline.
///
/// Tags never exceed [`MAX_TAG_LEN`] bytes, so decoding one never allocates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tag {
    bytes: [u8; MAX_TAG_LEN],
    len: u8,
}

impl Tag {
    /// Creates a tag from text, or `None` if it does not fit inline.
    pub fn new(text: &str) -> Option<Self> {
        let raw = text.as_bytes();
        if raw.len() > MAX_TAG_LEN {
            return None;
        }

        let mut bytes = [0u8; MAX_TAG_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Some(Self {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Returns the tag as a string slice
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    /// Number of bytes in the tag
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true for a tag with no characters
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if every character is an uppercase ASCII letter
    pub fn is_uppercase_alpha(&self) -> bool {
        self.as_str().bytes().all(|c| c.is_ascii_uppercase())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width specifiers like {:<4} work in reports
        f.pad(self.as_str())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", self.as_str())
    }
}

/// Turns the three raw tag bytes of a header into a tag name.
///
/// Implementations must be pure: the same input always yields the same
/// [`Tag`], and no input is an error. A codec that cannot make sense of its
/// input should return an empty tag, which never passes the sanity predicate.
pub trait TagCodec: Send + Sync {
    /// Decode three raw bytes into a tag
    fn decode(&self, raw: [u8; 3]) -> Tag;
}

/// The standard 6-bit-per-character tag packing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SixBitTagCodec;

impl SixBitTagCodec {
    /// Packs a tag name into its three byte wire form.
    ///
    /// Lowercase letters are folded to uppercase. Characters must lie in
    /// `'!'..='_'` because a space would encode as the terminating zero group.
    pub fn encode(tag: &str) -> Result<[u8; 3]> {
        if tag.is_empty() {
            return Err(Error::invalid_tag(tag, "tag is empty"));
        }
        if tag.len() > MAX_TAG_LEN {
            return Err(Error::invalid_tag(tag, "tag is longer than 4 characters"));
        }

        let mut packed: u32 = 0;
        for (i, c) in tag.bytes().enumerate() {
            let c = c.to_ascii_uppercase();
            if !(0x21..=0x5F).contains(&c) {
                return Err(Error::invalid_tag(tag, "character has no 6-bit encoding"));
            }
            packed |= u32::from(c - CHAR_BASE) << (18 - 6 * i);
        }

        let [_, b0, b1, b2] = packed.to_be_bytes();
        Ok([b0, b1, b2])
    }
}

impl TagCodec for SixBitTagCodec {
    fn decode(&self, raw: [u8; 3]) -> Tag {
        let packed = u32::from_be_bytes([0, raw[0], raw[1], raw[2]]);

        let mut tag = Tag::default();
        for i in 0..MAX_TAG_LEN {
            let sextet = (packed >> (18 - 6 * i)) & SEXTET_MASK;
            if sextet == 0 {
                break;
            }
            tag.bytes[i] = sextet as u8 + CHAR_BASE;
            tag.len += 1;
        }
        tag
    }
}
