//! Declared data types of TDF elements.
//!
//! The type byte of a header is kept as a raw value. Only part of the type
//! space has been catalogued, so unknown codes are ordinary values rather
//! than errors, and they never influence whether a header is accepted.

use std::fmt;

/// The declared type byte of an element header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataType(pub u8);

/// Catalogued type codes and their symbolic names, sorted by code
const KNOWN_TYPES: [(u8, &str); 21] = [
    (0x00, "SORTED_DICTIONARY"),
    (0x01, "LIST"),
    (0x02, "MAYBE_NUMBER_UINT"),
    (0x03, "STRUCT"),
    (0x04, "STRING"),
    (0x06, "MAYBE_BLAZE_OBJECT"),
    (0x07, "ENUM"),
    (0x08, "BYTEARRAY"),
    (0x09, "UNION"),
    (0x0A, "STRUCT2"),
    (0x0C, "BLAZE_OBJECT_ID"),
    (0x0E, "ENUM2"),
    (0x0F, "BOOLEAN"),
    (0x10, "BYTE2"),
    (0x11, "BYTE"),
    (0x13, "USHORT_SHORT"),
    (0x14, "INT_UINT"),
    (0x15, "UINT_INT"),
    (0x16, "MAYBE_LONG"),
    (0x17, "ULONG"),
    (0x18, "LONG"),
];

#[allow(missing_docs)]
impl DataType {
    pub const SORTED_DICTIONARY: Self = Self(0x00);
    pub const LIST: Self = Self(0x01);
    pub const MAYBE_NUMBER_UINT: Self = Self(0x02);
    pub const STRUCT: Self = Self(0x03);
    pub const STRING: Self = Self(0x04);
    pub const MAYBE_BLAZE_OBJECT: Self = Self(0x06);
    pub const ENUM: Self = Self(0x07);
    pub const BYTEARRAY: Self = Self(0x08);
    pub const UNION: Self = Self(0x09);
    pub const STRUCT2: Self = Self(0x0A);
    pub const BLAZE_OBJECT_ID: Self = Self(0x0C);
    pub const ENUM2: Self = Self(0x0E);
    pub const BOOLEAN: Self = Self(0x0F);
    pub const BYTE2: Self = Self(0x10);
    pub const BYTE: Self = Self(0x11);
    pub const USHORT_SHORT: Self = Self(0x13);
    pub const INT_UINT: Self = Self(0x14);
    pub const UINT_INT: Self = Self(0x15);
    pub const MAYBE_LONG: Self = Self(0x16);
    pub const ULONG: Self = Self(0x17);
    pub const LONG: Self = Self(0x18);
}

impl DataType {
    /// Returns the raw type byte
    pub fn raw(self) -> u8 {
        self.0
    }

    /// Returns the symbolic name, if this code has been catalogued
    pub fn name(self) -> Option<&'static str> {
        KNOWN_TYPES
            .binary_search_by_key(&self.0, |&(code, _)| code)
            .ok()
            .map(|idx| KNOWN_TYPES[idx].1)
    }

    /// Returns true if this code has been catalogued
    pub fn is_known(self) -> bool {
        self.name().is_some()
    }

    /// Label used in reports: the display form followed by the hex byte
    pub fn label(self) -> String {
        format!("{} (0x{:02X})", self, self.0)
    }

    /// Iterates over every catalogued type
    pub fn known() -> impl Iterator<Item = DataType> {
        KNOWN_TYPES.iter().map(|&(code, _)| DataType(code))
    }
}

impl From<u8> for DataType {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.pad(name),
            None => f.pad(&format!("unknown({})", self.0)),
        }
    }
}
