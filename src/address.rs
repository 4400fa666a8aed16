//! 160-bit library addresses and the mixed-case checksum scheme.
//!
//! An address is rendered as 40 hex digits where the letter casing encodes a
//! checksum: each hex letter is upper-cased iff the corresponding nibble of
//! the Keccak-256 digest of the all-lowercase rendering is `>= 8`.

use std::fmt;

use sha3::{Digest, Keccak256};

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    #[must_use]
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address from a slice; `None` unless it is exactly 20 bytes.
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 20] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Checksummed rendering, with the `0x` prefix.
    #[must_use]
    pub fn to_checksummed_string(&self) -> String {
        let lower = hex::encode(self.0);
        // Encoding our own bytes always yields 40 valid hex digits.
        let digits = checksummed_address(&lower).unwrap_or(lower);
        format!("0x{digits}")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksummed_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// Apply the checksum casing to 40 hex digits (any input casing).
///
/// Returns `None` when the input is not exactly 40 hex digits.
#[must_use]
pub fn checksummed_address(hex_digits: &str) -> Option<String> {
    if hex_digits.len() != 40 || !hex_digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let lower = hex_digits.to_ascii_lowercase();
    let digest = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(40);
    for (index, ch) in lower.chars().enumerate() {
        let byte = digest[index / 2];
        let nibble = if index % 2 == 0 { byte >> 4 } else { byte & 0xf };
        if ch.is_ascii_alphabetic() && nibble >= 8 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    Some(out)
}

/// Check the mixed-case checksum of 40 hex digits (no `0x` prefix).
///
/// The non-strict variant also accepts addresses without mixed case: when
/// the digits contain no lowercase hex letter or no uppercase hex letter,
/// the casing carries no checksum and plain hex validity is enough.
#[must_use]
pub fn passes_address_checksum(hex_digits: &str, strict: bool) -> bool {
    if hex_digits.len() != 40 || !hex_digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }
    if !strict {
        let has_lower = hex_digits.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = hex_digits.bytes().any(|b| b.is_ascii_uppercase());
        if !has_lower || !has_upper {
            return true;
        }
    }
    checksummed_address(hex_digits).is_some_and(|expected| expected == hex_digits)
}
