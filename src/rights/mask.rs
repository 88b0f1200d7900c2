use std::{fmt, str::FromStr};

use crate::{rights::FileSystemRights, Error, Result};

/// A raw 32-bit access mask as stored in an access control entry.
///
/// The interchange format with display layers is exactly eight upper-case hex digits,
/// e.g. `001F01FF`, which is what [`fmt::Display`] produces and [`AccessMask::parse`] accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct AccessMask(u32);

impl AccessMask {
    /// Wrap a raw mask value
    #[must_use]
    pub const fn new(value: u32) -> Self {
        AccessMask(value)
    }

    /// The raw value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The mask as typed rights; all bits are retained
    #[must_use]
    pub fn rights(&self) -> FileSystemRights {
        FileSystemRights::from_mask(self.0)
    }

    /// Parse a mask from its hex wire format.
    ///
    /// Accepts one to eight hex digits in either case, optionally prefixed by `0x`. Leading and
    /// trailing whitespace is ignored.
    ///
    /// # Errors
    /// Returns [`Error::InvalidMask`] for empty input, non-hex characters or more than
    /// eight digits.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 8 {
            return Err(Error::InvalidMask(format!(
                "expected 1 to 8 hex digits, got '{}'",
                trimmed
            )));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidMask(format!(
                "non-hex character in '{}'",
                trimmed
            )));
        }

        u32::from_str_radix(digits, 16)
            .map(AccessMask)
            .map_err(|e| Error::InvalidMask(format!("'{}': {}", trimmed, e)))
    }
}

impl From<u32> for AccessMask {
    fn from(value: u32) -> Self {
        AccessMask(value)
    }
}

impl From<FileSystemRights> for AccessMask {
    fn from(rights: FileSystemRights) -> Self {
        AccessMask(rights.bits())
    }
}

impl From<AccessMask> for u32 {
    fn from(mask: AccessMask) -> Self {
        mask.0
    }
}

impl fmt::Display for AccessMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl FromStr for AccessMask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
