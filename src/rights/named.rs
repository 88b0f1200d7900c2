use std::{fmt, str::FromStr};

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{rights::FileSystemRights, Error, Result};

/// One of the thirteen individually displayable access rights.
///
/// The declaration order is the order rights are listed in decoded output.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, EnumIter, EnumCount,
)]
pub enum NamedRight {
    /// FILE_READ_DATA (0x1)
    ReadData,
    /// FILE_WRITE_DATA (0x2)
    WriteData,
    /// FILE_APPEND_DATA (0x4)
    AppendData,
    /// FILE_READ_EA (0x8)
    ReadExtendedAttributes,
    /// FILE_WRITE_EA (0x10)
    WriteExtendedAttributes,
    /// FILE_EXECUTE (0x20)
    Execute,
    /// FILE_DELETE_CHILD (0x40)
    DeleteChild,
    /// FILE_READ_ATTRIBUTES (0x80)
    ReadAttributes,
    /// FILE_WRITE_ATTRIBUTES (0x100)
    WriteAttributes,
    /// DELETE (0x10000)
    Delete,
    /// READ_CONTROL (0x20000)
    ReadPermissions,
    /// WRITE_DAC (0x40000)
    ChangePermissions,
    /// WRITE_OWNER (0x80000)
    TakeOwnership,
}

impl NamedRight {
    /// The bit this right occupies in an access mask.
    #[must_use]
    pub fn bit(&self) -> FileSystemRights {
        match self {
            NamedRight::ReadData => FileSystemRights::READ_DATA,
            NamedRight::WriteData => FileSystemRights::WRITE_DATA,
            NamedRight::AppendData => FileSystemRights::APPEND_DATA,
            NamedRight::ReadExtendedAttributes => FileSystemRights::READ_EXTENDED_ATTRIBUTES,
            NamedRight::WriteExtendedAttributes => FileSystemRights::WRITE_EXTENDED_ATTRIBUTES,
            NamedRight::Execute => FileSystemRights::EXECUTE,
            NamedRight::DeleteChild => FileSystemRights::DELETE_CHILD,
            NamedRight::ReadAttributes => FileSystemRights::READ_ATTRIBUTES,
            NamedRight::WriteAttributes => FileSystemRights::WRITE_ATTRIBUTES,
            NamedRight::Delete => FileSystemRights::DELETE,
            NamedRight::ReadPermissions => FileSystemRights::READ_PERMISSIONS,
            NamedRight::ChangePermissions => FileSystemRights::CHANGE_PERMISSIONS,
            NamedRight::TakeOwnership => FileSystemRights::TAKE_OWNERSHIP,
        }
    }

    /// Stable identifier, e.g. `ReadExtendedAttributes`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NamedRight::ReadData => "ReadData",
            NamedRight::WriteData => "WriteData",
            NamedRight::AppendData => "AppendData",
            NamedRight::ReadExtendedAttributes => "ReadExtendedAttributes",
            NamedRight::WriteExtendedAttributes => "WriteExtendedAttributes",
            NamedRight::Execute => "Execute",
            NamedRight::DeleteChild => "DeleteChild",
            NamedRight::ReadAttributes => "ReadAttributes",
            NamedRight::WriteAttributes => "WriteAttributes",
            NamedRight::Delete => "Delete",
            NamedRight::ReadPermissions => "ReadPermissions",
            NamedRight::ChangePermissions => "ChangePermissions",
            NamedRight::TakeOwnership => "TakeOwnership",
        }
    }

    /// Mask of all thirteen named bits.
    #[must_use]
    pub fn all_bits() -> FileSystemRights {
        NamedRight::iter().fold(FileSystemRights::empty(), |acc, right| acc | right.bit())
    }

    /// Parse a right from its name.
    ///
    /// Matching ignores ASCII case and `_`, `-` or space separators, so `ReadData`,
    /// `read_data` and `READ-DATA` are all accepted.
    ///
    /// # Errors
    /// Returns [`Error::InvalidMask`] if the name does not denote a named right.
    pub fn parse(name: &str) -> Result<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();

        NamedRight::iter()
            .find(|right| right.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| Error::InvalidMask(format!("unknown access right '{}'", name.trim())))
    }
}

impl fmt::Display for NamedRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NamedRight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
