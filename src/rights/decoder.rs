use std::{collections::BTreeSet, fmt};

use strum::{EnumIter, IntoEnumIterator};

use crate::rights::{AccessMask, FileSystemRights, NamedRight};

/// Canonical permission-set label of an access mask.
///
/// This is always derived from a mask with [`PermissionSet::classify`], it is never stored
/// independently of the mask it describes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter)]
pub enum PermissionSet {
    /// Every right of FILE_ALL_ACCESS (`0x001F01FF`)
    FullControl,
    /// Read data, execute, read attributes, read EA and read permissions
    ReadAndExecute,
    /// Read and write data, execute, delete child and delete
    Modify,
    /// Read data, read EA, read attributes and read permissions
    Read,
    /// Write data
    Write,
    /// None of the above combinations
    Special,
}

impl PermissionSet {
    /// Classify a raw mask.
    ///
    /// Combinations are tested in fixed priority order (the declaration order of this enum) and
    /// the first one fully contained in the raw mask wins. Generic bits are deliberately not
    /// expanded here, so a mask holding only `GENERIC_READ` is [`PermissionSet::Special`] even
    /// though [`decode`] reports the read rights for it.
    #[must_use]
    pub fn classify(mask: AccessMask) -> Self {
        let rights = mask.rights();
        PermissionSet::iter()
            .find(|set| match set.combination() {
                Some(combination) => rights.contains(combination),
                None => true,
            })
            .unwrap_or(PermissionSet::Special)
    }

    /// The rights that must all be present for this label, `None` for [`PermissionSet::Special`].
    #[must_use]
    pub fn combination(&self) -> Option<FileSystemRights> {
        match self {
            PermissionSet::FullControl => Some(FileSystemRights::FULL_CONTROL),
            PermissionSet::ReadAndExecute => Some(FileSystemRights::READ_AND_EXECUTE),
            PermissionSet::Modify => Some(FileSystemRights::MODIFY),
            PermissionSet::Read => Some(FileSystemRights::READ),
            PermissionSet::Write => Some(FileSystemRights::WRITE),
            PermissionSet::Special => None,
        }
    }

    /// Human readable label, e.g. `Read & Execute`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PermissionSet::FullControl => "Full Control",
            PermissionSet::ReadAndExecute => "Read & Execute",
            PermissionSet::Modify => "Modify",
            PermissionSet::Read => "Read",
            PermissionSet::Write => "Write",
            PermissionSet::Special => "Special",
        }
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The interpretation of one access mask.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DecodedRights {
    mask: AccessMask,
    rights: BTreeSet<NamedRight>,
    permission_set: PermissionSet,
}

impl DecodedRights {
    /// The mask this interpretation was computed from
    #[must_use]
    pub fn mask(&self) -> AccessMask {
        self.mask
    }

    /// Named rights to display: the set bits plus the expansion of any generic bits
    #[must_use]
    pub fn rights(&self) -> &BTreeSet<NamedRight> {
        &self.rights
    }

    /// Named rights whose bit is literally set in the mask, without generic expansion
    #[must_use]
    pub fn explicit_rights(&self) -> BTreeSet<NamedRight> {
        named_rights(self.mask)
    }

    /// The permission-set label of the raw mask
    #[must_use]
    pub fn permission_set(&self) -> PermissionSet {
        self.permission_set
    }

    /// Whether every FILE_ALL_ACCESS bit is set
    #[must_use]
    pub fn full_control(&self) -> bool {
        self.mask.rights().contains(FileSystemRights::FULL_CONTROL)
    }

    /// Whether `right` is part of the displayed rights
    #[must_use]
    pub fn has(&self, right: NamedRight) -> bool {
        self.rights.contains(&right)
    }
}

/// Named rights whose bit is set in `mask`, in declaration order.
#[must_use]
pub fn named_rights(mask: AccessMask) -> BTreeSet<NamedRight> {
    let rights = mask.rights();
    NamedRight::iter()
        .filter(|right| rights.contains(right.bit()))
        .collect()
}

/// Decode a raw mask into its displayable rights and its permission-set label.
///
/// # Examples
///
/// ```rust
/// use aclscope::rights::{decode, NamedRight, PermissionSet};
///
/// let decoded = decode(0x8000_0000u32);
/// assert!(decoded.has(NamedRight::ReadData));
/// assert_eq!(decoded.permission_set(), PermissionSet::Special);
/// ```
#[must_use]
pub fn decode(mask: impl Into<AccessMask>) -> DecodedRights {
    let mask = mask.into();
    let rights = named_rights(AccessMask::from(mask.rights().expand_generic()));

    DecodedRights {
        mask,
        rights,
        permission_set: PermissionSet::classify(mask),
    }
}
