use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Access rights of a filesystem object or registry key.
    ///
    /// The low 16 bits are object-specific, bits 16-20 are standard rights and the top nibble
    /// holds the generic rights. Unknown bits are retained, masks read from a backend are never
    /// truncated.
    ///
    /// ## Reference
    /// * <https://learn.microsoft.com/en-us/windows/win32/secauthz/access-mask-format>
    /// * <https://learn.microsoft.com/en-us/windows/win32/fileio/file-access-rights-constants>
    pub struct FileSystemRights: u32 {
        /// Read file data, or list a directory
        const READ_DATA = 0x0000_0001;
        /// Write file data, or add a file to a directory
        const WRITE_DATA = 0x0000_0002;
        /// Append file data, or add a subdirectory
        const APPEND_DATA = 0x0000_0004;
        /// Read extended attributes
        const READ_EXTENDED_ATTRIBUTES = 0x0000_0008;
        /// Write extended attributes
        const WRITE_EXTENDED_ATTRIBUTES = 0x0000_0010;
        /// Execute a file, or traverse a directory
        const EXECUTE = 0x0000_0020;
        /// Delete a directory and the files it contains
        const DELETE_CHILD = 0x0000_0040;
        /// Read basic attributes
        const READ_ATTRIBUTES = 0x0000_0080;
        /// Write basic attributes
        const WRITE_ATTRIBUTES = 0x0000_0100;
        /// Delete the object
        const DELETE = 0x0001_0000;
        /// Read the security descriptor, excluding the SACL (READ_CONTROL)
        const READ_PERMISSIONS = 0x0002_0000;
        /// Modify the DACL (WRITE_DAC)
        const CHANGE_PERMISSIONS = 0x0004_0000;
        /// Change the owner (WRITE_OWNER)
        const TAKE_OWNERSHIP = 0x0008_0000;
        /// Wait on the object; part of FILE_ALL_ACCESS but not a named right
        const SYNCHRONIZE = 0x0010_0000;
        /// GENERIC_EXECUTE
        const GENERIC_EXECUTE = 0x2000_0000;
        /// GENERIC_WRITE
        const GENERIC_WRITE = 0x4000_0000;
        /// GENERIC_READ
        const GENERIC_READ = 0x8000_0000;
    }
}

/// FILE_ALL_ACCESS: every object-specific and standard right plus SYNCHRONIZE.
pub const FULL_CONTROL_MASK: u32 = 0x001F_01FF;

impl FileSystemRights {
    /// The "Full Control" combination
    pub const FULL_CONTROL: Self = Self::from_bits_retain(FULL_CONTROL_MASK);

    /// The "Read & Execute" combination
    pub const READ_AND_EXECUTE: Self = Self::READ_DATA
        .union(Self::EXECUTE)
        .union(Self::READ_ATTRIBUTES)
        .union(Self::READ_EXTENDED_ATTRIBUTES)
        .union(Self::READ_PERMISSIONS);

    /// The "Modify" combination
    pub const MODIFY: Self = Self::READ_DATA
        .union(Self::WRITE_DATA)
        .union(Self::EXECUTE)
        .union(Self::DELETE_CHILD)
        .union(Self::DELETE);

    /// The "Read" combination
    pub const READ: Self = Self::READ_DATA
        .union(Self::READ_EXTENDED_ATTRIBUTES)
        .union(Self::READ_ATTRIBUTES)
        .union(Self::READ_PERMISSIONS);

    /// The "Write" combination
    pub const WRITE: Self = Self::WRITE_DATA;

    /// Specific rights a set GENERIC_READ bit stands in for, for display purposes
    pub const GENERIC_READ_EXPANSION: Self = Self::READ_PERMISSIONS
        .union(Self::READ_DATA)
        .union(Self::READ_ATTRIBUTES)
        .union(Self::READ_EXTENDED_ATTRIBUTES);

    /// Specific rights a set GENERIC_WRITE bit stands in for, for display purposes
    pub const GENERIC_WRITE_EXPANSION: Self = Self::READ_PERMISSIONS
        .union(Self::WRITE_DATA)
        .union(Self::WRITE_ATTRIBUTES)
        .union(Self::WRITE_EXTENDED_ATTRIBUTES)
        .union(Self::APPEND_DATA);

    /// Specific rights a set GENERIC_EXECUTE bit stands in for, for display purposes
    pub const GENERIC_EXECUTE_EXPANSION: Self = Self::READ_PERMISSIONS
        .union(Self::READ_ATTRIBUTES)
        .union(Self::EXECUTE);

    /// Wrap a raw mask, keeping every bit
    #[must_use]
    pub fn from_mask(mask: u32) -> Self {
        Self::from_bits_retain(mask)
    }

    /// Expand set generic bits into the specific rights they stand for.
    ///
    /// The generic bits themselves are dropped from the result. This is lossy; the original
    /// generic bits can not be recovered from the expansion.
    #[must_use]
    pub fn expand_generic(self) -> Self {
        let mut expanded = self.difference(Self::generic());
        if self.contains(Self::GENERIC_READ) {
            expanded |= Self::GENERIC_READ_EXPANSION;
        }
        if self.contains(Self::GENERIC_WRITE) {
            expanded |= Self::GENERIC_WRITE_EXPANSION;
        }
        if self.contains(Self::GENERIC_EXECUTE) {
            expanded |= Self::GENERIC_EXECUTE_EXPANSION;
        }
        expanded
    }

    /// The three generic bits this crate understands
    #[must_use]
    pub const fn generic() -> Self {
        Self::GENERIC_READ
            .union(Self::GENERIC_WRITE)
            .union(Self::GENERIC_EXECUTE)
    }
}
