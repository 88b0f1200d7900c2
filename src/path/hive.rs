use std::fmt;

use strum::{EnumCount, EnumIter};

/// The fixed top-level registry namespaces a registry path can be rooted in.
///
/// Each hive is addressable by a long form (`HKEY_CURRENT_USER`) and a short form (`HKCU`),
/// both matched case-insensitively by [`crate::path::resolve`].
///
/// ## Reference
/// * <https://learn.microsoft.com/en-us/windows/win32/sysinfo/predefined-keys>
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, EnumIter, EnumCount)]
pub enum Hive {
    /// `HKEY_CLASSES_ROOT` / `HKCR` - file associations and COM registrations
    ClassesRoot,
    /// `HKEY_CURRENT_USER` / `HKCU` - settings of the interactive user
    CurrentUser,
    /// `HKEY_LOCAL_MACHINE` / `HKLM` - machine-wide configuration
    LocalMachine,
    /// `HKEY_USERS` / `HKU` - all loaded user profiles
    Users,
    /// `HKEY_CURRENT_CONFIG` / `HKCC` - current hardware profile
    CurrentConfig,
}

impl Hive {
    /// Canonical long name of the hive, e.g. `HKEY_LOCAL_MACHINE`.
    #[must_use]
    pub fn long_name(&self) -> &'static str {
        match self {
            Hive::ClassesRoot => "HKEY_CLASSES_ROOT",
            Hive::CurrentUser => "HKEY_CURRENT_USER",
            Hive::LocalMachine => "HKEY_LOCAL_MACHINE",
            Hive::Users => "HKEY_USERS",
            Hive::CurrentConfig => "HKEY_CURRENT_CONFIG",
        }
    }

    /// Abbreviated name of the hive, e.g. `HKLM`.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        match self {
            Hive::ClassesRoot => "HKCR",
            Hive::CurrentUser => "HKCU",
            Hive::LocalMachine => "HKLM",
            Hive::Users => "HKU",
            Hive::CurrentConfig => "HKCC",
        }
    }

    /// All `(alias, hive)` pairs ordered longest alias first.
    ///
    /// Matching in this order guarantees that no alias is shadowed by a shorter one that
    /// happens to be its prefix.
    #[must_use]
    pub fn aliases() -> &'static [(&'static str, Hive)] {
        &HIVE_ALIASES
    }
}

/// Long and short hive names, longest first
const HIVE_ALIASES: [(&str, Hive); Hive::COUNT * 2] = [
    ("HKEY_CURRENT_CONFIG", Hive::CurrentConfig),
    ("HKEY_LOCAL_MACHINE", Hive::LocalMachine),
    ("HKEY_CLASSES_ROOT", Hive::ClassesRoot),
    ("HKEY_CURRENT_USER", Hive::CurrentUser),
    ("HKEY_USERS", Hive::Users),
    ("HKCC", Hive::CurrentConfig),
    ("HKCR", Hive::ClassesRoot),
    ("HKCU", Hive::CurrentUser),
    ("HKLM", Hive::LocalMachine),
    ("HKU", Hive::Users),
];

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long_name())
    }
}
