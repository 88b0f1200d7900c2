use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{path::Hive, Error, Result};

/// Separators accepted between a hive alias and the key path.
const SEPARATORS: [char; 2] = ['\\', '/'];

/// An object address that belongs to exactly one namespace.
///
/// Registry paths display canonically: long hive name and `\` separators throughout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SecurityObjectPath {
    /// A host filesystem path (file or directory, decided later by the facade)
    Filesystem(PathBuf),
    /// A registry key below one of the predefined hives
    RegistryHive {
        /// The hive the key lives in
        hive: Hive,
        /// Key path below the hive, without the leading separator. Empty for the hive root.
        subpath: String,
    },
}

impl SecurityObjectPath {
    /// Returns `true` for registry paths.
    #[must_use]
    pub fn is_registry(&self) -> bool {
        matches!(self, SecurityObjectPath::RegistryHive { .. })
    }

    /// The filesystem path, if this is a filesystem address.
    #[must_use]
    pub fn as_filesystem(&self) -> Option<&Path> {
        match self {
            SecurityObjectPath::Filesystem(path) => Some(path),
            SecurityObjectPath::RegistryHive { .. } => None,
        }
    }
}

impl fmt::Display for SecurityObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityObjectPath::Filesystem(path) => write!(f, "{}", path.display()),
            SecurityObjectPath::RegistryHive { hive, subpath } => {
                write!(f, "{}\\{}", hive.long_name(), subpath.replace('/', "\\"))
            }
        }
    }
}

impl FromStr for SecurityObjectPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

/// Classifies `raw` into the filesystem or registry namespace.
///
/// A string is a registry path when it starts with one of the ten hive aliases (compared
/// case-insensitively, longest alias first) immediately followed by `\` or `/`. The remainder
/// after that separator is the subpath. Every other non-empty string is a filesystem path.
///
/// # Arguments
/// * `raw` - The path as typed by the caller
///
/// # Errors
/// Returns [`Error::InvalidPath`] if `raw` is empty or contains a NUL character.
///
/// # Examples
///
/// ```rust
/// use aclscope::path::{resolve, Hive, SecurityObjectPath};
///
/// let path = resolve("HKCU\\Software\\X")?;
/// assert_eq!(
///     path,
///     SecurityObjectPath::RegistryHive { hive: Hive::CurrentUser, subpath: "Software\\X".into() }
/// );
/// # Ok::<(), aclscope::Error>(())
/// ```
pub fn resolve(raw: &str) -> Result<SecurityObjectPath> {
    if raw.is_empty() {
        return Err(invalid_path_error!("path is empty"));
    }
    if raw.contains('\0') {
        return Err(invalid_path_error!("path contains a NUL character: {:?}", raw));
    }

    for &(alias, hive) in Hive::aliases() {
        let Some(head) = raw.get(..alias.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(alias) {
            continue;
        }

        let rest = &raw[alias.len()..];
        let mut chars = rest.chars();
        if chars.next().is_some_and(|c| SEPARATORS.contains(&c)) {
            return Ok(SecurityObjectPath::RegistryHive {
                hive,
                subpath: chars.as_str().to_string(),
            });
        }
    }

    Ok(SecurityObjectPath::Filesystem(PathBuf::from(raw)))
}
