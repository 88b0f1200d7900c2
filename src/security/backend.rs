use std::{
    fmt,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
};

use crate::{
    path::Hive,
    rule::{AccessControlEntry, RuleMatch, SecurityPrincipal},
    Error, Result,
};

/// What kind of securable object a path refers to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ObjectKind {
    /// A regular file
    File,
    /// A directory
    Directory,
    /// A registry key
    RegistryKey,
}

impl ObjectKind {
    /// Whether child objects can inherit from this kind of object
    #[must_use]
    pub fn is_container(&self) -> bool {
        !matches!(self, ObjectKind::File)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::File => write!(f, "file"),
            ObjectKind::Directory => write!(f, "directory"),
            ObjectKind::RegistryKey => write!(f, "registry key"),
        }
    }
}

/// A located securable object, ready to be handed to a backend.
///
/// Registry keys compare and hash with their subkey folded to ASCII lowercase, as the host
/// registry looks keys up case-insensitively. Filesystem paths compare exactly.
#[derive(Clone, Debug)]
pub enum SecurityObject {
    /// Existing regular file
    File(PathBuf),
    /// Existing directory
    Directory(PathBuf),
    /// Registry key below a hive
    RegistryKey {
        /// Root hive
        hive: Hive,
        /// Subkey path, empty for the hive root
        subkey: String,
    },
}

impl SecurityObject {
    /// The kind of this object
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match self {
            SecurityObject::File(_) => ObjectKind::File,
            SecurityObject::Directory(_) => ObjectKind::Directory,
            SecurityObject::RegistryKey { .. } => ObjectKind::RegistryKey,
        }
    }

    /// Registry key from a hive and a subkey.
    ///
    /// Separators are normalized to `\` and trailing separators are dropped, so `Software/X\`
    /// and `Software\X` name the same key.
    #[must_use]
    pub fn registry_key(hive: Hive, subkey: &str) -> Self {
        SecurityObject::RegistryKey {
            hive,
            subkey: subkey.replace('/', "\\").trim_end_matches('\\').to_string(),
        }
    }
}

impl PartialEq for SecurityObject {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SecurityObject::File(a), SecurityObject::File(b))
            | (SecurityObject::Directory(a), SecurityObject::Directory(b)) => a == b,
            (
                SecurityObject::RegistryKey { hive, subkey },
                SecurityObject::RegistryKey {
                    hive: other_hive,
                    subkey: other_subkey,
                },
            ) => hive == other_hive && subkey.eq_ignore_ascii_case(other_subkey),
            _ => false,
        }
    }
}

impl Eq for SecurityObject {}

impl Hash for SecurityObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            SecurityObject::File(path) | SecurityObject::Directory(path) => path.hash(state),
            SecurityObject::RegistryKey { hive, subkey } => {
                hive.hash(state);
                for byte in subkey.bytes() {
                    byte.to_ascii_lowercase().hash(state);
                }
                subkey.len().hash(state);
            }
        }
    }
}

impl fmt::Display for SecurityObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityObject::File(path) | SecurityObject::Directory(path) => {
                write!(f, "{}", path.display())
            }
            SecurityObject::RegistryKey { hive, subkey } => {
                write!(f, "{}\\{}", hive.long_name(), subkey)
            }
        }
    }
}

/// Reads and writes the owner and discretionary rules of one namespace of objects.
///
/// One backend serves the filesystem, another the registry. Each call is a single
/// read-modify-write of the object's descriptor; callers get no isolation between calls.
pub trait SecurityBackend: Send + Sync {
    /// Short name used in log output, e.g. `memory`
    fn name(&self) -> &str;

    /// The current owner of `object`.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] for unknown objects or [`Error::AccessDenied`] if the
    /// descriptor can not be read.
    fn owner(&self, object: &SecurityObject) -> Result<SecurityPrincipal>;

    /// Replace the owner of `object`.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] or [`Error::AccessDenied`].
    fn set_owner(&self, object: &SecurityObject, owner: &SecurityPrincipal) -> Result<()>;

    /// All rules on `object`, explicit and inherited, in descriptor order.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] or [`Error::AccessDenied`].
    fn access_rules(&self, object: &SecurityObject) -> Result<Vec<AccessControlEntry>>;

    /// Append an explicit rule to `object`.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] or [`Error::AccessDenied`].
    fn add_access_rule(&self, object: &SecurityObject, rule: &AccessControlEntry) -> Result<()>;

    /// Remove the first rule selected by `key`. Returns whether a rule was removed.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] or [`Error::AccessDenied`].
    fn remove_access_rule(&self, object: &SecurityObject, key: &RuleMatch) -> Result<bool>;
}

/// Tells files and directories apart for filesystem paths.
pub trait ObjectProbe: Send + Sync {
    /// Kind of the object at `path`, `None` if there is nothing there.
    ///
    /// # Errors
    /// Returns an error if the path exists but can not be inspected.
    fn probe(&self, path: &Path) -> Result<Option<ObjectKind>>;
}

/// [`ObjectProbe`] backed by the host filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostProbe;

impl ObjectProbe for HostProbe {
    fn probe(&self, path: &Path) -> Result<Option<ObjectKind>> {
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => Ok(Some(ObjectKind::Directory)),
            Ok(metadata) if metadata.is_file() => Ok(Some(ObjectKind::File)),
            Ok(_) => Ok(None),
            Err(err) => match Error::from_io(err, &path.display().to_string()) {
                Error::NotFound(_) => Ok(None),
                other => Err(other),
            },
        }
    }
}
