use thiserror::Error;

use crate::{rights::AccessMask, rule::RuleType};

macro_rules! invalid_path_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidPath($msg.to_string())
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidPath(format!($fmt, $($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every mutating facade operation reports its failure through one of these variants; reads
/// never fold an error into a placeholder value.
///
/// # Error Categories
///
/// ## Addressing
/// - [`Error::InvalidPath`] - Empty or unparseable object path
/// - [`Error::NotFound`] - Object absent in its resolved namespace
///
/// ## Backend
/// - [`Error::AccessDenied`] - The security subsystem refused the operation
/// - [`Error::RuleNotFound`] - The rule to remove is not part of the descriptor
/// - [`Error::LockError`] - A backend lock was poisoned
/// - [`Error::FileError`] - Unexpected host I/O failure
///
/// ## Identity and privileges
/// - [`Error::UnknownPrincipal`] - Account name could not be resolved to a SID
/// - [`Error::InvalidSid`] - Malformed `S-1-...` string
/// - [`Error::PrivilegeAdjustFailure`] - Elevated security access could not be obtained
///
/// ## Wire format
/// - [`Error::InvalidMask`] - Access mask string is not 1 to 8 hex digits
///
/// # Examples
///
/// ```rust
/// use aclscope::{Error, path::resolve};
///
/// match resolve("") {
///     Err(Error::InvalidPath(message)) => eprintln!("bad path: {}", message),
///     Err(e) => eprintln!("Other error: {}", e),
///     Ok(path) => println!("{}", path),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The object path is empty or can not be parsed.
    #[error("Invalid object path - {0}")]
    InvalidPath(String),

    /// The object does not exist in its resolved namespace.
    ///
    /// For filesystem paths this means the path is neither a file nor a directory.
    #[error("Object not found - {0}")]
    NotFound(String),

    /// The backend refused the operation.
    #[error("Access denied - {0}")]
    AccessDenied(String),

    /// The account name could not be translated into a security identifier.
    #[error("Unknown principal - {0}")]
    UnknownPrincipal(String),

    /// Elevated security access could not be acquired.
    ///
    /// # Fields
    ///
    /// * `privilege` - The privilege (or `"token"` for the token itself) that failed
    /// * `message` - Detail reported by the privilege backend
    #[error("Failed to adjust privilege {privilege}: {message}")]
    PrivilegeAdjustFailure {
        /// The privilege that could not be enabled
        privilege: String,
        /// The reason reported by the privilege backend
        message: String,
    },

    /// No rule on the object matches the removal key.
    #[error("No {rule_type} rule for '{principal}' with mask {mask}")]
    RuleNotFound {
        /// Name of the principal of the requested rule
        principal: String,
        /// Rights mask of the requested rule
        mask: AccessMask,
        /// Allow or Deny
        rule_type: RuleType,
    },

    /// The access mask string is not in the 8-hex-digit wire format.
    #[error("Invalid access mask - {0}")]
    InvalidMask(String),

    /// The string is not a valid `S-R-I-S...` security identifier.
    #[error("Invalid security identifier - {0}")]
    InvalidSid(String),

    /// Failed to lock target.
    ///
    /// This error occurs when thread synchronization fails, typically
    /// when trying to acquire a mutex or rwlock that is in an invalid state.
    #[error("Failed to lock target")]
    LockError,

    /// File I/O error.
    ///
    /// Wraps host I/O errors that are neither "not found" nor "permission denied".
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}

/// Stable discriminant of [`Error`], for callers that only care about the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidPath`]
    InvalidPath,
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::AccessDenied`]
    AccessDenied,
    /// See [`Error::UnknownPrincipal`]
    UnknownPrincipal,
    /// See [`Error::PrivilegeAdjustFailure`]
    PrivilegeAdjustFailure,
    /// See [`Error::RuleNotFound`]
    RuleNotFound,
    /// See [`Error::InvalidMask`]
    InvalidMask,
    /// See [`Error::InvalidSid`]
    InvalidSid,
    /// See [`Error::LockError`]
    LockError,
    /// See [`Error::FileError`]
    FileError,
}

impl Error {
    /// Returns the failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPath(_) => ErrorKind::InvalidPath,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::AccessDenied(_) => ErrorKind::AccessDenied,
            Error::UnknownPrincipal(_) => ErrorKind::UnknownPrincipal,
            Error::PrivilegeAdjustFailure { .. } => ErrorKind::PrivilegeAdjustFailure,
            Error::RuleNotFound { .. } => ErrorKind::RuleNotFound,
            Error::InvalidMask(_) => ErrorKind::InvalidMask,
            Error::InvalidSid(_) => ErrorKind::InvalidSid,
            Error::LockError => ErrorKind::LockError,
            Error::FileError(_) => ErrorKind::FileError,
        }
    }

    /// Maps a host I/O error onto the taxonomy, keeping `subject` as context.
    pub(crate) fn from_io(err: std::io::Error, subject: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(subject.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                Error::AccessDenied(format!("{}: {}", subject, err))
            }
            _ => Error::FileError(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            Error::InvalidPath("x".into()).kind(),
            ErrorKind::InvalidPath
        );
        assert_eq!(Error::LockError.kind(), ErrorKind::LockError);
        assert_eq!(
            Error::RuleNotFound {
                principal: "Users".into(),
                mask: AccessMask::new(0x1),
                rule_type: RuleType::Allow,
            }
            .kind(),
            ErrorKind::RuleNotFound
        );
    }

    #[test]
    fn test_rule_not_found_display() {
        let err = Error::RuleNotFound {
            principal: "Users".into(),
            mask: AccessMask::new(0x0012_0089),
            rule_type: RuleType::Deny,
        };
        assert_eq!(
            err.to_string(),
            "No Deny rule for 'Users' with mask 00120089"
        );
    }

    #[test]
    fn test_from_io_mapping() {
        let err = Error::from_io(
            std::io::Error::from(std::io::ErrorKind::NotFound),
            "C:\\missing",
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = Error::from_io(
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            "C:\\secret",
        );
        assert_eq!(err.kind(), ErrorKind::AccessDenied);

        let err = Error::from_io(
            std::io::Error::from(std::io::ErrorKind::Interrupted),
            "C:\\x",
        );
        assert_eq!(err.kind(), ErrorKind::FileError);
    }

    #[test]
    fn test_invalid_path_macro() {
        let err = invalid_path_error!("bad {} path", "registry");
        assert_eq!(err.to_string(), "Invalid object path - bad registry path");
    }
}
