//! Scoped privilege elevation.
//!
//! Writing an owner or a rule on objects the caller does not own needs the restore, backup,
//! security, take-ownership and debug privileges on the process token.
//! [`ElevatedSecurityAccess`] opens the token, enables those privileges and closes the token
//! again when it goes out of scope, on every exit path.
//!
//! Enabled privileges stay enabled on the token after the guard is dropped; the guard only
//! scopes the token handle.

use std::fmt;

use log::{debug, warn};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::{config::ElevationPolicy, Result};

/// TOKEN_ADJUST_PRIVILEGES access right on a process token
pub const TOKEN_ADJUST_PRIVILEGES: u32 = 0x0020;
/// TOKEN_QUERY access right on a process token
pub const TOKEN_QUERY: u32 = 0x0008;
/// Access requested when opening the process token
pub const ELEVATION_TOKEN_ACCESS: u32 = TOKEN_ADJUST_PRIVILEGES | TOKEN_QUERY;

/// A privilege enabled for security descriptor writes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumCount)]
pub enum Privilege {
    /// SeRestorePrivilege, write any descriptor and set any owner
    Restore,
    /// SeBackupPrivilege, read any descriptor
    Backup,
    /// SeSecurityPrivilege, access the system ACL
    Security,
    /// SeTakeOwnershipPrivilege
    TakeOwnership,
    /// SeDebugPrivilege
    Debug,
}

impl Privilege {
    /// The host name of the privilege, e.g. `SeRestorePrivilege`
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Privilege::Restore => "SeRestorePrivilege",
            Privilege::Backup => "SeBackupPrivilege",
            Privilege::Security => "SeSecurityPrivilege",
            Privilege::TakeOwnership => "SeTakeOwnershipPrivilege",
            Privilege::Debug => "SeDebugPrivilege",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Opaque handle to an opened process token.
///
/// Deliberately neither `Clone` nor `Copy`: closing consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct TokenHandle(u64);

impl TokenHandle {
    /// Wrap a raw handle value produced by a [`PrivilegeBackend`]
    #[must_use]
    pub fn new(raw: u64) -> Self {
        TokenHandle(raw)
    }

    /// The raw handle value
    #[must_use]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Access to the process token of the current process.
pub trait PrivilegeBackend: Send + Sync {
    /// Open the current process token with `access`.
    ///
    /// # Errors
    /// Returns [`crate::Error::PrivilegeAdjustFailure`] if the token can not be opened.
    fn open_process_token(&self, access: u32) -> Result<TokenHandle>;

    /// Look up `privilege` and enable it on `token`.
    ///
    /// # Errors
    /// Returns [`crate::Error::PrivilegeAdjustFailure`] if the privilege is unknown to the host or
    /// the token refuses the adjustment.
    fn enable_privilege(&self, token: &TokenHandle, privilege: Privilege) -> Result<()>;

    /// Close a token previously returned by [`PrivilegeBackend::open_process_token`]
    fn close_token(&self, token: TokenHandle);
}

/// Guard holding the process token open while elevated privileges are in use.
pub struct ElevatedSecurityAccess<'a> {
    backend: &'a dyn PrivilegeBackend,
    token: Option<TokenHandle>,
    enabled: Vec<Privilege>,
}

impl<'a> ElevatedSecurityAccess<'a> {
    /// Open the process token and enable every [`Privilege`].
    ///
    /// With [`ElevationPolicy::BestEffort`] failures are logged and the guard is returned with
    /// whatever could be enabled. With [`ElevationPolicy::Disabled`] the token is not touched.
    ///
    /// # Errors
    /// With [`ElevationPolicy::Required`], returns the first [`crate::Error::PrivilegeAdjustFailure`]
    /// reported by the backend. The token is closed before the error is returned.
    pub fn acquire(backend: &'a dyn PrivilegeBackend, policy: ElevationPolicy) -> Result<Self> {
        let mut guard = ElevatedSecurityAccess {
            backend,
            token: None,
            enabled: Vec::with_capacity(Privilege::COUNT),
        };
        if policy == ElevationPolicy::Disabled {
            return Ok(guard);
        }

        match backend.open_process_token(ELEVATION_TOKEN_ACCESS) {
            Ok(token) => guard.token = Some(token),
            Err(err) if policy == ElevationPolicy::Required => return Err(err),
            Err(err) => {
                warn!("Continuing without elevated privileges: {}", err);
                return Ok(guard);
            }
        }

        for privilege in Privilege::iter() {
            let Some(token) = guard.token.as_ref() else {
                break;
            };
            match backend.enable_privilege(token, privilege) {
                Ok(()) => guard.enabled.push(privilege),
                // guard drops here and closes the token
                Err(err) if policy == ElevationPolicy::Required => return Err(err),
                Err(err) => warn!("Could not enable {}: {}", privilege, err),
            }
        }

        debug!(
            "Elevated security access with {}/{} privileges",
            guard.enabled.len(),
            Privilege::COUNT
        );
        Ok(guard)
    }

    /// Privileges that were enabled, in the order they were requested
    #[must_use]
    pub fn enabled(&self) -> &[Privilege] {
        &self.enabled
    }

    /// Whether every privilege was enabled
    #[must_use]
    pub fn is_fully_elevated(&self) -> bool {
        self.enabled.len() == Privilege::COUNT
    }
}

impl Drop for ElevatedSecurityAccess<'_> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.backend.close_token(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::CountingPrivileges, ErrorKind};

    #[test]
    fn test_privilege_names() {
        let names: Vec<&str> = Privilege::iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            [
                "SeRestorePrivilege",
                "SeBackupPrivilege",
                "SeSecurityPrivilege",
                "SeTakeOwnershipPrivilege",
                "SeDebugPrivilege",
            ]
        );
        assert_eq!(ELEVATION_TOKEN_ACCESS, 0x0028);
    }

    #[test]
    fn test_full_elevation_closes_token() {
        let backend = CountingPrivileges::default();
        {
            let guard = ElevatedSecurityAccess::acquire(&backend, ElevationPolicy::Required).unwrap();
            assert!(guard.is_fully_elevated());
            assert_eq!(backend.open_tokens(), 1);
            assert_eq!(backend.last_access(), Some(0x0028));
        }
        assert_eq!(backend.open_tokens(), 0);
        assert_eq!(backend.closed(), 1);
    }

    #[test]
    fn test_required_failure_closes_token() {
        let backend = CountingPrivileges::failing_on(Privilege::Security);
        let err = ElevatedSecurityAccess::acquire(&backend, ElevationPolicy::Required)
            .err()
            .unwrap();

        assert_eq!(err.kind(), ErrorKind::PrivilegeAdjustFailure);
        assert!(err.to_string().contains("SeSecurityPrivilege"));
        assert_eq!(backend.open_tokens(), 0);
        assert_eq!(backend.closed(), 1);
    }

    #[test]
    fn test_best_effort_skips_failures() {
        let backend = CountingPrivileges::failing_on(Privilege::Debug);
        let guard = ElevatedSecurityAccess::acquire(&backend, ElevationPolicy::BestEffort).unwrap();

        assert!(!guard.is_fully_elevated());
        assert_eq!(guard.enabled().len(), 4);
        assert!(!guard.enabled().contains(&Privilege::Debug));
        drop(guard);
        assert_eq!(backend.open_tokens(), 0);
    }

    #[test]
    fn test_token_open_failure() {
        let backend = CountingPrivileges::without_token();

        let err = ElevatedSecurityAccess::acquire(&backend, ElevationPolicy::Required)
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::PrivilegeAdjustFailure);

        let guard = ElevatedSecurityAccess::acquire(&backend, ElevationPolicy::BestEffort).unwrap();
        assert!(guard.enabled().is_empty());
        drop(guard);
        assert_eq!(backend.closed(), 0);
    }

    #[test]
    fn test_disabled_never_opens() {
        let backend = CountingPrivileges::default();
        let guard = ElevatedSecurityAccess::acquire(&backend, ElevationPolicy::Disabled).unwrap();
        assert!(guard.enabled().is_empty());
        drop(guard);
        assert_eq!(backend.opened(), 0);
    }
}
