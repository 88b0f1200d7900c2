//! Owner and rule operations on securable objects.
//!
//! [`SecurityFacade`] is the single entry point for reading and mutating security descriptors.
//! It resolves a raw path, picks the filesystem or registry [`SecurityBackend`] and, for
//! mutations, holds an [`ElevatedSecurityAccess`] guard for the duration of the call.
//!
//! # Key Components
//!
//! - [`SecurityFacade`] - path based owner and rule operations
//! - [`SecurityBackend`] - descriptor access for one namespace
//! - [`ObjectProbe`] / [`HostProbe`] - file versus directory classification
//! - [`PrivilegeBackend`] / [`ElevatedSecurityAccess`] - scoped privilege elevation
//! - [`MemoryBackend`] - in-memory descriptor store
//!
//! Host backends talking to the operating system security subsystem implement
//! [`SecurityBackend`] and [`PrivilegeBackend`] outside of this crate.

mod backend;
mod elevation;
mod facade;
mod memory;

pub use backend::{HostProbe, ObjectKind, ObjectProbe, SecurityBackend, SecurityObject};
pub use elevation::{
    ElevatedSecurityAccess, Privilege, PrivilegeBackend, TokenHandle, ELEVATION_TOKEN_ACCESS,
    TOKEN_ADJUST_PRIVILEGES, TOKEN_QUERY,
};
pub use facade::SecurityFacade;
pub use memory::MemoryBackend;
