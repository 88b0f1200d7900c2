// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # aclscope
//!
//! An interpretation layer for discretionary access control on filesystem objects and registry
//! keys. `aclscope` turns raw 32-bit access masks into named rights and canonical permission
//! labels, builds new access rules from account names and rights, and offers one uniform set
//! of owner and rule operations over both namespaces.
//!
//! ## Features
//!
//! - **🔍 Mask decoding** - Named rights, generic-right expansion and permission-set labels
//! - **🧱 Rule encoding** - Principal resolution and explicit access rule construction
//! - **🗂️ Unified addressing** - Registry hive aliases and filesystem paths behind one resolver
//! - **🛡️ Scoped elevation** - Privilege guard that always releases the process token
//! - **🧩 Pluggable backends** - Host security subsystems plug in behind small traits
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! aclscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use aclscope::prelude::*;
//!
//! let decoded = decode(AccessMask::parse("001200A9")?);
//! assert_eq!(decoded.permission_set(), PermissionSet::ReadAndExecute);
//! assert!(decoded.has(NamedRight::Execute));
//! # Ok::<(), aclscope::Error>(())
//! ```
//!
//! ### Managing Rules
//!
//! ```rust
//! use aclscope::prelude::*;
//!
//! let store = MemoryBackend::new();
//! store.insert_registry_key(Hive::LocalMachine, "Software\\Vendor", WellKnownPrincipals::new().resolve("SYSTEM")?)?;
//!
//! let facade = SecurityFacade::new(
//!     Box::new(store.clone()),
//!     Box::new(store),
//!     Box::new(WellKnownPrincipals::new()),
//! );
//! facade.add_named_rule(
//!     "HKLM\\Software\\Vendor",
//!     "Users",
//!     [NamedRight::ReadData, NamedRight::ReadAttributes, NamedRight::ReadExtendedAttributes, NamedRight::ReadPermissions],
//!     RuleType::Allow,
//!     InheritanceFlags::CONTAINER_INHERIT,
//!     PropagationFlags::empty(),
//! )?;
//!
//! for row in facade.describe_rules("HKLM\\Software\\Vendor")? {
//!     println!("{}", row);
//! }
//! # Ok::<(), aclscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`path`] - classify a raw string as a registry key or a filesystem path
//! - [`rights`] - decode access masks
//! - [`rule`] - principals, access control entries and rule encoding
//! - [`security`] - the facade, backend traits and privilege elevation
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Failures are never folded into a
//! success value:
//!
//! ```rust
//! use aclscope::{Error, ErrorKind, rights::AccessMask};
//!
//! match AccessMask::parse("not hex") {
//!     Ok(mask) => println!("{}", mask),
//!     Err(e) if e.kind() == ErrorKind::InvalidMask => println!("bad mask: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never installs a logger.
//! Dispatch decisions are logged at `debug`, completed mutations at `info` and degraded
//! behavior (skipped privileges, partially cleared descriptors) at `warn`.
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run resolve_decode --release
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! ```
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use aclscope::prelude::*;
///
/// let path = resolve("HKCU\\Software")?;
/// assert!(path.is_registry());
/// # Ok::<(), aclscope::Error>(())
/// ```
pub mod prelude;

/// Facade configuration and elevation presets
pub mod config;

/// Path resolution into the filesystem or registry namespace
///
/// # Examples
///
/// ```rust
/// use aclscope::path::{resolve, Hive, SecurityObjectPath};
///
/// let path = resolve("HKEY_LOCAL_MACHINE\\A")?;
/// assert_eq!(
///     path,
///     SecurityObjectPath::RegistryHive { hive: Hive::LocalMachine, subpath: "A".into() }
/// );
/// assert!(!resolve("C:\\Users\\me")?.is_registry());
/// # Ok::<(), aclscope::Error>(())
/// ```
pub mod path;

pub mod rights;

pub mod rule;

pub mod security;

/// `aclscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `aclscope` Error type
///
/// The main error type for all operations in this crate. See [`Error::kind`] for matching on
/// the failure class without destructuring.
pub use error::{Error, ErrorKind};

pub use config::{ElevationPolicy, FacadeConfig};

/// Main entry point for owner and rule operations.
///
/// See [`security::SecurityFacade`].
pub use security::SecurityFacade;
