//! Dual-namespace object addressing.
//!
//! Object paths arrive as plain strings. This module decides, once, which namespace a string
//! belongs to so the rest of the crate can match on [`SecurityObjectPath`] instead of
//! re-inspecting strings.
//!
//! # Syntax
//!
//! - `HKEY_CURRENT_USER\Software\Vendor`, `hkcu\Software\Vendor` - registry key below a [`Hive`]
//! - anything else (`C:\Users\me`, `/srv/share`) - filesystem object
//!
//! Resolution is total: every non-empty string without a NUL character resolves to exactly one
//! namespace.
//!
//! # Examples
//!
//! ```rust
//! use aclscope::path::{resolve, Hive, SecurityObjectPath};
//! use std::path::PathBuf;
//!
//! assert_eq!(
//!     resolve("HKEY_LOCAL_MACHINE\\A")?,
//!     SecurityObjectPath::RegistryHive { hive: Hive::LocalMachine, subpath: "A".into() }
//! );
//! assert_eq!(
//!     resolve("C:\\Users\\me")?,
//!     SecurityObjectPath::Filesystem(PathBuf::from("C:\\Users\\me"))
//! );
//! # Ok::<(), aclscope::Error>(())
//! ```

mod hive;
mod resolver;

pub use hive::Hive;
pub use resolver::{resolve, SecurityObjectPath};
