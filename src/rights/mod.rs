//! Access-right decoding.
//!
//! Turns the raw 32-bit mask stored in an access control entry into the two views display
//! layers need: the set of individual [`NamedRight`]s and a single canonical
//! [`PermissionSet`] label.
//!
//! # Key Components
//!
//! - [`FileSystemRights`] - bitflags over the access mask, including the generic bits
//! - [`NamedRight`] - the thirteen individually displayable rights
//! - [`AccessMask`] - raw mask with its `001F01FF` hex wire format
//! - [`decode`] / [`DecodedRights`] - named rights plus classification
//!
//! # Generic rights
//!
//! `GENERIC_READ`, `GENERIC_WRITE` and `GENERIC_EXECUTE` are expanded into the specific rights
//! they stand for when building the displayed rights, but classification always runs on the
//! raw mask. A mask of `0x80000000` therefore shows the read rights yet classifies as
//! [`PermissionSet::Special`]. Downstream permission strings depend on this, so it is kept.
//!
//! # Examples
//!
//! ```rust
//! use aclscope::rights::{decode, AccessMask, PermissionSet};
//!
//! let mask: AccessMask = "001F01FF".parse()?;
//! let decoded = decode(mask);
//! assert_eq!(decoded.permission_set(), PermissionSet::FullControl);
//! assert_eq!(decoded.mask().to_string(), "001F01FF");
//! # Ok::<(), aclscope::Error>(())
//! ```

mod decoder;
mod flags;
mod mask;
mod named;

pub use decoder::{decode, named_rights, DecodedRights, PermissionSet};
pub use flags::{FileSystemRights, FULL_CONTROL_MASK};
pub use mask::AccessMask;
pub use named::NamedRight;
