//! Access rules and the principals they apply to.
//!
//! This module builds new access control entries from account names and [`NamedRight`]s, and
//! models the entries read back from a security descriptor.
//!
//! # Key Components
//!
//! - [`encode`] - OR together the bits of a set of named rights
//! - [`RuleEncoder`] - resolve a principal and produce an explicit [`AccessControlEntry`]
//! - [`RuleMatch`] - the (principal, mask, rule type) key used to remove an entry
//! - [`PrincipalResolver`] / [`WellKnownPrincipals`] - account name to [`Sid`] translation
//! - [`RuleSummary`] - display row for one entry
//!
//! Encoding and decoding agree on every named bit: `named_rights(encode(s)) == s` for any set
//! of named rights. The reverse does not hold for masks carrying generic bits, since those
//! decode into the specific rights they stand for.
//!
//! # Examples
//!
//! ```rust
//! use aclscope::rights::NamedRight;
//! use aclscope::rule::{
//!     InheritanceFlags, PropagationFlags, RuleEncoder, RuleType, WellKnownPrincipals,
//! };
//!
//! let principals = WellKnownPrincipals::new();
//! let rule = RuleEncoder::new(&principals).build_rule(
//!     "Users",
//!     [NamedRight::ReadData, NamedRight::Execute],
//!     RuleType::Allow,
//!     InheritanceFlags::empty(),
//!     PropagationFlags::empty(),
//! )?;
//! assert_eq!(rule.mask().to_string(), "00000021");
//! # Ok::<(), aclscope::Error>(())
//! ```
//!
//! [`NamedRight`]: crate::rights::NamedRight

mod encoder;
mod principal;
mod summary;
mod types;

pub use encoder::{encode, RuleEncoder};
pub use principal::{PrincipalResolver, SecurityPrincipal, Sid, WellKnownPrincipals};
pub use summary::{RuleSummary, THIS_FILE_ONLY};
pub use types::{AccessControlEntry, InheritanceFlags, PropagationFlags, RuleMatch, RuleType};
