use std::fmt;

use crate::{rule::AccessControlEntry, security::ObjectKind};

/// Text shown in the applies-to column for rules on plain files.
pub const THIS_FILE_ONLY: &str = "This file only";

/// One display row describing an access control entry.
///
/// Every column is derived from the entry when the row is built; nothing is cached on the
/// entry itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RuleSummary {
    /// `Allow` or `Deny`
    pub rule_type: String,
    /// Principal name
    pub principal: String,
    /// Permission-set label, e.g. `Read & Execute`
    pub access: String,
    /// `True` or `False`
    pub inherited: String,
    /// Inheritance flags for containers, [`THIS_FILE_ONLY`] for files
    pub applies_to: String,
    /// `True` if the rule propagates normally, `-` for files
    pub propagate: String,
    /// The mask in its 8-hex-digit wire format
    pub mask: String,
}

impl RuleSummary {
    /// Build the row for `entry` on an object of the given kind
    #[must_use]
    pub fn new(entry: &AccessControlEntry, kind: ObjectKind) -> Self {
        let (applies_to, propagate) = if kind.is_container() {
            (
                entry.inheritance().to_string(),
                bool_text(entry.propagation().is_empty()).to_string(),
            )
        } else {
            (THIS_FILE_ONLY.to_string(), "-".to_string())
        };

        RuleSummary {
            rule_type: entry.rule_type().to_string(),
            principal: entry.principal().name.clone(),
            access: entry.permission_set().label().to_string(),
            inherited: bool_text(entry.is_inherited()).to_string(),
            applies_to,
            propagate,
            mask: entry.mask().to_string(),
        }
    }
}

impl fmt::Display for RuleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (inherited: {}, applies to: {}, propagate: {}) [{}]",
            self.rule_type,
            self.principal,
            self.access,
            self.inherited,
            self.applies_to,
            self.propagate,
            self.mask
        )
    }
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
