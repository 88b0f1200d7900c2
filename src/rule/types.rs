use std::fmt;

use bitflags::bitflags;

use crate::{
    rights::{decode, AccessMask, DecodedRights, PermissionSet},
    rule::SecurityPrincipal,
};

/// Whether an access control entry grants or refuses its rights.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RuleType {
    /// ACCESS_ALLOWED_ACE
    Allow,
    /// ACCESS_DENIED_ACE
    Deny,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::Allow => write!(f, "Allow"),
            RuleType::Deny => write!(f, "Deny"),
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Which kinds of child objects inherit a rule. Empty means the rule is not inherited.
    pub struct InheritanceFlags: u32 {
        /// Child containers (subdirectories, subkeys) inherit the rule
        const CONTAINER_INHERIT = 0x1;
        /// Child leaf objects (files) inherit the rule
        const OBJECT_INHERIT = 0x2;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// How an inheritable rule propagates. Empty means normal propagation.
    pub struct PropagationFlags: u32 {
        /// Only immediate children inherit the rule
        const NO_PROPAGATE_INHERIT = 0x1;
        /// The rule applies to children only, not to the object itself
        const INHERIT_ONLY = 0x2;
    }
}

impl fmt::Display for InheritanceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (InheritanceFlags::CONTAINER_INHERIT, "ContainerInherit"),
            (InheritanceFlags::OBJECT_INHERIT, "ObjectInherit"),
        ];
        write_flag_names(f, self.bits(), &names.map(|(flag, name)| (flag.bits(), name)))
    }
}

impl fmt::Display for PropagationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (PropagationFlags::NO_PROPAGATE_INHERIT, "NoPropagateInherit"),
            (PropagationFlags::INHERIT_ONLY, "InheritOnly"),
        ];
        write_flag_names(f, self.bits(), &names.map(|(flag, name)| (flag.bits(), name)))
    }
}

/// Renders `None` for an empty set, otherwise the comma separated names of the set flags.
fn write_flag_names(f: &mut fmt::Formatter<'_>, bits: u32, names: &[(u32, &str)]) -> fmt::Result {
    if bits == 0 {
        return write!(f, "None");
    }

    let mut first = true;
    for (bit, name) in names {
        if bits & bit == *bit {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", name)?;
            first = false;
        }
    }
    Ok(())
}

/// A single access control entry.
///
/// Entries read from a backend are immutable values; a rule to add is a fresh entry built with
/// [`AccessControlEntry::new`], which is never marked inherited. The inherited flag only ever
/// comes from a backend.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AccessControlEntry {
    rule_type: RuleType,
    principal: SecurityPrincipal,
    mask: AccessMask,
    inherited: bool,
    inheritance: InheritanceFlags,
    propagation: PropagationFlags,
}

impl AccessControlEntry {
    /// Creates an explicit (non-inherited) entry
    #[must_use]
    pub fn new(
        rule_type: RuleType,
        principal: SecurityPrincipal,
        mask: AccessMask,
        inheritance: InheritanceFlags,
        propagation: PropagationFlags,
    ) -> Self {
        AccessControlEntry {
            rule_type,
            principal,
            mask,
            inherited: false,
            inheritance,
            propagation,
        }
    }

    /// Marks the entry as inherited from a parent object. Intended for backends reporting
    /// entries they did not receive from this crate.
    #[must_use]
    pub fn into_inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    /// Returns an explicit copy of this entry
    #[must_use]
    pub fn to_explicit(&self) -> Self {
        AccessControlEntry {
            inherited: false,
            ..self.clone()
        }
    }

    /// Allow or Deny
    #[must_use]
    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    /// The principal the rule applies to
    #[must_use]
    pub fn principal(&self) -> &SecurityPrincipal {
        &self.principal
    }

    /// The raw rights mask
    #[must_use]
    pub fn mask(&self) -> AccessMask {
        self.mask
    }

    /// Whether the entry was inherited from a parent object
    #[must_use]
    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// Inheritance flags
    #[must_use]
    pub fn inheritance(&self) -> InheritanceFlags {
        self.inheritance
    }

    /// Propagation flags
    #[must_use]
    pub fn propagation(&self) -> PropagationFlags {
        self.propagation
    }

    /// Decode the rights mask
    #[must_use]
    pub fn decode(&self) -> DecodedRights {
        decode(self.mask)
    }

    /// Permission-set label, recomputed from the mask on every call
    #[must_use]
    pub fn permission_set(&self) -> PermissionSet {
        PermissionSet::classify(self.mask)
    }
}

/// Key used to select the entry to remove.
///
/// Matches on principal identity, exact mask and rule type. Inheritance and propagation flags
/// are not part of the key.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RuleMatch {
    /// The principal of the entry
    pub principal: SecurityPrincipal,
    /// The exact rights mask of the entry
    pub mask: AccessMask,
    /// Allow or Deny
    pub rule_type: RuleType,
}

impl RuleMatch {
    /// Creates a removal key
    #[must_use]
    pub fn new(principal: SecurityPrincipal, mask: AccessMask, rule_type: RuleType) -> Self {
        RuleMatch {
            principal,
            mask,
            rule_type,
        }
    }

    /// Whether `entry` is selected by this key
    #[must_use]
    pub fn matches(&self, entry: &AccessControlEntry) -> bool {
        entry.rule_type == self.rule_type
            && entry.mask == self.mask
            && entry.principal.same_identity(&self.principal)
    }
}

impl From<&AccessControlEntry> for RuleMatch {
    fn from(entry: &AccessControlEntry) -> Self {
        RuleMatch::new(entry.principal.clone(), entry.mask, entry.rule_type)
    }
}
