use log::debug;

use crate::{
    rights::{AccessMask, FileSystemRights, NamedRight},
    rule::{
        AccessControlEntry, InheritanceFlags, PrincipalResolver, PropagationFlags, RuleMatch,
        RuleType,
    },
    Result,
};

/// Bitwise-OR of the bits of `rights`. Duplicates are harmless and the empty set yields `0`.
///
/// # Examples
///
/// ```rust
/// use aclscope::{rights::NamedRight, rule::encode};
///
/// let mask = encode([NamedRight::ReadData, NamedRight::WriteData]);
/// assert_eq!(mask.to_string(), "00000003");
/// ```
#[must_use]
pub fn encode<I>(rights: I) -> AccessMask
where
    I: IntoIterator<Item = NamedRight>,
{
    let bits = rights
        .into_iter()
        .fold(FileSystemRights::empty(), |acc, right| acc | right.bit());
    AccessMask::from(bits)
}

/// Builds new access control entries from names and named rights.
///
/// Every entry produced here is explicit, never inherited.
pub struct RuleEncoder<'a> {
    resolver: &'a dyn PrincipalResolver,
}

impl<'a> RuleEncoder<'a> {
    /// Creates an encoder resolving account names through `resolver`
    #[must_use]
    pub fn new(resolver: &'a dyn PrincipalResolver) -> Self {
        RuleEncoder { resolver }
    }

    /// Build a rule granting or denying `rights` to the account `principal`.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownPrincipal`] if the account name does not resolve.
    pub fn build_rule<I>(
        &self,
        principal: &str,
        rights: I,
        rule_type: RuleType,
        inheritance: InheritanceFlags,
        propagation: PropagationFlags,
    ) -> Result<AccessControlEntry>
    where
        I: IntoIterator<Item = NamedRight>,
    {
        self.build_rule_with_mask(principal, encode(rights), rule_type, inheritance, propagation)
    }

    /// Build a rule from an already encoded mask. The mask is kept as given, generic bits
    /// included.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownPrincipal`] if the account name does not resolve.
    pub fn build_rule_with_mask(
        &self,
        principal: &str,
        mask: AccessMask,
        rule_type: RuleType,
        inheritance: InheritanceFlags,
        propagation: PropagationFlags,
    ) -> Result<AccessControlEntry> {
        let principal = self.resolver.resolve(principal)?;
        debug!(
            "Built {} rule for {} ({}) with mask {}",
            rule_type, principal.name, principal.sid, mask
        );

        Ok(AccessControlEntry::new(
            rule_type,
            principal,
            mask,
            inheritance,
            propagation,
        ))
    }

    /// Build the key selecting an existing rule for removal.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownPrincipal`] if the account name does not resolve.
    pub fn rule_match<I>(&self, principal: &str, rights: I, rule_type: RuleType) -> Result<RuleMatch>
    where
        I: IntoIterator<Item = NamedRight>,
    {
        let principal = self.resolver.resolve(principal)?;
        Ok(RuleMatch::new(principal, encode(rights), rule_type))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::{
        rights::{decode, named_rights, PermissionSet},
        rule::WellKnownPrincipals,
        ErrorKind,
    };

    #[test]
    fn test_encode_basic() {
        assert_eq!(encode(Vec::<NamedRight>::new()).value(), 0);
        assert_eq!(encode([NamedRight::ReadData]).value(), 0x1);
        assert_eq!(
            encode([NamedRight::ReadData, NamedRight::ReadData]).value(),
            0x1
        );
        assert_eq!(encode(NamedRight::iter()).value(), 0x000F_01FF);
    }

    #[test]
    fn test_named_bits_survive_decode() {
        let all: Vec<NamedRight> = NamedRight::iter().collect();
        for subset in 0u32..(1 << all.len()) {
            let chosen: BTreeSet<NamedRight> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| subset & (1 << i) != 0)
                .map(|(_, right)| *right)
                .collect();

            let mask = encode(chosen.iter().copied());
            assert_eq!(named_rights(mask), chosen, "subset {:#06x}", subset);
        }
    }

    #[test]
    fn test_generic_only_mask_is_lossy() {
        let decoded = decode(0x8000_0000u32);
        let reencoded = encode(decoded.rights().iter().copied());
        assert_ne!(reencoded, decoded.mask());
        assert_eq!(reencoded.value(), 0x0002_0089);
        assert_eq!(PermissionSet::classify(reencoded), PermissionSet::Read);
    }

    #[test]
    fn test_build_rule() {
        let resolver = WellKnownPrincipals::new();
        let encoder = RuleEncoder::new(&resolver);

        let rule = encoder
            .build_rule(
                "Users",
                [
                    NamedRight::ReadData,
                    NamedRight::ReadAttributes,
                    NamedRight::ReadExtendedAttributes,
                    NamedRight::ReadPermissions,
                ],
                RuleType::Allow,
                InheritanceFlags::CONTAINER_INHERIT | InheritanceFlags::OBJECT_INHERIT,
                PropagationFlags::empty(),
            )
            .unwrap();

        assert_eq!(rule.principal().name, "BUILTIN\\Users");
        assert_eq!(rule.mask().to_string(), "00020089");
        assert_eq!(rule.permission_set(), PermissionSet::Read);
        assert!(!rule.is_inherited());
    }

    #[test]
    fn test_build_rule_unknown_principal() {
        let resolver = WellKnownPrincipals::new();
        let encoder = RuleEncoder::new(&resolver);

        let err = encoder
            .build_rule(
                "no such account",
                [NamedRight::ReadData],
                RuleType::Deny,
                InheritanceFlags::empty(),
                PropagationFlags::empty(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownPrincipal);
    }

    #[test]
    fn test_rule_match_from_names() {
        let resolver = WellKnownPrincipals::new();
        let encoder = RuleEncoder::new(&resolver);

        let rule = encoder
            .build_rule_with_mask(
                "Everyone",
                AccessMask::new(0x2),
                RuleType::Deny,
                InheritanceFlags::OBJECT_INHERIT,
                PropagationFlags::INHERIT_ONLY,
            )
            .unwrap();
        let key = encoder
            .rule_match("S-1-1-0", [NamedRight::WriteData], RuleType::Deny)
            .unwrap();

        assert!(key.matches(&rule));
    }
}
