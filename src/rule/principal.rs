use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// Largest identifier authority that fits the 6-byte SID authority field.
const MAX_AUTHORITY: u64 = 0x0000_FFFF_FFFF_FFFF;
/// Largest number of sub-authorities a SID can carry.
const MAX_SUB_AUTHORITIES: usize = 15;

/// A security identifier, the unique identity behind an account name.
///
/// Rendered and parsed in the `S-R-I-S-S...` string form. Authorities of 2^32 and above are
/// rendered in hexadecimal (`0x...`), matching the host convention.
///
/// # Examples
///
/// ```rust
/// use aclscope::rule::Sid;
///
/// let sid: Sid = "S-1-5-32-545".parse()?;
/// assert_eq!(sid.authority(), 5);
/// assert_eq!(sid.sub_authorities(), &[32, 545]);
/// assert_eq!(sid.to_string(), "S-1-5-32-545");
/// # Ok::<(), aclscope::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Sid {
    revision: u8,
    authority: u64,
    sub_authorities: Vec<u32>,
}

impl Sid {
    /// Creates a new SID.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSid`] if the authority exceeds 48 bits or more than fifteen
    /// sub-authorities are given.
    pub fn new(revision: u8, authority: u64, sub_authorities: &[u32]) -> Result<Self> {
        if authority > MAX_AUTHORITY {
            return Err(Error::InvalidSid(format!(
                "identifier authority {:#x} exceeds 48 bits",
                authority
            )));
        }
        if sub_authorities.len() > MAX_SUB_AUTHORITIES {
            return Err(Error::InvalidSid(format!(
                "{} sub-authorities, at most {} allowed",
                sub_authorities.len(),
                MAX_SUB_AUTHORITIES
            )));
        }

        Ok(Sid {
            revision,
            authority,
            sub_authorities: sub_authorities.to_vec(),
        })
    }

    /// SID revision, always 1 on current hosts
    #[must_use]
    pub fn revision(&self) -> u8 {
        self.revision
    }

    /// Identifier authority
    #[must_use]
    pub fn authority(&self) -> u64 {
        self.authority
    }

    /// Sub-authorities, the last one is the relative identifier
    #[must_use]
    pub fn sub_authorities(&self) -> &[u32] {
        &self.sub_authorities
    }

    /// Parse a SID from its string form.
    ///
    /// # Errors
    /// Returns [`Error::InvalidSid`] if `text` is not of the form `S-R-I(-S)*`.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || Error::InvalidSid(text.to_string());

        let mut parts = text.trim().split('-');
        match parts.next() {
            Some(prefix) if prefix.eq_ignore_ascii_case("S") => {}
            _ => return Err(invalid()),
        }

        let revision = parts
            .next()
            .and_then(|part| part.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        let authority_text = parts.next().ok_or_else(invalid)?;
        let authority = match authority_text
            .strip_prefix("0x")
            .or_else(|| authority_text.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => authority_text.parse::<u64>(),
        }
        .map_err(|_| invalid())?;

        let sub_authorities = parts
            .map(|part| part.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<u32>>>()?;

        Sid::new(revision, authority, &sub_authorities)
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-", self.revision)?;
        if self.authority > u64::from(u32::MAX) {
            write!(f, "{:#X}", self.authority)?;
        } else {
            write!(f, "{}", self.authority)?;
        }
        for sub_authority in &self.sub_authorities {
            write!(f, "-{}", sub_authority)?;
        }
        Ok(())
    }
}

impl FromStr for Sid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// An account name together with the identity it resolved to.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SecurityPrincipal {
    /// Account name, e.g. `BUILTIN\Users`
    pub name: String,
    /// The resolved identity
    pub sid: Sid,
}

impl SecurityPrincipal {
    /// Creates a principal from an already resolved identity
    #[must_use]
    pub fn new(name: impl Into<String>, sid: Sid) -> Self {
        SecurityPrincipal {
            name: name.into(),
            sid,
        }
    }

    /// Whether both principals denote the same identity, regardless of how the name is spelled
    #[must_use]
    pub fn same_identity(&self, other: &SecurityPrincipal) -> bool {
        self.sid == other.sid
    }
}

impl fmt::Display for SecurityPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Translates between account names and security identifiers.
///
/// Implementations perform a single best-effort lookup; no retries or directory fallbacks
/// are expected.
pub trait PrincipalResolver: Send + Sync {
    /// Resolve an account name to its SID
    fn lookup_account(&self, name: &str) -> Option<Sid>;

    /// Resolve a SID back to its canonical account name
    fn lookup_sid(&self, sid: &Sid) -> Option<String>;

    /// Resolve `name` into a [`SecurityPrincipal`] carrying the canonical account name.
    ///
    /// # Errors
    /// Returns [`Error::UnknownPrincipal`] if the name does not resolve.
    fn resolve(&self, name: &str) -> Result<SecurityPrincipal> {
        let sid = self
            .lookup_account(name)
            .ok_or_else(|| Error::UnknownPrincipal(name.to_string()))?;
        let canonical = self
            .lookup_sid(&sid)
            .unwrap_or_else(|| name.trim().to_string());

        Ok(SecurityPrincipal::new(canonical, sid))
    }
}

/// Resolver for the well-known host accounts plus explicitly registered ones.
///
/// Names match case-insensitively, with or without their domain prefix (`Users` and
/// `BUILTIN\Users` are the same account). Literal SID strings resolve to themselves.
#[derive(Clone, Debug)]
pub struct WellKnownPrincipals {
    accounts: Vec<(String, Sid)>,
}

/// `(canonical name, authority, sub-authorities)` of the well-known accounts, all revision 1.
const WELL_KNOWN: &[(&str, u64, &[u32])] = &[
    ("Everyone", 1, &[0]),
    ("CREATOR OWNER", 3, &[0]),
    ("CREATOR GROUP", 3, &[1]),
    ("NT AUTHORITY\\Authenticated Users", 5, &[11]),
    ("NT AUTHORITY\\SYSTEM", 5, &[18]),
    ("NT AUTHORITY\\LOCAL SERVICE", 5, &[19]),
    ("NT AUTHORITY\\NETWORK SERVICE", 5, &[20]),
    ("BUILTIN\\Administrators", 5, &[32, 544]),
    ("BUILTIN\\Users", 5, &[32, 545]),
    ("BUILTIN\\Guests", 5, &[32, 546]),
    ("BUILTIN\\Power Users", 5, &[32, 547]),
];

impl WellKnownPrincipals {
    /// Resolver knowing only the well-known accounts
    #[must_use]
    pub fn new() -> Self {
        let accounts = WELL_KNOWN
            .iter()
            .map(|(name, authority, subs)| {
                (
                    (*name).to_string(),
                    Sid {
                        revision: 1,
                        authority: *authority,
                        sub_authorities: subs.to_vec(),
                    },
                )
            })
            .collect();

        WellKnownPrincipals { accounts }
    }

    /// Register an additional account, e.g. `HOST\alice`
    #[must_use]
    pub fn with_account(mut self, name: impl Into<String>, sid: Sid) -> Self {
        self.accounts.push((name.into(), sid));
        self
    }

    fn matches(candidate: &str, requested: &str) -> bool {
        if candidate.eq_ignore_ascii_case(requested) {
            return true;
        }
        // "BUILTIN\Users" is also reachable as "Users", but not the other way around
        !requested.contains('\\')
            && candidate
                .rsplit_once('\\')
                .is_some_and(|(_, account)| account.eq_ignore_ascii_case(requested))
    }
}

impl Default for WellKnownPrincipals {
    fn default() -> Self {
        Self::new()
    }
}

impl PrincipalResolver for WellKnownPrincipals {
    fn lookup_account(&self, name: &str) -> Option<Sid> {
        let requested = name.trim();
        if requested.is_empty() {
            return None;
        }

        if let Some((_, sid)) = self
            .accounts
            .iter()
            .find(|(candidate, _)| Self::matches(candidate, requested))
        {
            return Some(sid.clone());
        }

        if requested
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("S-"))
        {
            return Sid::parse(requested).ok();
        }

        None
    }

    fn lookup_sid(&self, sid: &Sid) -> Option<String> {
        self.accounts
            .iter()
            .find(|(_, candidate)| candidate == sid)
            .map(|(name, _)| name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_sid_parse_display() {
        let sid = Sid::parse("S-1-5-32-544").unwrap();
        assert_eq!(sid.revision(), 1);
        assert_eq!(sid.authority(), 5);
        assert_eq!(sid.sub_authorities(), &[32, 544]);
        assert_eq!(sid.to_string(), "S-1-5-32-544");

        let world: Sid = "s-1-1-0".parse().unwrap();
        assert_eq!(world.to_string(), "S-1-1-0");

        let no_subs = Sid::parse("S-1-5").unwrap();
        assert!(no_subs.sub_authorities().is_empty());
    }

    #[test]
    fn test_sid_large_authority() {
        let sid = Sid::parse("S-1-0x100000000-7").unwrap();
        assert_eq!(sid.authority(), 0x1_0000_0000);
        assert_eq!(sid.to_string(), "S-1-0x100000000-7");
    }

    #[test]
    fn test_sid_parse_invalid() {
        for input in [
            "",
            "S",
            "S-1",
            "X-1-5",
            "S-x-5",
            "S-1-5-abc",
            "S-1-5--1",
            "S-1-0x1000000000000",
            "S-1-5-1-2-3-4-5-6-7-8-9-10-11-12-13-14-15-16",
        ] {
            assert_eq!(
                Sid::parse(input).unwrap_err().kind(),
                ErrorKind::InvalidSid,
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_well_known_lookup() {
        let resolver = WellKnownPrincipals::new();

        let users = resolver.resolve("Users").unwrap();
        assert_eq!(users.name, "BUILTIN\\Users");
        assert_eq!(users.sid.to_string(), "S-1-5-32-545");

        let users_prefixed = resolver.resolve("builtin\\users").unwrap();
        assert!(users.same_identity(&users_prefixed));

        let system = resolver.resolve("SYSTEM").unwrap();
        assert_eq!(system.sid.to_string(), "S-1-5-18");

        let everyone = resolver.resolve("  everyone ").unwrap();
        assert_eq!(everyone.name, "Everyone");
    }

    #[test]
    fn test_domain_mismatch_not_resolved() {
        let resolver = WellKnownPrincipals::new();
        assert!(resolver.lookup_account("OTHERDOMAIN\\Users").is_none());
    }

    #[test]
    fn test_literal_sid_lookup() {
        let resolver = WellKnownPrincipals::new();

        let admins = resolver.resolve("S-1-5-32-544").unwrap();
        assert_eq!(admins.name, "BUILTIN\\Administrators");

        let unknown = resolver.resolve("S-1-5-21-1-2-3-1001").unwrap();
        assert_eq!(unknown.name, "S-1-5-21-1-2-3-1001");
    }

    #[test]
    fn test_unknown_principal() {
        let resolver = WellKnownPrincipals::new();
        assert_eq!(
            resolver.resolve("nobody-here").unwrap_err().kind(),
            ErrorKind::UnknownPrincipal
        );
        assert_eq!(
            resolver.resolve("").unwrap_err().kind(),
            ErrorKind::UnknownPrincipal
        );
    }

    #[test]
    fn test_registered_account() {
        let sid = Sid::parse("S-1-5-21-100-200-300-1001").unwrap();
        let resolver = WellKnownPrincipals::new().with_account("HOST\\alice", sid.clone());

        assert_eq!(resolver.lookup_account("alice"), Some(sid.clone()));
        assert_eq!(resolver.resolve("HOST\\Alice").unwrap().name, "HOST\\alice");
        assert_eq!(resolver.lookup_sid(&sid).as_deref(), Some("HOST\\alice"));
    }
}
