use crate::rule::{SecurityPrincipal, Sid};

// Helper function to create a principal from a name and a SID string
pub fn principal(name: &str, sid: &str) -> SecurityPrincipal {
    SecurityPrincipal::new(name, Sid::parse(sid).unwrap())
}

// BUILTIN\Users, as resolved by WellKnownPrincipals
pub fn users() -> SecurityPrincipal {
    principal("BUILTIN\\Users", "S-1-5-32-545")
}

// BUILTIN\Administrators, as resolved by WellKnownPrincipals
pub fn administrators() -> SecurityPrincipal {
    principal("BUILTIN\\Administrators", "S-1-5-32-544")
}
