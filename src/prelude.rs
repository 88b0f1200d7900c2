//! # aclscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the aclscope library. Import this module to get quick access to the essential
//! types for decoding access masks and managing access rules.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all aclscope operations
pub use crate::{Error, ErrorKind};

/// The result type used throughout aclscope
pub use crate::Result;

/// Facade configuration and elevation presets
pub use crate::config::{ElevationPolicy, FacadeConfig};

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Owner and rule operations over filesystem and registry objects
pub use crate::security::SecurityFacade;

/// Path classification
pub use crate::path::{resolve, Hive, SecurityObjectPath};

// ================================================================================================
// Access Rights
// ================================================================================================

/// Mask decoding and classification
pub use crate::rights::{
    decode, named_rights, AccessMask, DecodedRights, FileSystemRights, NamedRight, PermissionSet,
};

// ================================================================================================
// Rules and Principals
// ================================================================================================

/// Access control entries and their flags
pub use crate::rule::{
    AccessControlEntry, InheritanceFlags, PropagationFlags, RuleMatch, RuleSummary, RuleType,
};

/// Rule construction
pub use crate::rule::{encode, RuleEncoder};

/// Principal resolution
pub use crate::rule::{PrincipalResolver, SecurityPrincipal, Sid, WellKnownPrincipals};

// ================================================================================================
// Backends
// ================================================================================================

/// Descriptor access and object classification
pub use crate::security::{
    HostProbe, MemoryBackend, ObjectKind, ObjectProbe, SecurityBackend, SecurityObject,
};

/// Privilege elevation
pub use crate::security::{ElevatedSecurityAccess, Privilege, PrivilegeBackend, TokenHandle};
