//! Facade configuration
//!
//! This module provides the options controlling how the security facade acquires elevated
//! privileges before it mutates a security descriptor.

/// How the facade obtains elevated security access for mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElevationPolicy {
    /// Fail the mutation with [`crate::Error::PrivilegeAdjustFailure`] unless the process token
    /// can be opened and every privilege enabled
    Required,
    /// Elevate when a privilege backend is configured; privileges that can not be enabled are
    /// logged and skipped
    #[default]
    BestEffort,
    /// Never touch the process token
    Disabled,
}

/// Configuration for the security facade
///
/// Reads (owner and rule listing) never elevate, only mutations do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FacadeConfig {
    /// Elevation behavior for `set_owner`, `add_rule`, `remove_rule` and `clear_rules`
    pub elevation: ElevationPolicy,
}

impl FacadeConfig {
    /// Creates a configuration that refuses to mutate without full elevation
    ///
    /// Use when a silently unprivileged write would be worse than a failed one, e.g. when
    /// taking ownership of objects the caller has no rights on.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            elevation: ElevationPolicy::Required,
        }
    }

    /// Creates a configuration that never elevates
    ///
    /// Mutations run with whatever rights the caller already holds.
    #[must_use]
    pub fn unprivileged() -> Self {
        Self {
            elevation: ElevationPolicy::Disabled,
        }
    }

    /// Sets the elevation policy
    #[must_use]
    pub fn with_elevation(mut self, elevation: ElevationPolicy) -> Self {
        self.elevation = elevation;
        self
    }
}
