use log::{debug, info, warn};

use crate::{
    config::{ElevationPolicy, FacadeConfig},
    path::{resolve, SecurityObjectPath},
    rights::NamedRight,
    rule::{
        AccessControlEntry, InheritanceFlags, PrincipalResolver, PropagationFlags, RuleEncoder,
        RuleMatch, RuleSummary, RuleType, SecurityPrincipal,
    },
    security::{
        ElevatedSecurityAccess, HostProbe, ObjectKind, ObjectProbe, PrivilegeBackend,
        SecurityBackend, SecurityObject,
    },
    Error, Result,
};

/// Uniform owner and rule operations over filesystem and registry objects.
///
/// Every operation takes a raw path, resolves it, and dispatches to the backend of its
/// namespace. Filesystem paths are further classified as file or directory through the
/// configured [`ObjectProbe`]; a path that is neither fails with [`Error::NotFound`].
///
/// # Concurrency
///
/// The facade holds no locks of its own. Each backend call is an independent read-modify-write
/// of the object's descriptor, so concurrent writers to the same object race and the last
/// write wins. Callers needing more must serialize access themselves.
///
/// # Examples
///
/// ```rust
/// use aclscope::prelude::*;
///
/// let store = MemoryBackend::new();
/// let principals = WellKnownPrincipals::new();
/// store.insert_registry_key(Hive::CurrentUser, "Software\\Vendor", principals.resolve("SYSTEM")?)?;
///
/// let facade = SecurityFacade::new(
///     Box::new(store.clone()),
///     Box::new(store),
///     Box::new(principals),
/// );
/// let rule = facade.encoder().build_rule(
///     "Users",
///     [NamedRight::ReadData],
///     RuleType::Allow,
///     InheritanceFlags::empty(),
///     PropagationFlags::empty(),
/// )?;
/// facade.add_rule("HKCU\\Software\\Vendor", &rule)?;
/// assert_eq!(facade.list_rules("HKCU\\Software\\Vendor")?.len(), 1);
/// # Ok::<(), aclscope::Error>(())
/// ```
pub struct SecurityFacade {
    filesystem: Box<dyn SecurityBackend>,
    registry: Box<dyn SecurityBackend>,
    probe: Box<dyn ObjectProbe>,
    principals: Box<dyn PrincipalResolver>,
    privileges: Option<Box<dyn PrivilegeBackend>>,
    config: FacadeConfig,
}

impl SecurityFacade {
    /// Creates a facade probing the host filesystem, with no privilege backend and the
    /// default configuration.
    #[must_use]
    pub fn new(
        filesystem: Box<dyn SecurityBackend>,
        registry: Box<dyn SecurityBackend>,
        principals: Box<dyn PrincipalResolver>,
    ) -> Self {
        SecurityFacade {
            filesystem,
            registry,
            probe: Box::new(HostProbe),
            principals,
            privileges: None,
            config: FacadeConfig::default(),
        }
    }

    /// Replace the file/directory probe
    #[must_use]
    pub fn with_probe(mut self, probe: Box<dyn ObjectProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Elevate through `privileges` before mutating
    #[must_use]
    pub fn with_privileges(mut self, privileges: Box<dyn PrivilegeBackend>) -> Self {
        self.privileges = Some(privileges);
        self
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: FacadeConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }

    /// A rule encoder sharing this facade's principal resolver
    #[must_use]
    pub fn encoder(&self) -> RuleEncoder<'_> {
        RuleEncoder::new(self.principals.as_ref())
    }

    /// Resolve `path` and determine which object it addresses.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`] for empty input and [`Error::NotFound`] for filesystem
    /// paths that are neither a file nor a directory.
    pub fn locate(&self, path: &str) -> Result<SecurityObject> {
        let object = match resolve(path)? {
            SecurityObjectPath::RegistryHive { hive, subpath } => {
                SecurityObject::registry_key(hive, &subpath)
            }
            SecurityObjectPath::Filesystem(fs_path) => match self.probe.probe(&fs_path)? {
                Some(ObjectKind::Directory) => SecurityObject::Directory(fs_path),
                Some(ObjectKind::File) => SecurityObject::File(fs_path),
                Some(ObjectKind::RegistryKey) | None => {
                    return Err(Error::NotFound(fs_path.display().to_string()))
                }
            },
        };

        debug!("Located {} '{}'", object.kind(), object);
        Ok(object)
    }

    fn backend(&self, object: &SecurityObject) -> &dyn SecurityBackend {
        match object {
            SecurityObject::RegistryKey { .. } => self.registry.as_ref(),
            SecurityObject::File(_) | SecurityObject::Directory(_) => self.filesystem.as_ref(),
        }
    }

    fn elevate(&self) -> Result<Option<ElevatedSecurityAccess<'_>>> {
        match (self.config.elevation, self.privileges.as_deref()) {
            (ElevationPolicy::Disabled, _) => Ok(None),
            (policy, Some(privileges)) => ElevatedSecurityAccess::acquire(privileges, policy).map(Some),
            (ElevationPolicy::Required, None) => Err(Error::PrivilegeAdjustFailure {
                privilege: "token".to_string(),
                message: "no privilege backend configured".to_string(),
            }),
            (ElevationPolicy::BestEffort, None) => Ok(None),
        }
    }

    /// The owner of the object at `path`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`], [`Error::NotFound`] or [`Error::AccessDenied`].
    pub fn get_owner(&self, path: &str) -> Result<SecurityPrincipal> {
        let object = self.locate(path)?;
        self.backend(&object).owner(&object)
    }

    /// Make the account `owner` the owner of the object at `path`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownPrincipal`] if `owner` does not resolve, otherwise the errors of
    /// [`SecurityFacade::get_owner`] or [`Error::PrivilegeAdjustFailure`] under a strict
    /// elevation policy.
    pub fn set_owner(&self, path: &str, owner: &str) -> Result<()> {
        let object = self.locate(path)?;
        let owner = self.principals.resolve(owner)?;
        let _elevation = self.elevate()?;

        self.backend(&object).set_owner(&object, &owner)?;
        info!("Set owner of '{}' to {}", object, owner);
        Ok(())
    }

    /// Every rule on the object at `path`, explicit and inherited.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`], [`Error::NotFound`] or [`Error::AccessDenied`].
    pub fn list_rules(&self, path: &str) -> Result<Vec<AccessControlEntry>> {
        let object = self.locate(path)?;
        self.backend(&object).access_rules(&object)
    }

    /// Display rows for every rule on the object at `path`.
    ///
    /// # Errors
    /// Same as [`SecurityFacade::list_rules`].
    pub fn describe_rules(&self, path: &str) -> Result<Vec<RuleSummary>> {
        let object = self.locate(path)?;
        let kind = object.kind();
        let rules = self.backend(&object).access_rules(&object)?;

        Ok(rules
            .iter()
            .map(|rule| RuleSummary::new(rule, kind))
            .collect())
    }

    /// Add `rule` to the object at `path`. The stored rule is always explicit.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPath`], [`Error::NotFound`], [`Error::AccessDenied`] or
    /// [`Error::PrivilegeAdjustFailure`] under a strict elevation policy.
    pub fn add_rule(&self, path: &str, rule: &AccessControlEntry) -> Result<()> {
        let object = self.locate(path)?;
        let rule = rule.to_explicit();
        let _elevation = self.elevate()?;

        self.backend(&object).add_access_rule(&object, &rule)?;
        info!(
            "Added {} rule for {} ({}) to '{}'",
            rule.rule_type(),
            rule.principal(),
            rule.mask(),
            object
        );
        Ok(())
    }

    /// Build a rule from an account name and named rights, then add it.
    ///
    /// # Errors
    /// Returns [`Error::UnknownPrincipal`] if `principal` does not resolve, otherwise the errors
    /// of [`SecurityFacade::add_rule`].
    pub fn add_named_rule<I>(
        &self,
        path: &str,
        principal: &str,
        rights: I,
        rule_type: RuleType,
        inheritance: InheritanceFlags,
        propagation: PropagationFlags,
    ) -> Result<()>
    where
        I: IntoIterator<Item = NamedRight>,
    {
        let rule = self
            .encoder()
            .build_rule(principal, rights, rule_type, inheritance, propagation)?;
        self.add_rule(path, &rule)
    }

    /// Remove the first rule on the object at `path` selected by `key`.
    ///
    /// # Errors
    /// Returns [`Error::RuleNotFound`] if no rule matches, in which case the descriptor is left
    /// untouched, otherwise the errors of [`SecurityFacade::add_rule`].
    pub fn remove_rule(&self, path: &str, key: &RuleMatch) -> Result<()> {
        let object = self.locate(path)?;
        let _elevation = self.elevate()?;

        if !self.backend(&object).remove_access_rule(&object, key)? {
            return Err(Error::RuleNotFound {
                principal: key.principal.name.clone(),
                mask: key.mask,
                rule_type: key.rule_type,
            });
        }

        info!(
            "Removed {} rule for {} ({}) from '{}'",
            key.rule_type, key.principal, key.mask, object
        );
        Ok(())
    }

    /// Remove every rule currently listed on the object at `path`, one at a time. Returns the
    /// number of rules removed.
    ///
    /// Not atomic: if a removal fails, the rules removed before it stay removed and the
    /// failure is returned. Callers must re-read the rules to learn the resulting state.
    ///
    /// # Errors
    /// Returns the first failing removal, or the errors of [`SecurityFacade::list_rules`].
    pub fn clear_rules(&self, path: &str) -> Result<usize> {
        let object = self.locate(path)?;
        let backend = self.backend(&object);
        let rules = backend.access_rules(&object)?;
        let _elevation = self.elevate()?;

        for (removed, rule) in rules.iter().enumerate() {
            let key = RuleMatch::from(rule);
            let outcome = match backend.remove_access_rule(&object, &key) {
                Ok(true) => Ok(()),
                Ok(false) => Err(Error::RuleNotFound {
                    principal: key.principal.name.clone(),
                    mask: key.mask,
                    rule_type: key.rule_type,
                }),
                Err(err) => Err(err),
            };

            if let Err(err) = outcome {
                warn!(
                    "Cleared {}/{} rules of '{}' before failing: {}",
                    removed,
                    rules.len(),
                    object,
                    err
                );
                return Err(err);
            }
        }

        info!("Cleared {} rules of '{}' via {}", rules.len(), object, backend.name());
        Ok(rules.len())
    }
}
