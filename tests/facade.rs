//! Integration tests for the security facade.
//!
//! Filesystem objects are real temporary files and directories classified by the host probe,
//! while their descriptors live in an in-memory backend.

use std::path::Path;

use aclscope::{prelude::*, security::Privilege};

/// Backend that fails the n-th rule removal with AccessDenied.
struct FlakyRemoval {
    inner: MemoryBackend,
    fail_at: usize,
    removals: std::sync::atomic::AtomicUsize,
}

impl SecurityBackend for FlakyRemoval {
    fn name(&self) -> &str {
        "flaky"
    }

    fn owner(&self, object: &SecurityObject) -> Result<SecurityPrincipal> {
        self.inner.owner(object)
    }

    fn set_owner(&self, object: &SecurityObject, owner: &SecurityPrincipal) -> Result<()> {
        self.inner.set_owner(object, owner)
    }

    fn access_rules(&self, object: &SecurityObject) -> Result<Vec<AccessControlEntry>> {
        self.inner.access_rules(object)
    }

    fn add_access_rule(&self, object: &SecurityObject, rule: &AccessControlEntry) -> Result<()> {
        self.inner.add_access_rule(object, rule)
    }

    fn remove_access_rule(&self, object: &SecurityObject, key: &RuleMatch) -> Result<bool> {
        let attempt = self
            .removals
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if attempt == self.fail_at {
            return Err(Error::AccessDenied(format!("{} is locked", object)));
        }
        self.inner.remove_access_rule(object, key)
    }
}

/// Privilege backend that can not open the process token at all.
struct NoToken;

impl PrivilegeBackend for NoToken {
    fn open_process_token(&self, _access: u32) -> Result<TokenHandle> {
        Err(Error::PrivilegeAdjustFailure {
            privilege: "token".to_string(),
            message: "access denied".to_string(),
        })
    }

    fn enable_privilege(&self, _token: &TokenHandle, _privilege: Privilege) -> Result<()> {
        Ok(())
    }

    fn close_token(&self, _token: TokenHandle) {}
}

fn system() -> SecurityPrincipal {
    WellKnownPrincipals::new().resolve("SYSTEM").unwrap()
}

fn facade_over(store: &MemoryBackend) -> SecurityFacade {
    SecurityFacade::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(WellKnownPrincipals::new()),
    )
}

fn as_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn read_rights() -> [NamedRight; 4] {
    [
        NamedRight::ReadData,
        NamedRight::ReadAttributes,
        NamedRight::ReadExtendedAttributes,
        NamedRight::ReadPermissions,
    ]
}

#[test]
fn test_add_read_rule_then_list() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = MemoryBackend::new();
    store.insert_directory(dir.path(), system())?;
    let facade = facade_over(&store);

    facade.add_named_rule(
        as_str(dir.path()),
        "Users",
        read_rights(),
        RuleType::Allow,
        InheritanceFlags::CONTAINER_INHERIT | InheritanceFlags::OBJECT_INHERIT,
        PropagationFlags::empty(),
    )?;

    let rules = facade.list_rules(as_str(dir.path()))?;
    assert!(rules
        .iter()
        .any(|rule| rule.decode().permission_set() == PermissionSet::Read));

    let rows = facade.describe_rules(as_str(dir.path()))?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].principal, "BUILTIN\\Users");
    assert_eq!(rows[0].access, "Read");
    assert_eq!(rows[0].applies_to, "ContainerInherit, ObjectInherit");
    Ok(())
}

#[test]
fn test_file_is_not_a_container() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("settings.ini");
    std::fs::write(&file, "[x]")?;

    let store = MemoryBackend::new();
    store.insert_file(&file, system())?;
    let facade = facade_over(&store);

    assert_eq!(facade.locate(as_str(&file))?.kind(), ObjectKind::File);
    facade.add_named_rule(
        as_str(&file),
        "Everyone",
        [NamedRight::WriteData],
        RuleType::Deny,
        InheritanceFlags::empty(),
        PropagationFlags::empty(),
    )?;

    let rows = facade.describe_rules(as_str(&file))?;
    assert_eq!(rows[0].rule_type, "Deny");
    assert_eq!(rows[0].access, "Write");
    assert_eq!(rows[0].applies_to, "This file only");
    assert_eq!(rows[0].propagate, "-");
    Ok(())
}

#[test]
fn test_missing_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let facade = facade_over(&MemoryBackend::new());
    let missing = dir.path().join("gone");

    let err = facade.get_owner(as_str(&missing)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = facade.list_rules("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPath);
}

#[test]
fn test_registry_dispatch() -> Result<()> {
    let files = MemoryBackend::new();
    let registry = MemoryBackend::new();
    registry.insert_registry_key(Hive::CurrentUser, "Software\\Vendor", system())?;

    let facade = SecurityFacade::new(
        Box::new(files.clone()),
        Box::new(registry.clone()),
        Box::new(WellKnownPrincipals::new()),
    );

    assert_eq!(facade.get_owner("hkcu\\Software\\Vendor")?.name, "NT AUTHORITY\\SYSTEM");
    facade.set_owner("HKEY_CURRENT_USER/Software/Vendor", "Administrators")?;

    let object = SecurityObject::registry_key(Hive::CurrentUser, "Software\\Vendor");
    assert_eq!(registry.owner(&object)?.name, "BUILTIN\\Administrators");
    assert_eq!(files.owner(&object).unwrap_err().kind(), ErrorKind::NotFound);
    Ok(())
}

#[test]
fn test_registry_lookup_ignores_case_and_trailing_separator() -> Result<()> {
    let store = MemoryBackend::new();
    store.insert_registry_key(Hive::LocalMachine, "Software\\Vendor", system())?;
    let facade = facade_over(&store);

    assert_eq!(facade.get_owner("HKLM\\Software\\Vendor")?, system());
    assert_eq!(facade.get_owner("hklm\\software\\vendor")?, system());
    assert_eq!(facade.get_owner("HKLM\\Software\\Vendor\\")?, system());

    facade.set_owner("hkey_local_machine/SOFTWARE/VENDOR", "Administrators")?;
    facade.add_named_rule(
        "HKLM\\software\\Vendor",
        "Users",
        read_rights(),
        RuleType::Allow,
        InheritanceFlags::empty(),
        PropagationFlags::empty(),
    )?;

    assert_eq!(
        facade.get_owner("HKLM\\Software\\Vendor")?.name,
        "BUILTIN\\Administrators"
    );
    assert_eq!(facade.list_rules("HKLM\\SOFTWARE\\VENDOR")?.len(), 1);
    assert_eq!(
        facade.get_owner("HKLM\\Software\\Vendors").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    Ok(())
}

#[test]
fn test_remove_unknown_rule_leaves_descriptor() -> Result<()> {
    let store = MemoryBackend::new();
    store.insert_registry_key(Hive::LocalMachine, "Software", system())?;
    let facade = facade_over(&store);
    facade.add_named_rule(
        "HKLM\\Software",
        "Users",
        read_rights(),
        RuleType::Allow,
        InheritanceFlags::empty(),
        PropagationFlags::empty(),
    )?;
    let before = facade.list_rules("HKLM\\Software")?;

    let key = facade
        .encoder()
        .rule_match("Users", read_rights(), RuleType::Deny)?;
    match facade.remove_rule("HKLM\\Software", &key) {
        Err(Error::RuleNotFound {
            principal,
            mask,
            rule_type,
        }) => {
            assert_eq!(principal, "BUILTIN\\Users");
            assert_eq!(mask.to_string(), "00020089");
            assert_eq!(rule_type, RuleType::Deny);
        }
        other => panic!("expected RuleNotFound, got {:?}", other),
    }

    assert_eq!(facade.list_rules("HKLM\\Software")?, before);
    Ok(())
}

#[test]
fn test_partial_clear_is_not_rolled_back() -> Result<()> {
    let store = MemoryBackend::new();
    store.insert_registry_key(Hive::LocalMachine, "Software\\Shared", system())?;
    let flaky = FlakyRemoval {
        inner: store.clone(),
        fail_at: 1,
        removals: Default::default(),
    };
    let facade = SecurityFacade::new(
        Box::new(store.clone()),
        Box::new(flaky),
        Box::new(WellKnownPrincipals::new()),
    );

    for principal in ["Users", "Guests", "Everyone"] {
        facade.add_named_rule(
            "HKLM\\Software\\Shared",
            principal,
            [NamedRight::ReadData],
            RuleType::Allow,
            InheritanceFlags::empty(),
            PropagationFlags::empty(),
        )?;
    }

    let err = facade.clear_rules("HKLM\\Software\\Shared").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);

    // The first removal went through, the rest stayed
    let remaining = facade.list_rules("HKLM\\Software\\Shared")?;
    assert_eq!(remaining.len(), 2);
    assert_eq!(remaining[0].principal().name, "BUILTIN\\Guests");
    Ok(())
}

#[test]
fn test_unknown_principal() -> Result<()> {
    let store = MemoryBackend::new();
    store.insert_registry_key(Hive::Users, ".DEFAULT", system())?;
    let facade = facade_over(&store);

    let err = facade
        .add_named_rule(
            "HKU\\.DEFAULT",
            "CONTOSO\\nobody",
            [NamedRight::ReadData],
            RuleType::Allow,
            InheritanceFlags::empty(),
            PropagationFlags::empty(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownPrincipal);
    assert!(facade.list_rules("HKU\\.DEFAULT")?.is_empty());
    Ok(())
}

#[test]
fn test_strict_elevation_without_token() -> Result<()> {
    let store = MemoryBackend::new();
    store.insert_registry_key(Hive::ClassesRoot, ".txt", system())?;

    let strict = facade_over(&store)
        .with_config(FacadeConfig::strict())
        .with_privileges(Box::new(NoToken));
    let err = strict.set_owner("HKCR\\.txt", "Users").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PrivilegeAdjustFailure);
    assert_eq!(strict.get_owner("HKCR\\.txt")?, system());

    let lenient = facade_over(&store).with_privileges(Box::new(NoToken));
    lenient.set_owner("HKCR\\.txt", "Users")?;
    assert_eq!(lenient.get_owner("HKCR\\.txt")?.name, "BUILTIN\\Users");
    Ok(())
}
