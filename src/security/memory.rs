//! In-memory descriptor store.
//!
//! [`MemoryBackend`] keeps an owner and a rule list per object and serves both the
//! [`SecurityBackend`] and the [`ObjectProbe`] seams. It is what dry runs and tests plug into the
//! facade in place of the host security subsystem. Clones share the same store.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use log::debug;

use crate::{
    path::Hive,
    rule::{AccessControlEntry, RuleMatch, SecurityPrincipal},
    security::{ObjectKind, ObjectProbe, SecurityBackend, SecurityObject},
    Error, Result,
};

#[derive(Clone, Debug)]
struct Descriptor {
    owner: SecurityPrincipal,
    rules: Vec<AccessControlEntry>,
    read_only: bool,
}

/// Thread-safe in-memory [`SecurityBackend`].
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    objects: Arc<RwLock<HashMap<SecurityObject, Descriptor>>>,
}

impl MemoryBackend {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `object` with `owner` and no rules, replacing any previous descriptor.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the store lock is poisoned.
    pub fn insert(&self, object: SecurityObject, owner: SecurityPrincipal) -> Result<()> {
        let mut objects = write_lock!(self.objects);
        objects.insert(
            object,
            Descriptor {
                owner,
                rules: Vec::new(),
                read_only: false,
            },
        );
        Ok(())
    }

    /// Register a file.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the store lock is poisoned.
    pub fn insert_file(&self, path: impl Into<PathBuf>, owner: SecurityPrincipal) -> Result<()> {
        self.insert(SecurityObject::File(path.into()), owner)
    }

    /// Register a directory.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the store lock is poisoned.
    pub fn insert_directory(
        &self,
        path: impl Into<PathBuf>,
        owner: SecurityPrincipal,
    ) -> Result<()> {
        self.insert(SecurityObject::Directory(path.into()), owner)
    }

    /// Register a registry key.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the store lock is poisoned.
    pub fn insert_registry_key(
        &self,
        hive: Hive,
        subkey: &str,
        owner: SecurityPrincipal,
    ) -> Result<()> {
        self.insert(SecurityObject::registry_key(hive, subkey), owner)
    }

    /// Append `rule` as-is, inherited flag included. Used to seed inherited entries.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if `object` was never registered.
    pub fn push_rule(&self, object: &SecurityObject, rule: AccessControlEntry) -> Result<()> {
        let mut objects = write_lock!(self.objects);
        let descriptor = objects
            .get_mut(object)
            .ok_or_else(|| Error::NotFound(object.to_string()))?;
        descriptor.rules.push(rule);
        Ok(())
    }

    /// Make every write to `object` fail with [`Error::AccessDenied`].
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if `object` was never registered.
    pub fn set_read_only(&self, object: &SecurityObject, read_only: bool) -> Result<()> {
        let mut objects = write_lock!(self.objects);
        let descriptor = objects
            .get_mut(object)
            .ok_or_else(|| Error::NotFound(object.to_string()))?;
        descriptor.read_only = read_only;
        Ok(())
    }

    fn read<T>(&self, object: &SecurityObject, f: impl FnOnce(&Descriptor) -> T) -> Result<T> {
        let objects = read_lock!(self.objects);
        objects
            .get(object)
            .map(f)
            .ok_or_else(|| Error::NotFound(object.to_string()))
    }

    fn write<T>(
        &self,
        object: &SecurityObject,
        f: impl FnOnce(&mut Descriptor) -> T,
    ) -> Result<T> {
        let mut objects = write_lock!(self.objects);
        let descriptor = objects
            .get_mut(object)
            .ok_or_else(|| Error::NotFound(object.to_string()))?;
        if descriptor.read_only {
            return Err(Error::AccessDenied(format!(
                "descriptor of {} is read-only",
                object
            )));
        }
        Ok(f(descriptor))
    }
}

impl SecurityBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn owner(&self, object: &SecurityObject) -> Result<SecurityPrincipal> {
        self.read(object, |descriptor| descriptor.owner.clone())
    }

    fn set_owner(&self, object: &SecurityObject, owner: &SecurityPrincipal) -> Result<()> {
        self.write(object, |descriptor| descriptor.owner = owner.clone())
    }

    fn access_rules(&self, object: &SecurityObject) -> Result<Vec<AccessControlEntry>> {
        self.read(object, |descriptor| descriptor.rules.clone())
    }

    fn add_access_rule(&self, object: &SecurityObject, rule: &AccessControlEntry) -> Result<()> {
        self.write(object, |descriptor| descriptor.rules.push(rule.clone()))
    }

    fn remove_access_rule(&self, object: &SecurityObject, key: &RuleMatch) -> Result<bool> {
        self.write(object, |descriptor| {
            match descriptor.rules.iter().position(|rule| key.matches(rule)) {
                Some(index) => {
                    descriptor.rules.remove(index);
                    debug!("Removed rule #{} from {}", index, object);
                    true
                }
                None => false,
            }
        })
    }
}

impl ObjectProbe for MemoryBackend {
    fn probe(&self, path: &Path) -> Result<Option<ObjectKind>> {
        let objects = read_lock!(self.objects);
        let path = path.to_path_buf();

        if objects.contains_key(&SecurityObject::Directory(path.clone())) {
            Ok(Some(ObjectKind::Directory))
        } else if objects.contains_key(&SecurityObject::File(path)) {
            Ok(Some(ObjectKind::File))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rights::AccessMask,
        rule::{InheritanceFlags, PropagationFlags, RuleType},
        test::{administrators, users},
        ErrorKind,
    };

    fn rule(mask: u32) -> AccessControlEntry {
        AccessControlEntry::new(
            RuleType::Allow,
            users(),
            AccessMask::new(mask),
            InheritanceFlags::empty(),
            PropagationFlags::empty(),
        )
    }

    #[test]
    fn test_owner_roundtrip() {
        let backend = MemoryBackend::new();
        let object = SecurityObject::File(PathBuf::from("C:\\a.txt"));
        backend.insert(object.clone(), administrators()).unwrap();

        assert_eq!(backend.owner(&object).unwrap(), administrators());
        backend.set_owner(&object, &users()).unwrap();
        assert_eq!(backend.owner(&object).unwrap(), users());
    }

    #[test]
    fn test_remove_first_match_only() {
        let backend = MemoryBackend::new();
        let object = SecurityObject::registry_key(Hive::LocalMachine, "Software");
        backend.insert(object.clone(), administrators()).unwrap();
        backend.add_access_rule(&object, &rule(0x1)).unwrap();
        backend.add_access_rule(&object, &rule(0x1)).unwrap();

        let key = RuleMatch::from(&rule(0x1));
        assert!(backend.remove_access_rule(&object, &key).unwrap());
        assert_eq!(backend.access_rules(&object).unwrap().len(), 1);
        assert!(backend.remove_access_rule(&object, &key).unwrap());
        assert!(!backend.remove_access_rule(&object, &key).unwrap());
    }

    #[test]
    fn test_unknown_object() {
        let backend = MemoryBackend::new();
        let object = SecurityObject::Directory(PathBuf::from("/nowhere"));
        assert_eq!(
            backend.owner(&object).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            backend.access_rules(&object).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let backend = MemoryBackend::new();
        let object = SecurityObject::Directory(PathBuf::from("/locked"));
        backend.insert(object.clone(), administrators()).unwrap();
        backend.push_rule(&object, rule(0x2).into_inherited()).unwrap();
        backend.set_read_only(&object, true).unwrap();

        let err = backend.add_access_rule(&object, &rule(0x1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        let err = backend.set_owner(&object, &users()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);

        // Reads still work
        assert_eq!(backend.access_rules(&object).unwrap().len(), 1);
    }

    #[test]
    fn test_probe_and_shared_clones() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        clone.insert_directory("/data", administrators()).unwrap();
        clone.insert_file("/data/a.txt", administrators()).unwrap();

        assert_eq!(
            backend.probe(Path::new("/data")).unwrap(),
            Some(ObjectKind::Directory)
        );
        assert_eq!(
            backend.probe(Path::new("/data/a.txt")).unwrap(),
            Some(ObjectKind::File)
        );
        assert_eq!(backend.probe(Path::new("/data/b.txt")).unwrap(), None);
    }
}
