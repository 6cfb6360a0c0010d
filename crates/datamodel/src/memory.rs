use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tessera_common::{NamespaceConfig, NamespaceName, Permission};
use tracing::debug;

use crate::error::{DataError, DataResult};
use crate::namespace::{Namespace, NamespaceStore};

/// Stored state of one namespace
#[derive(Debug, Clone, Default)]
struct NamespaceRecord {
    grants: HashMap<String, HashSet<Permission>>,
    children: BTreeSet<NamespaceName>,
}

type Records = Arc<DashMap<NamespaceName, NamespaceRecord>>;

/// In-memory namespace store
///
/// Creation goes through the map's entry API, so creating a name that
/// already exists always fails with `NamespaceAlreadyExists` even when two
/// sessions race for it.
#[derive(Debug, Clone, Default)]
pub struct MemoryNamespaceStore {
    records: Records,
}

impl MemoryNamespaceStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from configured namespaces, parents first
    pub fn from_config(namespaces: &[NamespaceConfig]) -> DataResult<Self> {
        let store = Self::new();

        for namespace in namespaces {
            let grants = namespace
                .grants
                .iter()
                .flat_map(|(role, permissions)| {
                    permissions.iter().map(move |p| (role.clone(), *p))
                });
            store.insert(&namespace.name, grants)?;
        }

        debug!(count = namespaces.len(), "Seeded namespace store");
        Ok(store)
    }

    /// Builder-style seeding; see [`MemoryNamespaceStore::insert`]
    pub fn with_namespace(self, name: &str, grants: &[(&str, Permission)]) -> DataResult<Self> {
        let name: NamespaceName = name
            .parse()
            .map_err(|e| DataError::Store(format!("invalid namespace '{}': {}", name, e)))?;
        self.insert(&name, grants.iter().map(|(r, p)| (r.to_string(), *p)))?;
        Ok(self)
    }

    /// Create a namespace (root or child of an existing parent) and grant
    /// the given role permissions on it
    pub fn insert<I>(&self, name: &NamespaceName, grants: I) -> DataResult<MemoryNamespace>
    where
        I: IntoIterator<Item = (String, Permission)>,
    {
        let namespace = match name.parent() {
            None => self.create(name)?,
            Some(parent) => self.get(&parent)?.create_child(name)?,
        };

        for (role, permission) in grants {
            self.grant(name, &role, permission)?;
        }

        Ok(namespace)
    }

    /// Grant `permission` to `role` on an existing namespace
    pub fn grant(&self, name: &NamespaceName, role: &str, permission: Permission) -> DataResult<()> {
        let mut record = self
            .records
            .get_mut(name)
            .ok_or_else(|| DataError::NamespaceDoesNotExist(name.clone()))?;

        record
            .grants
            .entry(role.to_string())
            .or_default()
            .insert(permission);

        Ok(())
    }

    /// Number of namespaces held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove `name` and everything below it, returning how many records went
    fn remove_subtree(&self, name: &NamespaceName) -> usize {
        match self.records.remove(name) {
            Some((_, record)) => {
                1 + record
                    .children
                    .iter()
                    .map(|child| self.remove_subtree(child))
                    .sum::<usize>()
            }
            None => 0,
        }
    }

    fn handle(&self, name: &NamespaceName) -> MemoryNamespace {
        MemoryNamespace {
            name: name.clone(),
            records: Arc::clone(&self.records),
        }
    }
}

impl NamespaceStore for MemoryNamespaceStore {
    type Namespace = MemoryNamespace;

    fn get(&self, name: &NamespaceName) -> DataResult<MemoryNamespace> {
        if self.records.contains_key(name) {
            Ok(self.handle(name))
        } else {
            Err(DataError::NamespaceDoesNotExist(name.clone()))
        }
    }

    fn create(&self, name: &NamespaceName) -> DataResult<MemoryNamespace> {
        if !name.is_root() {
            return Err(DataError::NotARoot(name.clone()));
        }

        match self.records.entry(name.clone()) {
            Entry::Occupied(_) => return Err(DataError::NamespaceAlreadyExists(name.clone())),
            Entry::Vacant(entry) => {
                entry.insert(NamespaceRecord::default());
            }
        }

        debug!(namespace = %name, "Created root namespace");
        Ok(self.handle(name))
    }

    fn list(&self) -> DataResult<Vec<NamespaceName>> {
        let mut names: Vec<NamespaceName> =
            self.records.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        Ok(names)
    }

    fn remove(&self, name: &NamespaceName, cascade: bool) -> DataResult<()> {
        // the child check and the removal happen under the same entry guard,
        // so a concurrent create_child either registers first or is rolled back
        let record = match self.records.entry(name.clone()) {
            Entry::Vacant(_) => return Err(DataError::NamespaceDoesNotExist(name.clone())),
            Entry::Occupied(entry) => {
                if !cascade && !entry.get().children.is_empty() {
                    return Err(DataError::NamespaceHasChildren(name.clone()));
                }
                entry.remove()
            }
        };

        let removed: usize = record
            .children
            .iter()
            .map(|child| self.remove_subtree(child))
            .sum();

        if let Some(parent) = name.parent() {
            if let Some(mut record) = self.records.get_mut(&parent) {
                record.children.remove(name);
            }
        }

        debug!(namespace = %name, removed_descendants = removed, "Removed namespace");
        Ok(())
    }
}

/// Handle to a namespace held by a [`MemoryNamespaceStore`]
///
/// Reads go to the shared store, so a handle sees grants and children added
/// after it was obtained.
#[derive(Debug, Clone)]
pub struct MemoryNamespace {
    name: NamespaceName,
    records: Records,
}

impl Namespace for MemoryNamespace {
    fn name(&self) -> &NamespaceName {
        &self.name
    }

    fn has_permission(&self, role: &str, permission: Permission) -> bool {
        self.records
            .get(&self.name)
            .and_then(|record| record.grants.get(role).map(|p| p.contains(&permission)))
            .unwrap_or(false)
    }

    fn children(&self) -> Vec<NamespaceName> {
        self.records
            .get(&self.name)
            .map(|record| record.children.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn create_child(&self, child: &NamespaceName) -> DataResult<MemoryNamespace> {
        if !self.name.is_parent_of(child) {
            return Err(DataError::NotAChild {
                parent: self.name.clone(),
                child: child.clone(),
            });
        }
        if !self.records.contains_key(&self.name) {
            return Err(DataError::NamespaceDoesNotExist(self.name.clone()));
        }

        match self.records.entry(child.clone()) {
            Entry::Occupied(_) => return Err(DataError::NamespaceAlreadyExists(child.clone())),
            Entry::Vacant(entry) => {
                entry.insert(NamespaceRecord::default());
            }
        }

        match self.records.get_mut(&self.name) {
            Some(mut parent) => {
                parent.children.insert(child.clone());
            }
            None => {
                // parent was removed while the child was being added
                self.records.remove(child);
                return Err(DataError::NamespaceDoesNotExist(self.name.clone()));
            }
        }

        debug!(parent = %self.name, namespace = %child, "Created child namespace");
        Ok(MemoryNamespace {
            name: child.clone(),
            records: Arc::clone(&self.records),
        })
    }
}
