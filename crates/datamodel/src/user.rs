//! User accounts and their namespace-scoped roles

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use dashmap::DashMap;
use tessera_common::{NamespaceName, UserConfig};

use crate::error::{DataError, DataResult};

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    admin: bool,
    /// Roles held by the user, keyed by namespace
    roles: BTreeMap<NamespaceName, BTreeSet<String>>,
}

impl User {
    /// Create a regular user without any roles
    pub fn new<S: Into<String>>(username: S) -> Self {
        Self {
            username: username.into(),
            admin: false,
            roles: BTreeMap::new(),
        }
    }

    /// Create an admin user
    pub fn admin<S: Into<String>>(username: S) -> Self {
        Self {
            admin: true,
            ..Self::new(username)
        }
    }

    /// Grant the user `role` in `namespace`
    pub fn with_role<S: Into<String>>(mut self, namespace: NamespaceName, role: S) -> Self {
        self.roles.entry(namespace).or_default().insert(role.into());
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Namespaces in which the user holds at least one role, sorted
    pub fn namespaces(&self) -> Vec<NamespaceName> {
        self.roles
            .iter()
            .filter(|(_, roles)| !roles.is_empty())
            .map(|(namespace, _)| namespace.clone())
            .collect()
    }

    /// Roles held in exactly `namespace`, sorted
    pub fn roles(&self, namespace: &NamespaceName) -> Vec<String> {
        self.roles
            .get(namespace)
            .map(|roles| roles.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl From<&UserConfig> for User {
    fn from(config: &UserConfig) -> Self {
        let roles = config
            .roles
            .iter()
            .map(|(namespace, roles)| (namespace.clone(), roles.iter().cloned().collect()))
            .collect();

        Self {
            username: config.username.clone(),
            admin: config.admin,
            roles,
        }
    }
}

/// Lookup of user accounts, used when a connection authenticates
pub trait UserStore: Send + Sync {
    /// Fetch a user, `UserDoesNotExist` if unknown
    fn get(&self, username: &str) -> DataResult<Arc<User>>;
}

/// In-memory user store
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<String, Arc<User>>>,
}

impl MemoryUserStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from configured users
    pub fn from_config(users: &[UserConfig]) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(User::from(user));
        }
        store
    }

    /// Add or replace a user
    pub fn insert(&self, user: User) {
        self.users.insert(user.username().to_string(), Arc::new(user));
    }
}

impl UserStore for MemoryUserStore {
    fn get(&self, username: &str) -> DataResult<Arc<User>> {
        self.users
            .get(username)
            .map(|user| Arc::clone(user.value()))
            .ok_or_else(|| DataError::UserDoesNotExist(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> NamespaceName {
        s.parse().unwrap()
    }

    #[test]
    fn test_roles_and_namespaces() {
        let user = User::new("wile")
            .with_role(name("acme.example"), "builder")
            .with_role(name("acme"), "viewer")
            .with_role(name("acme"), "builder");

        assert_eq!(user.username(), "wile");
        assert!(!user.is_admin());
        assert_eq!(user.namespaces(), vec![name("acme"), name("acme.example")]);
        assert_eq!(user.roles(&name("acme")), vec!["builder", "viewer"]);
        assert!(user.roles(&name("globex")).is_empty());
    }

    #[test]
    fn test_admin() {
        let admin = User::admin("root");
        assert!(admin.is_admin());
        assert!(admin.namespaces().is_empty());
    }

    #[test]
    fn test_user_store() {
        let config = UserConfig {
            username: "wile".to_string(),
            admin: false,
            roles: BTreeMap::from([(name("acme"), vec!["builder".to_string()])]),
        };
        let store = MemoryUserStore::from_config(&[config]);

        let user = store.get("wile").unwrap();
        assert_eq!(user.roles(&name("acme")), vec!["builder"]);
        assert_eq!(
            store.get("coyote").unwrap_err(),
            DataError::UserDoesNotExist("coyote".to_string())
        );
    }
}
