//! Namespace hierarchy interfaces
//!
//! A namespace is identified by its fully qualified name. The parent of a
//! namespace is never stored, it is derived from the name. Roles are granted
//! permissions per namespace.

use crate::error::DataResult;
use tessera_common::{NamespaceName, Permission};

/// A namespace handle returned by a [`NamespaceStore`]
pub trait Namespace: Send + Sync {
    /// Fully qualified name
    fn name(&self) -> &NamespaceName;

    /// True if `role` has been granted `permission` on this namespace
    fn has_permission(&self, role: &str, permission: Permission) -> bool;

    /// Names of the direct children, sorted
    fn children(&self) -> Vec<NamespaceName>;

    /// Create and persist a direct child of this namespace.
    ///
    /// Fails with `NamespaceAlreadyExists` without touching the store when
    /// the child is already present.
    fn create_child(&self, child: &NamespaceName) -> DataResult<Self>
    where
        Self: Sized;
}

/// Shared storage of all namespaces
///
/// Implementations are used by many sessions at once and must tolerate
/// concurrent calls.
pub trait NamespaceStore: Send + Sync {
    type Namespace: Namespace;

    /// Look up a namespace, `NamespaceDoesNotExist` if absent
    fn get(&self, name: &NamespaceName) -> DataResult<Self::Namespace>;

    /// Create a root namespace.
    ///
    /// Child namespaces are created through their parent with
    /// [`Namespace::create_child`].
    fn create(&self, name: &NamespaceName) -> DataResult<Self::Namespace>;

    /// Every namespace name, sorted
    fn list(&self) -> DataResult<Vec<NamespaceName>>;

    /// Remove a namespace.
    ///
    /// Without `cascade` a namespace with children is refused with
    /// `NamespaceHasChildren`; with it the whole subtree is removed.
    fn remove(&self, name: &NamespaceName, cascade: bool) -> DataResult<()>;

    /// True if the namespace exists
    fn exists(&self, name: &NamespaceName) -> DataResult<bool> {
        match self.get(name) {
            Ok(_) => Ok(true),
            Err(crate::DataError::NamespaceDoesNotExist(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
