use std::sync::Arc;

use tessera_common::NamespaceName;
use tessera_datamodel::User;

/// Per-connection state
///
/// A session can only be built with an authenticated user. The selected
/// namespace changes only through a successful `USE`. It is not revalidated
/// when the namespace is dropped, by this session or any other.
#[derive(Debug, Clone)]
pub struct Session {
    namespace: Option<NamespaceName>,
    user: Arc<User>,
}

impl Session {
    pub fn new(user: Arc<User>) -> Self {
        Self {
            namespace: None,
            user,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Currently selected namespace
    pub fn namespace(&self) -> Option<&NamespaceName> {
        self.namespace.as_ref()
    }

    pub(crate) fn select(&mut self, namespace: NamespaceName) {
        self.namespace = Some(namespace);
    }
}
