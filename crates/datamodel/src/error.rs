use tessera_common::NamespaceName;
use thiserror::Error;

/// Errors raised by the namespace and user stores
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("namespace '{0}' does not exist")]
    NamespaceDoesNotExist(NamespaceName),

    #[error("namespace '{0}' already exists")]
    NamespaceAlreadyExists(NamespaceName),

    #[error("namespace '{0}' still has child namespaces")]
    NamespaceHasChildren(NamespaceName),

    #[error("namespace '{child}' is not a direct child of '{parent}'")]
    NotAChild {
        parent: NamespaceName,
        child: NamespaceName,
    },

    #[error("namespace '{0}' is not a root namespace")]
    NotARoot(NamespaceName),

    #[error("user '{0}' does not exist")]
    UserDoesNotExist(String),

    #[error("store error: {0}")]
    Store(String),
}

/// Result type for store operations
pub type DataResult<T> = Result<T, DataError>;
