//! Namespace hierarchy and authorization data for Tessera
//!
//! Namespaces form a tree of dot-delimited names. Users hold roles scoped
//! to a single namespace, and each namespace grants permissions to roles.
//! Stores are shared by every session and are accessed only through the
//! [`NamespaceStore`] and [`UserStore`] traits.

pub mod error;
pub mod memory;
pub mod namespace;
pub mod user;

pub use error::{DataError, DataResult};
pub use memory::{MemoryNamespace, MemoryNamespaceStore};
pub use namespace::{Namespace, NamespaceStore};
pub use user::{MemoryUserStore, User, UserStore};
