/// Statement model for the command language
///
/// Each parsed input line becomes exactly one `Statement`. Statements only
/// carry data and accessors; interpretation belongs to the executor.

use std::fmt;
use tessera_common::{NamespaceName, Permission};

/// Discriminant of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Use,
    CreateNamespace,
    DropNamespace,
    ShowNamespaces,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Use => "UseStatement",
            StatementKind::CreateNamespace => "CreateNamespaceStatement",
            StatementKind::DropNamespace => "DropNamespaceStatement",
            StatementKind::ShowNamespaces => "ShowNamespacesStatement",
        };
        f.write_str(name)
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Use(UseStatement),
    CreateNamespace(CreateNamespaceStatement),
    DropNamespace(DropNamespaceStatement),
    ShowNamespaces(ShowNamespacesStatement),
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Use(_) => StatementKind::Use,
            Statement::CreateNamespace(_) => StatementKind::CreateNamespace,
            Statement::DropNamespace(_) => StatementKind::DropNamespace,
            Statement::ShowNamespaces(_) => StatementKind::ShowNamespaces,
        }
    }

    /// The namespace the statement targets, if it has one
    pub fn namespace(&self) -> Option<&NamespaceName> {
        match self {
            Statement::Use(stmt) => Some(stmt.namespace()),
            Statement::CreateNamespace(stmt) => Some(stmt.namespace()),
            Statement::DropNamespace(stmt) => Some(stmt.namespace()),
            Statement::ShowNamespaces(_) => None,
        }
    }

    /// True if the targeted namespace has no parent
    pub fn is_root_namespace(&self) -> bool {
        self.namespace().map(NamespaceName::is_root).unwrap_or(false)
    }

    /// The permission a non-admin needs to run this statement
    pub fn required_permission(&self) -> Permission {
        match self {
            Statement::Use(stmt) => stmt.required_permission(),
            Statement::CreateNamespace(stmt) => stmt.required_permission(),
            Statement::DropNamespace(stmt) => stmt.required_permission(),
            Statement::ShowNamespaces(stmt) => stmt.required_permission(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Use(stmt) => write!(f, "USE {}", stmt.namespace()),
            Statement::CreateNamespace(stmt) => write!(f, "CREATE NAMESPACE {}", stmt.namespace()),
            Statement::DropNamespace(stmt) => write!(f, "DROP NAMESPACE {}", stmt.namespace()),
            Statement::ShowNamespaces(_) => f.write_str("SHOW NAMESPACES"),
        }
    }
}

/// `USE <namespace>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStatement {
    namespace: NamespaceName,
}

impl UseStatement {
    pub fn new(namespace: NamespaceName) -> Self {
        Self { namespace }
    }

    pub fn namespace(&self) -> &NamespaceName {
        &self.namespace
    }

    pub fn is_root_namespace(&self) -> bool {
        self.namespace.is_root()
    }

    pub fn required_permission(&self) -> Permission {
        Permission::UseNamespace
    }
}

/// `CREATE NAMESPACE <namespace>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNamespaceStatement {
    namespace: NamespaceName,
}

impl CreateNamespaceStatement {
    pub fn new(namespace: NamespaceName) -> Self {
        Self { namespace }
    }

    pub fn namespace(&self) -> &NamespaceName {
        &self.namespace
    }

    pub fn is_root_namespace(&self) -> bool {
        self.namespace.is_root()
    }

    /// Checked against the roles the user holds on the parent namespace
    pub fn required_permission(&self) -> Permission {
        Permission::CreateNamespace
    }
}

/// `DROP NAMESPACE <namespace>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropNamespaceStatement {
    namespace: NamespaceName,
}

impl DropNamespaceStatement {
    pub fn new(namespace: NamespaceName) -> Self {
        Self { namespace }
    }

    pub fn namespace(&self) -> &NamespaceName {
        &self.namespace
    }

    pub fn is_root_namespace(&self) -> bool {
        self.namespace.is_root()
    }

    /// Checked against the roles the user holds on the namespace itself
    pub fn required_permission(&self) -> Permission {
        Permission::DropNamespace
    }
}

/// `SHOW NAMESPACES`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowNamespacesStatement;

impl ShowNamespacesStatement {
    pub fn new() -> Self {
        Self
    }

    pub fn required_permission(&self) -> Permission {
        Permission::ShowNamespaces
    }
}
