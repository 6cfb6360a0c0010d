//! Statement execution
//!
//! The executor decides whether the session's user may run a statement,
//! applies it to the namespace store and produces exactly one response.
//! Admins bypass every permission check. Everyone else is authorized through
//! the roles they hold on the namespace that governs the action:
//!
//! - `USE ns` needs any role on `ns` itself;
//! - `CREATE NAMESPACE a.b` needs a role granting `create.namespace` on `a`,
//!   and root namespaces can only be created by an admin;
//! - `DROP NAMESPACE ns` needs a role granting `drop.namespace` on `ns`;
//! - `SHOW NAMESPACES` lists the namespaces where one of the user's roles
//!   grants `show.namespaces`.

use std::sync::Arc;

use tessera_command::{
    CreateNamespaceStatement, DropNamespaceStatement, ShowNamespacesStatement, Statement,
    UseStatement,
};
use tessera_common::{NamespaceName, Permission};
use tessera_datamodel::{DataError, Namespace, NamespaceStore, User};
use tracing::{debug, error, info, warn};

use crate::response::{Response, ResponseSink, Status};
use crate::session::Session;

/// Message returned for store faults; the detail only goes to the log
const STORE_UNAVAILABLE: &str = "could not access namespace data";

/// Executes parsed statements against a namespace store
pub struct Executor<S> {
    store: Arc<S>,
}

impl<S> Clone for Executor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: NamespaceStore> Executor<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Execute `statement` for `session` and write its response to `sink`
    pub fn execute<W>(&self, sink: &mut W, session: &mut Session, statement: Statement)
    where
        W: ResponseSink + ?Sized,
    {
        let response = self.respond(session, statement);
        sink.send(response);
    }

    /// Decide the response to `statement`, applying any effects
    pub fn respond(&self, session: &mut Session, statement: Statement) -> Response {
        debug!(
            user = session.user().username(),
            kind = %statement.kind(),
            statement = %statement,
            "Executing statement"
        );

        let response = match statement {
            Statement::Use(stmt) => self.handle_use(session, &stmt),
            Statement::CreateNamespace(stmt) => self.handle_create_namespace(session, &stmt),
            Statement::DropNamespace(stmt) => self.handle_drop_namespace(session, &stmt),
            Statement::ShowNamespaces(stmt) => self.handle_show_namespaces(session, &stmt),
        };

        if response.status == Status::Unauthorized {
            info!(user = session.user().username(), message = %response.message, "Statement denied");
        }

        response
    }

    fn handle_use(&self, session: &mut Session, stmt: &UseStatement) -> Response {
        let name = stmt.namespace();

        match self.store.get(name) {
            Ok(_) => {}
            Err(DataError::NamespaceDoesNotExist(_)) => {
                return Response::failure(Status::NamespaceDoesNotExist, name.to_string())
            }
            Err(e) => return store_fault(&e),
        }

        let user = session.user();
        if user.is_admin() || user.namespaces().contains(name) {
            session.select(name.clone());
            return Response::ok();
        }

        Response::failure(Status::Unauthorized, "")
    }

    fn handle_create_namespace(&self, session: &Session, stmt: &CreateNamespaceStatement) -> Response {
        let name = stmt.namespace();

        match self.store.exists(name) {
            Ok(true) => return Response::success(Status::NamespaceAlreadyExists, name.to_string()),
            Ok(false) => {}
            Err(e) => return store_fault(&e),
        }

        let user = session.user();
        let parent_name = match name.parent() {
            Some(parent) => parent,
            None => return self.create_root_namespace(user, name),
        };

        let parent = match self.store.get(&parent_name) {
            Ok(parent) => parent,
            Err(DataError::NamespaceDoesNotExist(_)) => {
                return Response::failure(Status::NamespaceDoesNotExist, parent_name.to_string())
            }
            Err(e) => return store_fault(&e),
        };

        if !user.is_admin() && !has_permission(user, &parent, stmt.required_permission()) {
            return Response::failure(
                Status::Unauthorized,
                format!("cannot create namespace '{}'", name),
            );
        }

        match parent.create_child(name) {
            Ok(_) => Response::success(Status::Ok, "namespace created"),
            Err(DataError::NamespaceAlreadyExists(_)) => {
                Response::success(Status::NamespaceAlreadyExists, name.to_string())
            }
            Err(DataError::NamespaceDoesNotExist(missing)) => {
                Response::failure(Status::NamespaceDoesNotExist, missing.to_string())
            }
            Err(e) => {
                warn!(namespace = %name, error = %e, "Failed to create namespace");
                Response::failure(
                    Status::CreateNamespaceError,
                    format!("could not create namespace '{}'", name),
                )
            }
        }
    }

    /// Root namespaces have no parent to check; only an admin may create one
    fn create_root_namespace(&self, user: &User, name: &NamespaceName) -> Response {
        if !user.is_admin() {
            return Response::failure(
                Status::Unauthorized,
                "root namespaces can only be created by an admin",
            );
        }

        match self.store.create(name) {
            Ok(_) => Response::success(Status::Ok, "namespace created"),
            Err(DataError::NamespaceAlreadyExists(_)) => {
                Response::success(Status::NamespaceAlreadyExists, name.to_string())
            }
            Err(e) => {
                warn!(namespace = %name, error = %e, "Failed to create root namespace");
                Response::failure(
                    Status::CreateNamespaceError,
                    format!("could not create namespace '{}'", name),
                )
            }
        }
    }

    fn handle_drop_namespace(&self, session: &Session, stmt: &DropNamespaceStatement) -> Response {
        let name = stmt.namespace();

        let namespace = match self.store.get(name) {
            Ok(namespace) => namespace,
            Err(DataError::NamespaceDoesNotExist(_)) => {
                return Response::failure(Status::NamespaceDoesNotExist, name.to_string())
            }
            Err(e) => return store_fault(&e),
        };

        let user = session.user();
        if !user.is_admin() && !has_permission(user, &namespace, stmt.required_permission()) {
            return Response::failure(
                Status::Unauthorized,
                format!("cannot drop namespace '{}'", name),
            );
        }

        // never cascades: children must be dropped first
        match self.store.remove(name, false) {
            Ok(()) => Response::success(Status::Ok, "namespace dropped"),
            Err(DataError::NamespaceHasChildren(_)) => Response::failure(
                Status::DropNamespaceError,
                format!("namespace '{}' still has child namespaces", name),
            ),
            Err(DataError::NamespaceDoesNotExist(_)) => {
                Response::failure(Status::NamespaceDoesNotExist, name.to_string())
            }
            Err(e) => {
                warn!(namespace = %name, error = %e, "Failed to drop namespace");
                Response::failure(
                    Status::DropNamespaceError,
                    format!("could not drop namespace '{}'", name),
                )
            }
        }
    }

    fn handle_show_namespaces(&self, session: &Session, stmt: &ShowNamespacesStatement) -> Response {
        let user = session.user();

        if user.is_admin() {
            return match self.store.list() {
                Ok(names) => Response::rows(names.iter().map(ToString::to_string).collect()),
                Err(e) => store_fault(&e),
            };
        }

        let mut visible = Vec::new();
        for name in user.namespaces() {
            let namespace = match self.store.get(&name) {
                Ok(namespace) => namespace,
                Err(DataError::NamespaceDoesNotExist(_)) => continue,
                Err(e) => return store_fault(&e),
            };

            if has_permission(user, &namespace, stmt.required_permission()) {
                visible.push(name.to_string());
            }
        }

        Response::rows(visible)
    }
}

/// True if any role the user holds on `namespace` grants `permission` there
fn has_permission<N: Namespace>(user: &User, namespace: &N, permission: Permission) -> bool {
    user.roles(namespace.name())
        .iter()
        .any(|role| namespace.has_permission(role, permission))
}

fn store_fault(error: &DataError) -> Response {
    error!(error = %error, "Namespace store failure");
    Response::failure(Status::InternalServerError, STORE_UNAVAILABLE)
}
