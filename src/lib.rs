//! Tessera
//!
//! Administrative control plane for a namespace-partitioned data store:
//! a small command language for managing namespaces, with role based
//! authorization of every statement.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use tessera_command as command;
pub use tessera_common as common;
pub use tessera_datamodel as datamodel;
pub use tessera_shell as shell;

use tessera_common::{ConfigError, TesseraConfig};
use tessera_datamodel::{DataError, MemoryNamespaceStore, MemoryUserStore, UserStore};
use tessera_shell::{Executor, Session, SessionLoop};

/// Module version information
pub mod version {
    /// The current version of the Tessera library
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Errors raised while assembling the control plane
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to seed namespaces: {0}")]
    Data(#[from] DataError),
}

/// Shared stores plus what every session needs to start
pub struct ControlPlane {
    namespaces: Arc<MemoryNamespaceStore>,
    users: MemoryUserStore,
    prompt: String,
}

impl ControlPlane {
    /// Validate `config` and seed the in-memory stores from it
    pub fn from_config(config: &TesseraConfig) -> Result<Self, BootstrapError> {
        config.validate()?;

        let namespaces = MemoryNamespaceStore::from_config(&config.namespaces)?;
        let users = MemoryUserStore::from_config(&config.users);

        info!(
            namespaces = namespaces.len(),
            users = config.users.len(),
            "Control plane ready"
        );

        Ok(Self {
            namespaces: Arc::new(namespaces),
            users,
            prompt: config.prompt.clone(),
        })
    }

    /// Start a session for a known user
    pub fn open_session(&self, username: &str) -> Result<Session, DataError> {
        let user = self.users.get(username)?;
        info!(user = username, "Opened session");
        Ok(Session::new(user))
    }

    /// A session loop sharing this control plane's namespace store
    pub fn session_loop(&self) -> SessionLoop<MemoryNamespaceStore> {
        SessionLoop::new(Executor::new(Arc::clone(&self.namespaces)), self.prompt.clone())
    }

    pub fn namespaces(&self) -> &Arc<MemoryNamespaceStore> {
        &self.namespaces
    }
}
