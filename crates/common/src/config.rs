//! Configuration for Tessera
//!
//! The configuration file is TOML. Besides the log level and prompt it seeds
//! the in-memory namespace and user stores:
//!
//! ```toml
//! log_level = "info"
//!
//! [[users]]
//! username = "admin"
//! admin = true
//!
//! [[users]]
//! username = "wile"
//! roles = { "acme" = ["builder"] }
//!
//! [[namespaces]]
//! name = "acme"
//! grants = { "builder" = ["create.namespace"] }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::types::{NamespaceName, Permission};

/// Environment variable prefix for Tessera configuration
pub const ENV_PREFIX: &str = "TESSERA_";

/// Error types for configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parsing error
    #[error("Parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A user account seeded at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Login name
    pub username: String,
    /// Admins bypass every namespace check
    #[serde(default)]
    pub admin: bool,
    /// Roles held by the user, keyed by namespace
    #[serde(default)]
    pub roles: BTreeMap<NamespaceName, Vec<String>>,
}

/// A namespace seeded at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Fully qualified name
    pub name: NamespaceName,
    /// Permissions granted to each role on this namespace
    #[serde(default)]
    pub grants: BTreeMap<String, Vec<Permission>>,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// Prompt prefix of the interactive session
    pub prompt: String,
    /// Seeded users
    pub users: Vec<UserConfig>,
    /// Seeded namespaces, parents before children
    pub namespaces: Vec<NamespaceConfig>,
}

impl Default for TesseraConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            prompt: "tessera".to_string(),
            users: vec![UserConfig {
                username: "admin".to_string(),
                admin: true,
                roles: BTreeMap::new(),
            }],
            namespaces: Vec::new(),
        }
    }
}

impl TesseraConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a TOML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref()).await?;
        debug!(path = %path.as_ref().display(), "Loaded configuration file");
        Self::from_toml(&content)
    }

    /// Save configuration to a TOML file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content).await?;

        Ok(())
    }

    /// Apply `TESSERA_*` environment variables on top of this configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(&format!("{}LOG_LEVEL", ENV_PREFIX)) {
            self.log_level = level;
        }
        if let Some(prompt) = lookup(&format!("{}PROMPT", ENV_PREFIX)) {
            self.prompt = prompt;
        }
    }

    /// Check the seeded users and namespaces for consistency
    pub fn validate(&self) -> ConfigResult<()> {
        let mut usernames = HashSet::new();
        for user in &self.users {
            if user.username.is_empty() {
                return Err(ConfigError::InvalidConfig("username must not be empty".to_string()));
            }
            if !usernames.insert(user.username.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "duplicate user '{}'",
                    user.username
                )));
            }
        }

        let mut declared = HashSet::new();
        for namespace in &self.namespaces {
            if let Some(parent) = namespace.name.parent() {
                if !declared.contains(&parent) {
                    return Err(ConfigError::InvalidConfig(format!(
                        "namespace '{}' is declared before its parent '{}'",
                        namespace.name, parent
                    )));
                }
            }
            if !declared.insert(namespace.name.clone()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "duplicate namespace '{}'",
                    namespace.name
                )));
            }
        }

        Ok(())
    }
}
