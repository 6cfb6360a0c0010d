//! Common types shared by the Tessera crates
//!
//! This crate holds the namespace identifier and permission tokens that the
//! parser, the data model and the executor all speak, together with the
//! configuration file format and logging setup.

pub mod config;
pub mod logging;
pub mod types;

pub use config::{ConfigError, ConfigResult, NamespaceConfig, TesseraConfig, UserConfig};
pub use types::{NameError, NamespaceName, Permission};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn version_is_available() {
        assert!(!super::VERSION.is_empty());
    }
}
