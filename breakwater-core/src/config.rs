//! Centralized configuration for Breakwater.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;

/// Central configuration for all Breakwater components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct BreakwaterConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind the listener to
    pub host: String,
    /// Port to bind the listener to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Storage resolution and streaming configuration.
///
/// Controls how logical media references are mapped to physical files and
/// how their bytes are delivered.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// API-relative prefix stripped from stored references before joining
    /// them to a storage root. Historical references carry this prefix.
    pub api_prefix: String,
    /// Base directory the service resolves prefix-stripped references
    /// against first.
    pub base_dir: PathBuf,
    /// Fallback library root used when the settings collaborator has no
    /// root configured for a request.
    pub default_library_root: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api/media/".to_string(),
            base_dir: PathBuf::from("."),
            default_library_root: None,
        }
    }
}

impl BreakwaterConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("BREAKWATER_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("BREAKWATER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }

        if let Ok(root) = std::env::var("BREAKWATER_LIBRARY_ROOT") {
            if !root.is_empty() {
                config.storage.default_library_root = Some(root);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = BreakwaterConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.api_prefix, "/api/media/");
        assert_eq!(config.storage.base_dir, PathBuf::from("."));
        assert_eq!(config.storage.default_library_root, None);
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("BREAKWATER_HOST", "0.0.0.0");
            std::env::set_var("BREAKWATER_PORT", "8080");
            std::env::set_var("BREAKWATER_LIBRARY_ROOT", "/mnt/library");
        }

        let config = BreakwaterConfig::from_env();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.storage.default_library_root,
            Some("/mnt/library".to_string())
        );

        // Unparsable port falls back to the default
        unsafe {
            std::env::set_var("BREAKWATER_PORT", "not-a-port");
        }
        let config = BreakwaterConfig::from_env();
        assert_eq!(config.server.port, 3000);

        // Cleanup
        unsafe {
            std::env::remove_var("BREAKWATER_HOST");
            std::env::remove_var("BREAKWATER_PORT");
            std::env::remove_var("BREAKWATER_LIBRARY_ROOT");
        }
    }
}
