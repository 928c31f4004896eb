//! XDG Base Directory support
//!
//! Resolves where chunkdex looks for its user config file and where
//! search exports go when no directory is given.

use std::env;
use std::path::PathBuf;

/// XDG directories used by chunkdex
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Resolve directories.
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit CHUNKDEX_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.cache)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve("CHUNKDEX_CONFIG_DIR", "XDG_CONFIG_HOME", ".config"),
            cache_dir: Self::resolve("CHUNKDEX_CACHE_DIR", "XDG_CACHE_HOME", ".cache"),
        }
    }

    fn resolve(override_var: &str, xdg_var: &str, home_default: &str) -> PathBuf {
        if let Ok(dir) = env::var(override_var) {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var(xdg_var) {
            return PathBuf::from(xdg).join("chunkdex");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_default)
            .join("chunkdex")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default destination for exported search hits
    pub fn exports_dir(&self) -> PathBuf {
        self.cache_dir.join("exports")
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  Cache: {:?}", self.cache_dir);
        tracing::debug!("  Config file: {:?}", self.config_file());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
