//! Configuration for mdview.
//!
//! Provides the [`MdviewConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit config path argument
//! 2. `MDVIEW_CONFIG` environment variable
//! 3. XDG default: `~/.config/mdview/config.toml`
//! 4. Built-in defaults
//!
//! The render constants (base URL, MIME type, encoding) are fixed and are
//! deliberately not part of this configuration.

use std::path::PathBuf;
use std::time::Duration;

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for mdview.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MdviewConfig {
    /// Bundled asset configuration.
    pub assets: AssetsConfig,

    /// Worker pool configuration.
    pub pool: PoolConfig,
}

/// Where bundled assets are read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding bundled assets. Defaults to `./assets`.
    pub root: Option<String>,
}

/// Worker pool tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Upper bound on concurrently running load threads.
    pub max_threads: usize,

    /// Seconds an idle load thread is kept before it exits.
    pub keep_alive_secs: u64,

    /// Name given to load threads.
    pub thread_name: String,

    /// Milliseconds `shutdown` waits for in-flight loads.
    pub shutdown_timeout_ms: u64,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_threads: 512,
            keep_alive_secs: 60,
            thread_name: "mdview-loader".to_string(),
            shutdown_timeout_ms: 5000,
        }
    }
}

impl PoolConfig {
    /// Idle keep-alive as a [`Duration`].
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    /// Shutdown grace period as a [`Duration`].
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl MdviewConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is skipped rather than treated as
    /// an error, so a fresh install runs on defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading mdview config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("MDVIEW");
        env_opts.add_section("assets");
        env_opts.add_section("pool");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit argument, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("MDVIEW_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mdview").join("config.toml"))
    }

    /// Directory bundled assets are read from.
    ///
    /// Falls back to `assets` under the current directory.
    pub fn assets_root(&self) -> Result<PathBuf> {
        match &self.assets.root {
            Some(p) => Ok(PathBuf::from(p)),
            None => std::env::current_dir()
                .map(|cwd| cwd.join("assets"))
                .map_err(|e| Error::config(format!("Could not determine assets root: {e}"))),
        }
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
