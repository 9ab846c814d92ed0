//! Configuration management for Seedsweep.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Network;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/seedsweep/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scan session settings
    pub scan: ScanConfig,
    /// Ledger query settings
    pub ledger: LedgerConfig,
    /// Retry policy for balance queries
    pub retry: RetryConfig,
    /// Fund sweep settings
    pub sweep: SweepConfig,
    /// Remote discovery registration settings
    pub registration: RegistrationConfig,
    /// Local discovery log settings
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SEEDSWEEP_NETWORK`: Override the ledger network (testnet/mainnet)
    /// - `SEEDSWEEP_WORKERS`: Override the scan worker count
    /// - `SEEDSWEEP_DESTINATION`: Override the sweep destination address
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("SEEDSWEEP_NETWORK") {
            if let Ok(network) = val.parse() {
                config.ledger.network = network;
                tracing::debug!("Override ledger.network from env: {}", network);
            }
        }

        if let Ok(val) = std::env::var("SEEDSWEEP_WORKERS") {
            if let Ok(workers) = val.parse() {
                config.scan.workers = workers;
                tracing::debug!("Override scan.workers from env: {}", workers);
            }
        }

        if let Ok(val) = std::env::var("SEEDSWEEP_DESTINATION") {
            config.sweep.destination = Some(val.clone());
            tracing::debug!("Override sweep.destination from env: {}", val);
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/seedsweep/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "seedsweep", "seedsweep").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/seedsweep`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "seedsweep", "seedsweep").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Scan session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of concurrent scan workers
    pub workers: usize,
    /// Recovery phrase word count (12, 15, 18, 21 or 24)
    pub word_count: usize,
    /// Whether to preload the dedup registry from the local discovery log
    pub dedup_across_sessions: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            word_count: 12,
            dedup_across_sessions: false,
        }
    }
}

/// Ledger query settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Which XRP Ledger network to query
    pub network: Network,
    /// JSON-RPC endpoint override; the network default is used when unset
    pub rpc_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            rpc_url: None,
            timeout_secs: 30,
        }
    }
}

/// Retry policy settings for transient balance query failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum attempts per query, including the first
    pub max_attempts: u32,
    /// Base delay in milliseconds; attempt N waits N times this
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

/// Fund sweep settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Fixed destination address for swept funds; sweeping is disabled when unset
    pub destination: Option<String>,
    /// Transfer service endpoint; sweeping is disabled when unset
    pub transfer_url: Option<String>,
}

/// Remote discovery registration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Registration endpoint; remote registration is disabled when unset
    pub url: Option<String>,
}

/// Local discovery log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Whether to record discoveries in the local log
    pub enabled: bool,
    /// Database path override; defaults to `<data dir>/discoveries.db`
    pub path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}
