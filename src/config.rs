use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bitcoin_rpc: BitcoinRpcConfig,
    pub whatsonchain: WhatsOnChainConfig,
}

/// Bitcoin RPC configuration for transaction retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitcoinRpcConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

/// Default testnet RPC port
pub const TESTNET_RPC_PORT: u16 = 18332;

/// Default mainnet RPC port
pub const MAINNET_RPC_PORT: u16 = 8332;

impl Default for BitcoinRpcConfig {
    fn default() -> Self {
        Self {
            url: format!("http://127.0.0.1:{}", TESTNET_RPC_PORT),
            username: "user".to_string(),
            password: "password".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            initial_backoff_ms: 100,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 10,
        }
    }
}

impl BitcoinRpcConfig {
    /// Local node URL for the given network
    pub fn local_url(mainnet: bool) -> String {
        let port = if mainnet {
            MAINNET_RPC_PORT
        } else {
            TESTNET_RPC_PORT
        };
        format!("http://127.0.0.1:{}", port)
    }
}

/// WhatsOnChain REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsOnChainConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for WhatsOnChainConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.whatsonchain.com/v1/bsv".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            initial_backoff_ms: 250,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (or `config.*` in the working
    /// directory when `None`), then apply environment overrides
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let rpc = BitcoinRpcConfig::default();
        let woc = WhatsOnChainConfig::default();

        let builder = Config::builder()
            // Bitcoin RPC defaults
            .set_default("bitcoin_rpc.url", rpc.url)?
            .set_default("bitcoin_rpc.username", rpc.username)?
            .set_default("bitcoin_rpc.password", rpc.password)?
            .set_default("bitcoin_rpc.timeout_seconds", rpc.timeout_seconds)?
            .set_default("bitcoin_rpc.max_retries", rpc.max_retries as i64)?
            .set_default("bitcoin_rpc.initial_backoff_ms", rpc.initial_backoff_ms)?
            .set_default("bitcoin_rpc.backoff_multiplier", rpc.backoff_multiplier)?
            .set_default("bitcoin_rpc.max_backoff_seconds", rpc.max_backoff_seconds)?
            // WhatsOnChain defaults
            .set_default("whatsonchain.base_url", woc.base_url)?
            .set_default("whatsonchain.timeout_seconds", woc.timeout_seconds)?
            .set_default("whatsonchain.max_retries", woc.max_retries as i64)?
            .set_default("whatsonchain.initial_backoff_ms", woc.initial_backoff_ms)?
            .set_default("whatsonchain.backoff_multiplier", woc.backoff_multiplier)?
            .set_default(
                "whatsonchain.max_backoff_seconds",
                woc.max_backoff_seconds,
            )?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            // Load from config.toml if it exists
            None => builder.add_source(File::with_name("config").required(false)),
        };

        let config = builder
            // BITCOM_BITCOIN_RPC__URL, BITCOM_WHATSONCHAIN__TIMEOUT_SECONDS, ...
            .add_source(
                config::Environment::with_prefix("BITCOM")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Check for specific environment variables with conventional names
        if let Ok(url) = env::var("BITCOIN_RPC_URL") {
            app_config.bitcoin_rpc.url = url;
        }
        if let Ok(user) = env::var("BITCOIN_RPC_USER") {
            app_config.bitcoin_rpc.username = user;
        }
        if let Ok(password) = env::var("BITCOIN_RPC_PASSWORD") {
            app_config.bitcoin_rpc.password = password;
        }
        if let Ok(base_url) = env::var("WHATSONCHAIN_BASE_URL") {
            app_config.whatsonchain.base_url = base_url;
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::debug!("Falling back to built-in configuration: {}", e);
                Ok(Self {
                    bitcoin_rpc: BitcoinRpcConfig::default(),
                    whatsonchain: WhatsOnChainConfig::default(),
                })
            }
        }
    }
}
