//! Configuration for deployment and the off-chain administrator tooling.

use alloy_primitives::U256;
use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::ChainId;
use crate::error::{BridgeError, Result};

/// Environment variable holding the administrator's hex-encoded private key.
pub const ADMINISTRATOR_KEY_ENV: &str = "BRIDGE_ADMINISTRATOR_KEY";

/// Configuration for waiting on a swap event before attesting it.
///
/// # Example
///
/// ```rust
/// use swap_bridge::PollingConfig;
///
/// let config = PollingConfig::default()
///     .with_max_attempts(10)
///     .with_poll_interval_secs(3);
/// assert_eq!(config.total_timeout_secs(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Maximum number of lookups before giving up
    pub max_attempts: u32,
    /// Seconds to wait after each lookup that finds nothing
    pub poll_interval_secs: u64,
}

impl Default for PollingConfig {
    /// 60 attempts, 15 seconds apart (15 minutes total)
    fn default() -> Self {
        Self {
            max_attempts: 60,
            poll_interval_secs: 15,
        }
    }
}

impl PollingConfig {
    /// Preset for local or fast chains: 30 attempts, 1 second apart.
    pub fn fast() -> Self {
        Self {
            max_attempts: 30,
            poll_interval_secs: 1,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Upper bound on time spent waiting, in seconds.
    pub fn total_timeout_secs(&self) -> u64 {
        self.max_attempts as u64 * self.poll_interval_secs
    }
}

/// Administrator key material for the attestor.
#[derive(Debug, Clone)]
pub struct AttestorConfig {
    pub signer: PrivateKeySigner,
}

impl AttestorConfig {
    /// Parses a hex-encoded secp256k1 private key, with or without `0x`.
    pub fn from_private_key(key: &str) -> Result<Self> {
        let signer = key.trim().parse::<PrivateKeySigner>()?;
        Ok(Self { signer })
    }

    /// Loads the key from [`ADMINISTRATOR_KEY_ENV`], reading a `.env` file
    /// first if one is present.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), event = "dotenv_loaded");
        }

        let key = std::env::var(ADMINISTRATOR_KEY_ENV).map_err(|_| {
            BridgeError::InvalidConfig(format!("{ADMINISTRATOR_KEY_ENV} is not set"))
        })?;
        Self::from_private_key(&key)
    }
}

/// Parameters for deploying a token and bridge pair on one network.
///
/// ```rust
/// use swap_bridge::DeploymentConfig;
///
/// let config: DeploymentConfig = serde_json::from_str(
///     r#"{
///         "tokenName": "KirillZaynutdinovToken",
///         "tokenSymbol": "KZT",
///         "decimals": 3,
///         "remoteChains": [2]
///     }"#,
/// )
/// .unwrap();
/// assert!(config.initial_mint.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub token_name: String,
    pub token_symbol: String,
    pub decimals: u8,
    /// Chains the bridge accepts as swap destinations and redeem sources
    pub remote_chains: Vec<ChainId>,
    /// Amount minted to the owner after deployment
    #[serde(default)]
    pub initial_mint: U256,
}

impl DeploymentConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_name.is_empty() {
            return Err(BridgeError::InvalidConfig(
                "token name must not be empty".to_string(),
            ));
        }
        if self.remote_chains.is_empty() {
            return Err(BridgeError::InvalidConfig(
                "at least one remote chain is required".to_string(),
            ));
        }
        Ok(())
    }
}
