//! Client configuration for the address issuance service.
//!
//! Sources are layered: a TOML file, then environment variables, then
//! whatever the caller sets directly.
//!
//! # Environment Variables
//!
//! - `DEPOSIT_ATTEST_HOST` - service base URL
//! - `DEPOSIT_ATTEST_MERCHANT_ID` - requester identifier bound into every payload
//! - `DEPOSIT_ATTEST_ACCESS_TOKEN` - bearer token for the address endpoint
//! - `DEPOSIT_ATTEST_TIMEOUT` - request timeout in seconds

use crate::error::AttestError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Testnet deployment of the issuance service
pub const DEFAULT_HOST: &str = "https://hub-testnet.lightningpeach.com";

pub const ENV_HOST: &str = "DEPOSIT_ATTEST_HOST";
pub const ENV_MERCHANT_ID: &str = "DEPOSIT_ATTEST_MERCHANT_ID";
pub const ENV_ACCESS_TOKEN: &str = "DEPOSIT_ATTEST_ACCESS_TOKEN";
pub const ENV_TIMEOUT: &str = "DEPOSIT_ATTEST_TIMEOUT";

/// Endpoints and credentials for the retrieval collaborators.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_hub_pubkey_path")]
    pub hub_pubkey_path: String,

    #[serde(default = "default_pss_pubkey_path")]
    pub pss_pubkey_path: String,

    #[serde(default = "default_pss_default_pubkey_path")]
    pub pss_default_pubkey_path: String,

    #[serde(default = "default_address_path")]
    pub address_path: String,

    /// Requester identifier the authorities bind to each address.
    #[serde(default)]
    pub merchant_id: String,

    /// Bearer token for the address endpoint.
    #[serde(default)]
    pub access_token: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_hub_pubkey_path() -> String {
    "api/v2/hub/pubkey".to_string()
}

fn default_pss_pubkey_path() -> String {
    "pss-walleto/api/v1/pss/public_key".to_string()
}

fn default_pss_default_pubkey_path() -> String {
    "pss/api/v1/pss/public_key".to_string()
}

fn default_address_path() -> String {
    "api/v2/merchant/on_chain_address".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            hub_pubkey_path: default_hub_pubkey_path(),
            pss_pubkey_path: default_pss_pubkey_path(),
            pss_default_pubkey_path: default_pss_default_pubkey_path(),
            address_path: default_address_path(),
            merchant_id: String::new(),
            access_token: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("hub_pubkey_path", &self.hub_pubkey_path)
            .field("pss_pubkey_path", &self.pss_pubkey_path)
            .field("pss_default_pubkey_path", &self.pss_default_pubkey_path)
            .field("address_path", &self.address_path)
            .field("merchant_id", &self.merchant_id)
            .field("access_token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration for the default host.
    pub fn new(merchant_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self, AttestError> {
        toml::from_str(s).map_err(|e| AttestError::Config(format!("Invalid TOML: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AttestError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AttestError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Overlay values from `DEPOSIT_ATTEST_*` environment variables.
    pub fn apply_env(self) -> Result<Self, AttestError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, AttestError> {
        if let Some(host) = var(ENV_HOST) {
            self.host = host;
        }
        if let Some(merchant_id) = var(ENV_MERCHANT_ID) {
            self.merchant_id = merchant_id;
        }
        if let Some(token) = var(ENV_ACCESS_TOKEN) {
            self.access_token = token;
        }
        if let Some(timeout) = var(ENV_TIMEOUT) {
            self.timeout_secs = timeout.parse().map_err(|_| {
                AttestError::Config(format!("{} must be a number of seconds", ENV_TIMEOUT))
            })?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), AttestError> {
        if self.host.trim().is_empty() {
            return Err(AttestError::Config("host is empty".to_string()));
        }
        if self.merchant_id.is_empty() {
            return Err(AttestError::Config("merchant_id is not set".to_string()));
        }
        if self.access_token.is_empty() {
            return Err(AttestError::Config("access_token is not set".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AttestError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Build the full URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
