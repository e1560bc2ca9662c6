//! Retrieval of authority keys and issued addresses over HTTP.
//!
//! The verification core never performs I/O. This module supplies its inputs:
//! [`KeyProvider`] yields an authority's base64 public key and
//! [`AddressSource`] yields a freshly issued [`AddressAttestation`].
//! [`AttestationClient`] joins both and runs the checks.
//!
//! # Example
//!
//! ```rust,ignore
//! use deposit_attest::{AttestationClient, ClientConfig};
//!
//! let config = ClientConfig::new("merchant-42", token).apply_env()?;
//! let client = AttestationClient::from_config(config)?;
//! let verified = client.verify_issued_address().await?;
//! println!("deposit to {}", verified.address());
//! ```

use async_trait::async_trait;
use core::fmt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::attestation::{AddressAttestation, Authority};
use crate::config::ClientConfig;
use crate::error::AttestError;
use crate::pubkey::{PublicKey, PublicKeyExt};
use crate::verify::{check_attestation, verify_address_attestation, VerifiedAddress};

/// Key endpoints exposed by the issuance service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAuthority {
    Hub,
    Pss,
    /// The service-wide default PSS key; no signature field refers to it
    PssDefault,
}

impl KeyAuthority {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAuthority::Hub => "hub",
            KeyAuthority::Pss => "pss",
            KeyAuthority::PssDefault => "pss-default",
        }
    }
}

impl From<Authority> for KeyAuthority {
    fn from(authority: Authority) -> Self {
        match authority {
            Authority::Hub => KeyAuthority::Hub,
            Authority::Pss => KeyAuthority::Pss,
        }
    }
}

impl fmt::Display for KeyAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplies an authority's current public key, base64-encoded
#[async_trait]
pub trait KeyProvider: Send + Sync {
    async fn fetch_public_key(&self, authority: KeyAuthority) -> Result<String, AttestError>;

    /// Fetch and decode a key
    async fn public_key(&self, authority: KeyAuthority) -> Result<PublicKey, AttestError> {
        let encoded = self.fetch_public_key(authority).await?;
        tracing::debug!(%authority, key = %encoded, "fetched public key");
        PublicKey::from_base64(&encoded)
    }
}

/// Requests a freshly issued deposit address
#[async_trait]
pub trait AddressSource: Send + Sync {
    async fn fetch_address_attestation(&self) -> Result<AddressAttestation, AttestError>;
}

#[derive(Deserialize)]
struct HubPublicKeyResponse {
    pubkey: String,
}

#[derive(Deserialize)]
struct ContentResponse {
    content: String,
}

/// reqwest-backed implementation of both retrieval collaborators
#[derive(Clone)]
pub struct HttpClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, AttestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AttestError::Retrieval(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, AttestError> {
        let url = self.config.url(path);

        let mut request = self.client.get(&url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttestError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AttestError::Retrieval(format!("Failed to parse response from {}: {}", url, e)))
    }

    fn map_reqwest_error(&self, url: &str, e: reqwest::Error) -> AttestError {
        if e.is_timeout() {
            AttestError::Retrieval(format!(
                "Request to {} timed out after {}s",
                url, self.config.timeout_secs
            ))
        } else if e.is_connect() {
            AttestError::Retrieval(format!("Failed to connect to {}: {}", url, e))
        } else {
            AttestError::Retrieval(format!("Request to {} failed: {}", url, e))
        }
    }
}

#[async_trait]
impl KeyProvider for HttpClient {
    async fn fetch_public_key(&self, authority: KeyAuthority) -> Result<String, AttestError> {
        match authority {
            KeyAuthority::Hub => {
                let resp: HubPublicKeyResponse =
                    self.get(&self.config.hub_pubkey_path, None).await?;
                Ok(resp.pubkey)
            }
            KeyAuthority::Pss => {
                let resp: ContentResponse = self.get(&self.config.pss_pubkey_path, None).await?;
                Ok(resp.content)
            }
            KeyAuthority::PssDefault => {
                let resp: ContentResponse =
                    self.get(&self.config.pss_default_pubkey_path, None).await?;
                Ok(resp.content)
            }
        }
    }
}

#[async_trait]
impl AddressSource for HttpClient {
    async fn fetch_address_attestation(&self) -> Result<AddressAttestation, AttestError> {
        let attestation: AddressAttestation = self
            .get(&self.config.address_path, Some(&self.config.access_token))
            .await?;
        tracing::debug!(address = %attestation.address, "received issued address");
        Ok(attestation)
    }
}

/// Fetches an issued address and both authority keys, then verifies it
pub struct AttestationClient<K, A> {
    keys: K,
    addresses: A,
    requester_id: String,
}

impl AttestationClient<HttpClient, HttpClient> {
    /// Build an HTTP-backed client; the merchant id is the requester identifier
    pub fn from_config(config: ClientConfig) -> Result<Self, AttestError> {
        config.validate()?;
        let requester_id = config.merchant_id.clone();
        let keys = HttpClient::new(config)?;
        let addresses = keys.clone();
        Ok(Self::new(keys, addresses, requester_id))
    }
}

impl<K: KeyProvider, A: AddressSource> AttestationClient<K, A> {
    pub fn new(keys: K, addresses: A, requester_id: impl Into<String>) -> Self {
        Self {
            keys,
            addresses,
            requester_id: requester_id.into(),
        }
    }

    pub fn requester_id(&self) -> &str {
        &self.requester_id
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// Request a new address and accept it only if both authorities signed it
    ///
    /// Any retrieval failure aborts before verification.
    pub async fn verify_issued_address(&self) -> Result<VerifiedAddress, AttestError> {
        let (hub_key, pss_key, attestation) = tokio::try_join!(
            self.keys.public_key(KeyAuthority::Hub),
            self.keys.public_key(KeyAuthority::Pss),
            self.addresses.fetch_address_attestation()
        )?;

        verify_address_attestation(&hub_key, &pss_key, &attestation, &self.requester_id)
    }

    /// Check a single authority against a newly issued address
    pub async fn verify_authority(&self, authority: Authority) -> Result<(), AttestError> {
        let (key, attestation) = tokio::try_join!(
            self.keys.public_key(authority.into()),
            self.addresses.fetch_address_attestation()
        )?;

        check_attestation(&key, &attestation, authority, &self.requester_id)
    }
}
