//! Address attestation data structure and signed payload reconstruction

use core::fmt;
use serde::{Deserialize, Serialize};

/// The two trust authorities that co-sign every issued address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Authority {
    Hub,
    Pss,
}

impl Authority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Authority::Hub => "hub",
            Authority::Pss => "pss",
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A freshly issued deposit address with both authorities' signatures
///
/// Both signatures are hex-encoded DER over `sha256(address || requester_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressAttestation {
    /// On-chain address that was attested to
    #[serde(rename = "btc_address")]
    pub address: String,
    /// PSS co-signer signature
    pub pss_signature: String,
    /// Hub signature
    pub hub_signature: String,
}

impl AddressAttestation {
    pub fn new(
        address: impl Into<String>,
        pss_signature: impl Into<String>,
        hub_signature: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            pss_signature: pss_signature.into(),
            hub_signature: hub_signature.into(),
        }
    }

    /// Wire-encoded signature field belonging to `authority`
    pub fn signature(&self, authority: Authority) -> &str {
        match authority {
            Authority::Hub => &self.hub_signature,
            Authority::Pss => &self.pss_signature,
        }
    }

    /// Convert the attestation to the message both authorities signed
    pub fn to_payload(&self, requester_id: &str) -> Vec<u8> {
        build_payload(&self.address, requester_id)
    }
}

/// Build the signed message: [ADDRESS][REQUESTER_ID]
///
/// Both parts are UTF-8 with no separator or length prefix. The issuing
/// service computes the same concatenation, so the layout must stay fixed.
/// Distinct pairs such as ("ab", "c") and ("a", "bc") serialize identically.
pub fn build_payload(address: &str, requester_id: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(address.len() + requester_id.len());
    payload.extend_from_slice(address.as_bytes());
    payload.extend_from_slice(requester_id.as_bytes());
    payload
}
