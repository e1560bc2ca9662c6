//! WASM bindings for issued address verification.

use crate::attestation::{AddressAttestation, Authority};
use crate::error::AttestError;
use crate::pubkey::{PublicKey, PublicKeyExt};
use crate::verify::{check_attestation, verify_address_attestation};
use wasm_bindgen::prelude::*;

/// Holds both authority keys and the requester id for repeated checks.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WasmAttestationVerifier {
    hub_key: PublicKey,
    pss_key: PublicKey,
    requester_id: String,
}

#[wasm_bindgen]
impl WasmAttestationVerifier {
    /// Create a verifier from base64-encoded SEC1 public keys.
    #[wasm_bindgen(constructor)]
    pub fn new(
        hub_pubkey: &str,
        pss_pubkey: &str,
        requester_id: &str,
    ) -> Result<WasmAttestationVerifier, AttestError> {
        Ok(WasmAttestationVerifier {
            hub_key: PublicKey::from_base64(hub_pubkey)?,
            pss_key: PublicKey::from_base64(pss_pubkey)?,
            requester_id: requester_id.to_string(),
        })
    }

    /// Check only the hub signature (hex DER). Throws on failure.
    #[wasm_bindgen]
    pub fn check_hub(&self, address: &str, hub_signature: &str) -> Result<(), AttestError> {
        let attestation = AddressAttestation::new(address, "", hub_signature);
        check_attestation(&self.hub_key, &attestation, Authority::Hub, &self.requester_id)
    }

    /// Check only the PSS signature (hex DER). Throws on failure.
    #[wasm_bindgen]
    pub fn check_pss(&self, address: &str, pss_signature: &str) -> Result<(), AttestError> {
        let attestation = AddressAttestation::new(address, pss_signature, "");
        check_attestation(&self.pss_key, &attestation, Authority::Pss, &self.requester_id)
    }

    /// Verify both signatures and return the trusted address.
    #[wasm_bindgen]
    pub fn verify(
        &self,
        address: &str,
        pss_signature: &str,
        hub_signature: &str,
    ) -> Result<String, AttestError> {
        let attestation = AddressAttestation::new(address, pss_signature, hub_signature);
        verify_address_attestation(
            &self.hub_key,
            &self.pss_key,
            &attestation,
            &self.requester_id,
        )
        .map(|verified| verified.into_address())
    }

    /// Compressed hub key as base64.
    #[wasm_bindgen(getter)]
    pub fn hub_pubkey(&self) -> String {
        self.hub_key.to_base64()
    }

    /// Compressed PSS key as base64.
    #[wasm_bindgen(getter)]
    pub fn pss_pubkey(&self) -> String {
        self.pss_key.to_base64()
    }

    #[wasm_bindgen(getter)]
    pub fn requester_id(&self) -> String {
        self.requester_id.clone()
    }
}
