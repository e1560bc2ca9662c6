use crate::attestation;
use crate::message;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct PayloadNamespace;

#[wasm_bindgen]
impl PayloadNamespace {
    /// Canonical signed payload: UTF-8 address followed by the requester id
    #[wasm_bindgen]
    pub fn build_payload(address: &str, requester_id: &str) -> js_sys::Uint8Array {
        let payload = attestation::build_payload(address, requester_id);
        js_sys::Uint8Array::from(&payload[..])
    }

    /// SHA-256 digest of the canonical payload (32 bytes)
    #[wasm_bindgen]
    pub fn payload_digest(address: &str, requester_id: &str) -> js_sys::Uint8Array {
        let digest = message::digest(&attestation::build_payload(address, requester_id));
        js_sys::Uint8Array::from(&digest[..])
    }
}
