//! deposit-attest: verification of co-signed deposit addresses.
//!
//! A custodial service issues on-chain deposit addresses signed by two
//! independent authorities, the hub and the PSS co-signer. Both sign
//! `sha256(address || requester_id)` with secp256k1 ECDSA (DER encoded), and
//! an address is only trusted once both signatures verify under the
//! respective authority's key.
//!
//! # Architecture
//!
//! 1. **Core** (`attestation`, `message`, `pubkey`, `verify`) - pure,
//!    synchronous payload construction and signature checks
//! 2. **Retrieval** (`client`, `config`) - HTTP collaborators that fetch keys
//!    and issued addresses (native targets only)
//! 3. **WASM bindings** (`wasm/`) - thin wrappers exposing the core to JavaScript
//!
//! # Usage from Rust
//!
//! ```rust
//! use deposit_attest::{check_attestation, AddressAttestation, Authority, PublicKey, PublicKeyExt};
//! use deposit_attest::message::sign_payload;
//! use k256::ecdsa::SigningKey;
//!
//! let hub = SigningKey::from_slice(&[0x01; 32]).unwrap();
//! let signature = sign_payload(&hub, "2N1Ffz3An2FwXsq3bXBbk3V5Lu7JrYsHdAc", "merchant-42").unwrap();
//! let attestation = AddressAttestation::new(
//!     "2N1Ffz3An2FwXsq3bXBbk3V5Lu7JrYsHdAc",
//!     "",
//!     hex::encode(signature),
//! );
//!
//! let hub_key = PublicKey::from_base64(&hub.verifying_key().to_base64()).unwrap();
//! check_attestation(&hub_key, &attestation, Authority::Hub, "merchant-42").unwrap();
//! ```

pub mod attestation;
#[cfg(not(target_arch = "wasm32"))]
pub mod client;
pub mod config;
mod encoding;
mod error;
pub mod message;
pub mod pubkey;
pub mod verify;
pub mod wasm;

pub use attestation::{build_payload, AddressAttestation, Authority};
pub use config::ClientConfig;
pub use encoding::decode_signature_field;
pub use error::{AttestError, Result};
pub use message::{digest, sign_payload};
pub use pubkey::{PublicKey, PublicKeyExt};
pub use verify::{check_attestation, combine_checks, verify_address_attestation, VerifiedAddress};

#[cfg(not(target_arch = "wasm32"))]
pub use client::{AddressSource, AttestationClient, HttpClient, KeyAuthority, KeyProvider};

pub use wasm::{PayloadNamespace, WasmAttestationVerifier};
