//! Error types for deposit-attest

use crate::attestation::Authority;

/// Main error type for deposit-attest operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum AttestError {
    /// Transport or body decoding failure while fetching a key or an address
    #[error("Retrieval failed: {0}")]
    Retrieval(String),
    /// The service answered with a non-success status
    #[error("Request failed ({status}): {body}")]
    HttpStatus { status: u16, body: String },
    /// Public key blob is not base64 or not a secp256k1 point
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    /// Missing or unusable configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Signature bytes are not a well-formed DER ECDSA signature
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
    /// Producing a signature with a local key failed
    #[error("Signing failed: {0}")]
    Signing(String),
    /// Well-formed signature that does not verify under the authority's key
    #[error("Invalid {authority} signature")]
    SignatureInvalid { authority: Authority },
    /// At least one authority check failed for an issued address
    #[error("Address rejected: {}", format_failures(.0))]
    IssuanceRejected(Vec<(Authority, AttestError)>),
}

fn format_failures(failures: &[(Authority, AttestError)]) -> String {
    failures
        .iter()
        .map(|(authority, err)| format!("{}: {}", authority, err))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AttestError {
    /// Network, decoding or configuration failure fetching inputs
    pub fn is_retrieval(&self) -> bool {
        matches!(
            self,
            AttestError::Retrieval(_)
                | AttestError::HttpStatus { .. }
                | AttestError::InvalidPublicKey(_)
                | AttestError::Config(_)
        )
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, AttestError::MalformedSignature(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, AttestError::SignatureInvalid { .. })
    }
}

pub type Result<T> = std::result::Result<T, AttestError>;

// Converts to a JS Error with stack trace
impl From<AttestError> for wasm_bindgen::JsValue {
    fn from(err: AttestError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
