//! Payload digest and DER ECDSA signing/verification on secp256k1

use crate::attestation::build_payload;
use crate::error::AttestError;
use crate::pubkey::PublicKey;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey};
use sha2::{Digest, Sha256};

/// Length of a payload digest in bytes
pub const DIGEST_LENGTH: usize = 32;

/// SHA-256 of the canonical payload
pub fn digest(payload: &[u8]) -> [u8; DIGEST_LENGTH] {
    let hash = Sha256::digest(payload);

    let mut result = [0u8; DIGEST_LENGTH];
    result.copy_from_slice(&hash);
    result
}

/// Parse a strict DER signature
///
/// Rejects wrong tags, truncated or padded input, and zero or out-of-range
/// scalars.
pub fn parse_der_signature(signature: &[u8]) -> Result<Signature, AttestError> {
    Signature::from_der(signature).map_err(|e| {
        AttestError::MalformedSignature(format!(
            "Invalid DER signature ({} bytes): {}",
            signature.len(),
            e
        ))
    })
}

/// Verify a DER signature over a 32-byte digest
///
/// Returns `Ok(false)` for a well-formed signature that does not verify and
/// `Err(MalformedSignature)` when the bytes cannot be parsed.
pub fn verify(
    signature_der: &[u8],
    digest: &[u8; DIGEST_LENGTH],
    key: &PublicKey,
) -> Result<bool, AttestError> {
    let signature = parse_der_signature(signature_der)?;
    // The issuer's verifier accepts high-S, so normalize before checking
    let signature = signature.normalize_s().unwrap_or(signature);

    Ok(key.verify_prehash(digest, &signature).is_ok())
}

/// Sign a 32-byte digest, returning DER bytes
pub fn sign_digest(
    signing_key: &SigningKey,
    digest: &[u8; DIGEST_LENGTH],
) -> Result<Vec<u8>, AttestError> {
    let signature: Signature = signing_key
        .sign_prehash(digest)
        .map_err(|e| AttestError::Signing(e.to_string()))?;

    Ok(signature.to_der().as_bytes().to_vec())
}

/// Sign the canonical payload for an (address, requester id) pair
pub fn sign_payload(
    signing_key: &SigningKey,
    address: &str,
    requester_id: &str,
) -> Result<Vec<u8>, AttestError> {
    sign_digest(signing_key, &digest(&build_payload(address, requester_id)))
}
