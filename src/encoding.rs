//! Wire decoding for signature fields

use crate::error::AttestError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decode a signature field into raw DER bytes
///
/// The service sends hex. Fields that are not valid hex are tried as
/// standard base64 before giving up.
pub fn decode_signature_field(field: &str) -> Result<Vec<u8>, AttestError> {
    let field = field.trim();
    if field.is_empty() {
        return Err(AttestError::MalformedSignature(
            "Empty signature field".to_string(),
        ));
    }

    if let Ok(bytes) = hex::decode(field) {
        return Ok(bytes);
    }

    STANDARD.decode(field).map_err(|_| {
        AttestError::MalformedSignature(format!(
            "Signature field is neither hex nor base64 ({} chars)",
            field.len()
        ))
    })
}
