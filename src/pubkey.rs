//! Authority public key decoding.
//!
//! Keys arrive base64-encoded and decode to SEC1 secp256k1 points.

use crate::error::AttestError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Re-export the underlying secp256k1 verifying key type.
pub use k256::ecdsa::VerifyingKey as PublicKey;

/// Extension trait for PublicKey to decode the service's key encodings.
pub trait PublicKeyExt: Sized {
    fn from_base64(encoded: &str) -> Result<Self, AttestError>;
    fn from_sec1_checked(bytes: &[u8]) -> Result<Self, AttestError>;
    fn to_base64(&self) -> String;
}

impl PublicKeyExt for PublicKey {
    /// Decode a standard base64 blob holding a compressed or uncompressed point.
    fn from_base64(encoded: &str) -> Result<PublicKey, AttestError> {
        let raw = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AttestError::InvalidPublicKey(format!("Invalid base64: {}", e)))?;
        PublicKey::from_sec1_checked(&raw)
    }

    /// Parse SEC1 point bytes (33 bytes compressed or 65 bytes uncompressed).
    ///
    /// Only tags 0x02/0x03 (compressed) and 0x04 (uncompressed) are accepted.
    /// SEC1 compact (0x05) and hybrid (0x06/0x07) points are rejected.
    fn from_sec1_checked(bytes: &[u8]) -> Result<PublicKey, AttestError> {
        if bytes.len() != 33 && bytes.len() != 65 {
            return Err(AttestError::InvalidPublicKey(format!(
                "Invalid public key length: expected 33 or 65 bytes, got {}",
                bytes.len()
            )));
        }

        match (bytes.len(), bytes[0]) {
            (33, 0x02 | 0x03) | (65, 0x04) => {}
            (len, tag) => {
                return Err(AttestError::InvalidPublicKey(format!(
                    "Invalid SEC1 tag 0x{:02x} for {}-byte key",
                    tag, len
                )));
            }
        }

        PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| AttestError::InvalidPublicKey(format!("Not a secp256k1 point: {}", e)))
    }

    /// Compressed SEC1 encoding as standard base64.
    fn to_base64(&self) -> String {
        STANDARD.encode(self.to_sec1_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;
    use rstest::rstest;

    fn test_key() -> PublicKey {
        let signing_key = SigningKey::from_slice(&[0x01; 32]).unwrap();
        *signing_key.verifying_key()
    }

    #[test]
    fn test_from_base64_compressed() {
        let key = test_key();
        let encoded = key.to_base64();
        assert_eq!(PublicKey::from_base64(&encoded).unwrap(), key);
    }

    #[test]
    fn test_from_base64_uncompressed() {
        let key = test_key();
        let encoded = STANDARD.encode(key.to_encoded_point(false).as_bytes());
        assert_eq!(PublicKey::from_base64(&encoded).unwrap(), key);
    }

    #[test]
    fn test_from_base64_ignores_surrounding_whitespace() {
        let key = test_key();
        let encoded = format!(" {}\n", key.to_base64());
        assert_eq!(PublicKey::from_base64(&encoded).unwrap(), key);
    }

    #[test]
    fn test_invalid_base64() {
        let err = PublicKey::from_base64("not base64!").unwrap_err();
        assert!(err.is_retrieval());
        assert!(err.to_string().contains("Invalid base64"));
    }

    #[test]
    fn test_invalid_length() {
        let err = PublicKey::from_sec1_checked(&[0x02; 32]).unwrap_err();
        assert!(err
            .to_string()
            .contains("expected 33 or 65 bytes, got 32"));
    }

    #[rstest]
    #[case::compact(0x05)]
    #[case::hybrid_even(0x06)]
    #[case::hybrid_odd(0x07)]
    #[case::uncompressed_tag(0x04)]
    #[case::zero(0x00)]
    fn test_invalid_compressed_tag(#[case] tag: u8) {
        let mut bytes = test_key().to_sec1_bytes().to_vec();
        bytes[0] = tag;
        let err = PublicKey::from_sec1_checked(&bytes).unwrap_err();
        assert!(matches!(err, AttestError::InvalidPublicKey(_)));
        assert!(err.to_string().contains("Invalid SEC1 tag"), "{}", err);
    }

    #[rstest]
    #[case::hybrid_even(0x06)]
    #[case::hybrid_odd(0x07)]
    #[case::compressed_tag(0x02)]
    fn test_invalid_uncompressed_tag(#[case] tag: u8) {
        let mut bytes = test_key().to_encoded_point(false).as_bytes().to_vec();
        bytes[0] = tag;
        let err = PublicKey::from_sec1_checked(&bytes).unwrap_err();
        assert!(err.to_string().contains("Invalid SEC1 tag"), "{}", err);
    }

    #[test]
    fn test_coordinate_out_of_field() {
        // x >= p
        let mut bytes = [0xffu8; 33];
        bytes[0] = 0x02;
        let err = PublicKey::from_sec1_checked(&bytes).unwrap_err();
        assert!(err.to_string().contains("Not a secp256k1 point"), "{}", err);
    }
}
