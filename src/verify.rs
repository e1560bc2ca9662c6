//! Attestation checks for issued deposit addresses
//!
//! Every issued address carries one signature per [`Authority`]. Each one is
//! checked against that authority's own key over the same canonical payload,
//! and the address is only trusted when both pass.

use crate::attestation::{AddressAttestation, Authority};
use crate::encoding::decode_signature_field;
use crate::error::AttestError;
use crate::message;
use crate::pubkey::PublicKey;

/// An address whose hub and PSS signatures both verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAddress {
    address: String,
    requester_id: String,
}

impl VerifiedAddress {
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn requester_id(&self) -> &str {
        &self.requester_id
    }

    pub fn into_address(self) -> String {
        self.address
    }
}

/// Check one authority's signature on an attestation
///
/// # Returns
/// * `Ok(())` if the signature verifies under `authority_key`
/// * `Err(SignatureInvalid)` for a well-formed signature that does not verify
/// * `Err(MalformedSignature)` if the field cannot be decoded or parsed
pub fn check_attestation(
    authority_key: &PublicKey,
    attestation: &AddressAttestation,
    authority: Authority,
    requester_id: &str,
) -> Result<(), AttestError> {
    let result = verify_signature_field(authority_key, attestation, authority, requester_id);
    match &result {
        Ok(()) => tracing::info!(%authority, address = %attestation.address, "attestation verified"),
        Err(err) => tracing::warn!(%authority, address = %attestation.address, "{}", err),
    }
    result
}

fn verify_signature_field(
    authority_key: &PublicKey,
    attestation: &AddressAttestation,
    authority: Authority,
    requester_id: &str,
) -> Result<(), AttestError> {
    let payload = attestation.to_payload(requester_id);
    let digest = message::digest(&payload);
    tracing::debug!(%authority, payload_len = payload.len(), "checking attestation");

    let signature = decode_signature_field(attestation.signature(authority))?;

    if !message::verify(&signature, &digest, authority_key)? {
        return Err(AttestError::SignatureInvalid { authority });
    }

    Ok(())
}

/// Combine per-authority results; every authority must pass
pub fn combine_checks(
    attestation: &AddressAttestation,
    requester_id: &str,
    hub: Result<(), AttestError>,
    pss: Result<(), AttestError>,
) -> Result<VerifiedAddress, AttestError> {
    let failures: Vec<(Authority, AttestError)> = [(Authority::Hub, hub), (Authority::Pss, pss)]
        .into_iter()
        .filter_map(|(authority, result)| result.err().map(|err| (authority, err)))
        .collect();

    if !failures.is_empty() {
        let err = AttestError::IssuanceRejected(failures);
        tracing::warn!(address = %attestation.address, "{}", err);
        return Err(err);
    }

    tracing::info!(address = %attestation.address, "hub and pss attestations verified");
    Ok(VerifiedAddress {
        address: attestation.address.clone(),
        requester_id: requester_id.to_string(),
    })
}

/// Check both authorities' signatures on an attestation
pub fn verify_address_attestation(
    hub_key: &PublicKey,
    pss_key: &PublicKey,
    attestation: &AddressAttestation,
    requester_id: &str,
) -> Result<VerifiedAddress, AttestError> {
    let hub = check_attestation(hub_key, attestation, Authority::Hub, requester_id);
    let pss = check_attestation(pss_key, attestation, Authority::Pss, requester_id);
    combine_checks(attestation, requester_id, hub, pss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::sign_payload;
    use k256::ecdsa::SigningKey;
    use std::io;
    use std::sync::{Arc, Mutex};

    const ADDRESS: &str = "1A2b3CdWUVacSQQJ617HuNWByGiisEGXGNx2c";
    const REQUESTER_ID: &str = "merchant-42";

    struct Fixture {
        hub: SigningKey,
        pss: SigningKey,
        attestation: AddressAttestation,
    }

    fn fixture() -> Fixture {
        let hub = SigningKey::from_slice(&[0x01; 32]).unwrap();
        let pss = SigningKey::from_slice(&[0x02; 32]).unwrap();
        let hub_signature = sign_payload(&hub, ADDRESS, REQUESTER_ID).unwrap();
        let pss_signature = sign_payload(&pss, ADDRESS, REQUESTER_ID).unwrap();
        let attestation = AddressAttestation::new(
            ADDRESS,
            hex::encode(pss_signature),
            hex::encode(hub_signature),
        );
        Fixture {
            hub,
            pss,
            attestation,
        }
    }

    #[test]
    fn test_valid_hub_signature() {
        let f = fixture();
        check_attestation(
            f.hub.verifying_key(),
            &f.attestation,
            Authority::Hub,
            REQUESTER_ID,
        )
        .unwrap();
    }

    #[test]
    fn test_valid_pss_signature() {
        let f = fixture();
        check_attestation(
            f.pss.verifying_key(),
            &f.attestation,
            Authority::Pss,
            REQUESTER_ID,
        )
        .unwrap();
    }

    #[test]
    fn test_hub_signature_replaced_by_pss_signature() {
        let f = fixture();
        let mut attestation = f.attestation.clone();
        attestation.hub_signature = attestation.pss_signature.clone();

        let err = check_attestation(
            f.hub.verifying_key(),
            &attestation,
            Authority::Hub,
            REQUESTER_ID,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AttestError::SignatureInvalid {
                authority: Authority::Hub
            }
        ));
    }

    #[test]
    fn test_hub_signature_under_pss_key() {
        let f = fixture();
        let err = check_attestation(
            f.pss.verifying_key(),
            &f.attestation,
            Authority::Hub,
            REQUESTER_ID,
        )
        .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn test_truncated_signature_field() {
        let f = fixture();
        let mut attestation = f.attestation.clone();
        // Three bytes of DER
        attestation.hub_signature.truncate(6);

        let err = check_attestation(
            f.hub.verifying_key(),
            &attestation,
            Authority::Hub,
            REQUESTER_ID,
        )
        .unwrap_err();
        assert!(err.is_malformed(), "unexpected error: {}", err);
    }

    #[test]
    fn test_address_mutated_after_signing() {
        let f = fixture();
        let mut attestation = f.attestation.clone();
        attestation.address = ADDRESS.replacen('A', "B", 1);

        let err = check_attestation(
            f.hub.verifying_key(),
            &attestation,
            Authority::Hub,
            REQUESTER_ID,
        )
        .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn test_wrong_requester_id() {
        let f = fixture();
        let err = check_attestation(
            f.hub.verifying_key(),
            &f.attestation,
            Authority::Hub,
            "merchant-43",
        )
        .unwrap_err();
        assert!(err.is_invalid());
    }

    #[test]
    fn test_verify_both() {
        let f = fixture();
        let verified = verify_address_attestation(
            f.hub.verifying_key(),
            f.pss.verifying_key(),
            &f.attestation,
            REQUESTER_ID,
        )
        .unwrap();
        assert_eq!(verified.address(), ADDRESS);
        assert_eq!(verified.requester_id(), REQUESTER_ID);
    }

    #[test]
    fn test_verify_both_rejects_swapped_keys() {
        let f = fixture();
        let err = verify_address_attestation(
            f.pss.verifying_key(),
            f.hub.verifying_key(),
            &f.attestation,
            REQUESTER_ID,
        )
        .unwrap_err();

        match err {
            AttestError::IssuanceRejected(failures) => {
                let authorities: Vec<_> = failures.iter().map(|(a, _)| *a).collect();
                assert_eq!(authorities, vec![Authority::Hub, Authority::Pss]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .without_time()
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.lines())
    }

    #[test]
    fn test_each_authority_logs_its_outcome() {
        let f = fixture();
        let mut attestation = f.attestation.clone();
        attestation.pss_signature = attestation.hub_signature.clone();

        let (result, lines) = with_captured_logs(|| {
            verify_address_attestation(
                f.hub.verifying_key(),
                f.pss.verifying_key(),
                &attestation,
                REQUESTER_ID,
            )
        });
        assert!(result.is_err());

        assert!(lines
            .iter()
            .any(|l| l.contains("INFO") && l.contains("authority=hub") && l.contains("attestation verified")));
        assert!(lines
            .iter()
            .any(|l| l.contains("WARN") && l.contains("authority=pss") && l.contains("Invalid pss signature")));
    }

    #[test]
    fn test_partial_trust_is_rejected() {
        let f = fixture();
        let mut attestation = f.attestation.clone();
        attestation.pss_signature = "zz".to_string();

        let err = verify_address_attestation(
            f.hub.verifying_key(),
            f.pss.verifying_key(),
            &attestation,
            REQUESTER_ID,
        )
        .unwrap_err();

        match err {
            AttestError::IssuanceRejected(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].0, Authority::Pss);
                assert!(failures[0].1.is_malformed());
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
