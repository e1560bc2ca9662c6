mod payload;
mod verifier;

pub use payload::PayloadNamespace;
pub use verifier::WasmAttestationVerifier;
