use anyhow::{Context, Result};
use deposit_attest::{
    AttestationClient, Authority, ClientConfig, HttpClient, KeyAuthority, KeyProvider,
    PublicKeyExt,
};

pub async fn handle_verify(config: ClientConfig, only: Option<Authority>) -> Result<()> {
    let client = AttestationClient::from_config(config).context("Failed to build client")?;

    match only {
        Some(authority) => {
            client
                .verify_authority(authority)
                .await
                .with_context(|| format!("{} attestation check failed", authority))?;
            println!("{}: OK", authority);
        }
        None => {
            let verified = client
                .verify_issued_address()
                .await
                .context("Issued address could not be verified")?;
            println!("{}", verified.address());
        }
    }
    Ok(())
}

pub async fn handle_pubkey(config: ClientConfig, authority: KeyAuthority) -> Result<()> {
    let client = HttpClient::new(config).context("Failed to build client")?;
    let key = client
        .public_key(authority)
        .await
        .with_context(|| format!("Failed to fetch {} public key", authority))?;
    println!("{}", key.to_base64());
    Ok(())
}
