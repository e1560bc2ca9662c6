use anyhow::{Context, Result};
use clap::Args;
use deposit_attest::{
    check_attestation, sign_payload, AddressAttestation, Authority, PublicKey, PublicKeyExt,
};
use k256::ecdsa::SigningKey;

use crate::authority::AuthorityArg;

#[derive(Args)]
pub struct CheckArgs {
    /// Authority public key (base64 SEC1)
    #[arg(long)]
    pub pubkey: String,
    /// Issued address
    #[arg(long)]
    pub address: String,
    /// Requester identifier bound into the payload
    #[arg(long)]
    pub requester: String,
    /// Signature field as sent by the service (hex DER)
    #[arg(long)]
    pub signature: String,
    /// Which signature field this is
    #[arg(long, value_enum, default_value = "hub")]
    pub authority: AuthorityArg,
}

#[derive(Args)]
pub struct SignArgs {
    /// Secret key as 32 bytes of hex
    #[arg(long)]
    pub secret: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub requester: String,
}

pub fn handle_check(args: CheckArgs) -> Result<()> {
    let authority = check(&args)?;
    println!("{}: OK", authority);
    Ok(())
}

fn check(args: &CheckArgs) -> Result<Authority> {
    let key = PublicKey::from_base64(&args.pubkey).context("Invalid public key")?;
    let authority: Authority = args.authority.into();
    let attestation = match authority {
        Authority::Hub => AddressAttestation::new(&args.address, "", &args.signature),
        Authority::Pss => AddressAttestation::new(&args.address, &args.signature, ""),
    };

    check_attestation(&key, &attestation, authority, &args.requester)
        .with_context(|| format!("{} signature rejected", authority))?;
    Ok(authority)
}

pub fn handle_sign(args: SignArgs) -> Result<()> {
    let (pubkey, signature) = sign(&args)?;
    println!("pubkey: {}", pubkey);
    println!("signature: {}", signature);
    Ok(())
}

/// Returns the base64 public key and the hex DER signature
fn sign(args: &SignArgs) -> Result<(String, String)> {
    let secret = hex::decode(args.secret.trim()).context("Invalid hex string for secret key")?;
    let signing_key = SigningKey::from_slice(&secret).context("Invalid secret key")?;
    let signature = sign_payload(&signing_key, &args.address, &args.requester)?;

    Ok((
        signing_key.verifying_key().to_base64(),
        hex::encode(signature),
    ))
}
