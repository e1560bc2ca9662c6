//! deposit-attest CLI
//!
//! Requests deposit addresses and verifies the hub and PSS attestations on them.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod authority;
mod check;
mod settings;
mod verify;

#[derive(Parser)]
#[command(name = "deposit-attest")]
#[command(about = "Verify hub and PSS attestations on issued deposit addresses", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging for this tool and the library
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Service base URL (overrides config and DEPOSIT_ATTEST_HOST)
    #[arg(long, global = true)]
    host: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a new address and verify both authority signatures
    Verify {
        /// Only check one authority
        #[arg(long, value_enum)]
        only: Option<authority::AuthorityArg>,
    },

    /// Fetch and print an authority's public key
    Pubkey {
        #[arg(short, long, value_enum)]
        authority: authority::KeyAuthorityArg,
    },

    /// Check one signature offline
    Check(check::CheckArgs),

    /// Produce a hex DER signature over (address, requester) for fixtures
    Sign(check::SignArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "deposit_attest=debug,deposit_attest_cli=debug"
    } else {
        "deposit_attest=info,deposit_attest_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Verify { only } => {
            let config = settings::load(cli.config.as_deref(), cli.host)?;
            verify::handle_verify(config, only.map(Into::into)).await
        }
        Commands::Pubkey { authority } => {
            let config = settings::load_unauthenticated(cli.config.as_deref(), cli.host)?;
            verify::handle_pubkey(config, authority.into()).await
        }
        Commands::Check(args) => check::handle_check(args),
        Commands::Sign(args) => check::handle_sign(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pubkey_subcommand() {
        let cli = Cli::try_parse_from(["deposit-attest", "pubkey", "--authority", "pss-default"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Pubkey {
                authority: authority::KeyAuthorityArg::PssDefault
            }
        ));
    }
}
