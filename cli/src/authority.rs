//! Authority argument types for CLI commands

use clap::ValueEnum;
use deposit_attest::{Authority, KeyAuthority};

/// Authority whose signature field is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthorityArg {
    Hub,
    Pss,
}

impl From<AuthorityArg> for Authority {
    fn from(arg: AuthorityArg) -> Self {
        match arg {
            AuthorityArg::Hub => Authority::Hub,
            AuthorityArg::Pss => Authority::Pss,
        }
    }
}

/// Key endpoint to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyAuthorityArg {
    Hub,
    Pss,
    PssDefault,
}

impl From<KeyAuthorityArg> for KeyAuthority {
    fn from(arg: KeyAuthorityArg) -> Self {
        match arg {
            KeyAuthorityArg::Hub => KeyAuthority::Hub,
            KeyAuthorityArg::Pss => KeyAuthority::Pss,
            KeyAuthorityArg::PssDefault => KeyAuthority::PssDefault,
        }
    }
}
