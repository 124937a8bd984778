use clap::Subcommand;

use super::CliError;

mod create;
mod list;
mod revoke;

#[derive(Debug, Subcommand)]
pub(crate) enum TokenCommand {
    /// Issue a token; the raw value is printed once
    Create(create::CreateTokenArgs),

    /// Show a user's tokens without their secrets
    List(list::ListTokensArgs),

    /// Revoke a token so it no longer authenticates
    Revoke(revoke::RevokeTokenArgs),
}

impl TokenCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self {
            Self::Create(args) => create::run(args).await,
            Self::List(args) => list::run(args).await,
            Self::Revoke(args) => revoke::run(args).await,
        }
    }
}
