use clap::Subcommand;

use super::CliError;

mod create;

#[derive(Debug, Subcommand)]
pub(crate) enum UserCommand {
    /// Create a user who can sign in on a till
    Create(create::CreateUserArgs),
}

impl UserCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self {
            Self::Create(args) => create::run(args).await,
        }
    }
}
