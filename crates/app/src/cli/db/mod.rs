use clap::Subcommand;

use super::CliError;

mod ensure_app_role;
mod migrate;

#[derive(Debug, Subcommand)]
pub(crate) enum DbCommand {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),

    /// Create or update the runtime role the JSON API connects as
    EnsureAppRole(ensure_app_role::EnsureAppRoleArgs),
}

impl DbCommand {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self {
            Self::Migrate(args) => migrate::run(args).await,
            Self::EnsureAppRole(args) => ensure_app_role::run(args).await,
        }
    }
}
