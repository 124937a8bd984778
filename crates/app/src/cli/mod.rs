//! `till-app` administration commands.

use clap::{Args, Parser, Subcommand};
use sqlx::PgPool;
use thiserror::Error;

use till_app::{auth::AuthServiceError, database, domain::users::UsersServiceError};

mod db;
mod token;
mod user;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("database error while {context}: {source}")]
    Sql {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error(transparent)]
    Auth(#[from] AuthServiceError),

    #[error(transparent)]
    Users(#[from] UsersServiceError),

    #[error("{0}")]
    InvalidArgument(&'static str),
}

impl CliError {
    pub(crate) fn sql(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Sql { context, source }
    }
}

/// Connection settings shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<PgPool, CliError> {
        database::connect(&self.database_url)
            .await
            .map_err(CliError::Connect)
    }
}

#[derive(Debug, Parser)]
#[command(name = "till-app", about = "Till administration CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage till users
    #[command(subcommand)]
    User(user::UserCommand),

    /// Issue, list and revoke API tokens
    #[command(subcommand)]
    Token(token::TokenCommand),

    /// Schema and role administration
    #[command(subcommand)]
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            Commands::User(command) => command.run().await,
            Commands::Token(command) => command.run().await,
            Commands::Db(command) => command.run().await,
        }
    }
}
