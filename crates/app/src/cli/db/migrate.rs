use clap::Args;
use till_app::database;

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// Connect as a role that owns the schema
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    database::migrate(&pool).await?;

    println!("migrations applied");

    Ok(())
}
