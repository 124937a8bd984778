use clap::Args;
use till_app::auth::PgAuthService;
use uuid::Uuid;

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Token to revoke
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    if PgAuthService::new(pool)
        .revoke_api_token(args.token_uuid)
        .await?
    {
        println!("revoked token {}", args.token_uuid);
    } else {
        println!("token {} was already revoked or does not exist", args.token_uuid);
    }

    Ok(())
}
