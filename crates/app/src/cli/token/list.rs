use clap::Args;
use jiff::Timestamp;
use till_app::{
    auth::{ApiTokenMetadata, PgAuthService},
    domain::users::records::UserUuid,
};
use uuid::Uuid;

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// User whose tokens should be listed
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), CliError> {
    let pool = args.database.connect().await?;

    let tokens = PgAuthService::new(pool)
        .list_api_tokens(UserUuid::from_uuid(args.user_uuid))
        .await?;

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_uuid);
    }

    for token in &tokens {
        println!("{}", describe(token));
    }

    Ok(())
}

fn describe(token: &ApiTokenMetadata) -> String {
    let state = match token.revoked_at {
        Some(revoked_at) => format!("revoked {revoked_at}"),
        None if token.is_active_at(Timestamp::now()) => "active".to_string(),
        None => "expired".to_string(),
    };

    format!(
        "{}  {state}  created {}  last used {}",
        token.uuid,
        token.created_at,
        token
            .last_used_at
            .map_or_else(|| "never".to_string(), |at| at.to_string()),
    )
}
