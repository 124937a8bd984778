use clap::Args;
use jiff::Timestamp;
use till_app::{auth::PgAuthService, domain::users::records::UserUuid};
use uuid::Uuid;

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// User the token authenticates as
    #[arg(long)]
    user_uuid: Uuid,

    /// Optional expiry (RFC 3339)
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), CliError> {
    if args.expires_at.is_some_and(|expires_at| expires_at <= Timestamp::now()) {
        return Err(CliError::InvalidArgument("expires-at must be in the future"));
    }

    let pool = args.database.connect().await?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(UserUuid::from_uuid(args.user_uuid), args.expires_at)
        .await?;

    let metadata = &issued.metadata;

    println!("token_uuid: {}", metadata.uuid);
    println!("user_uuid: {}", metadata.user_uuid);
    println!("created_at: {}", metadata.created_at);

    if let Some(expires_at) = metadata.expires_at {
        println!("expires_at: {expires_at}");
    }

    println!();
    println!("{}", issued.token);
    println!();
    println!("Copy this token into the till now. It cannot be shown again.");

    Ok(())
}
