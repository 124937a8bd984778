use clap::Args;
use till_app::domain::users::{PgUsersService, UsersService, data::NewUser, records::UserUuid};
use uuid::Uuid;

use crate::cli::{CliError, DatabaseArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Name shown on the till
    #[arg(long)]
    name: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), CliError> {
    if args.name.trim().is_empty() {
        return Err(CliError::InvalidArgument("name cannot be blank"));
    }

    let pool = args.database.connect().await?;

    let user = PgUsersService::new(pool)
        .create_user(NewUser {
            uuid: args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            name: args.name,
        })
        .await?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);

    Ok(())
}
