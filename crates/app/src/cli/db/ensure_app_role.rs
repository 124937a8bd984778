//! Provision the runtime role.
//!
//! The JSON API must connect as a role without `BYPASSRLS`, otherwise the
//! per-user policy on `order_sessions` is silently ignored. This command
//! creates that role (or resets its password) and grants it DML on the
//! schema, including tables created by later migrations.

use clap::Args;
use sqlx::{PgConnection, query, query_scalar};

use crate::cli::{CliError, DatabaseArgs};

const ROLE_ATTRIBUTES: &str = "LOGIN NOSUPERUSER NOCREATEDB NOCREATEROLE NOREPLICATION NOBYPASSRLS";

#[derive(Debug, Args)]
pub(crate) struct EnsureAppRoleArgs {
    /// Connect as an administrative role
    #[command(flatten)]
    database: DatabaseArgs,

    /// Runtime role name
    #[arg(long, default_value = "till_app")]
    role_name: String,

    /// Runtime role password
    #[arg(long, env = "APP_DB_PASSWORD", hide_env_values = true)]
    password: String,
}

/// `CREATE` or `ALTER` the role. Both arguments must already be quoted.
fn role_statement(exists: bool, role_ident: &str, password_literal: &str) -> String {
    let verb = if exists { "ALTER" } else { "CREATE" };

    format!("{verb} ROLE {role_ident} {ROLE_ATTRIBUTES} PASSWORD {password_literal}")
}

fn grant_statements(database_ident: &str, role_ident: &str) -> [String; 4] {
    const DML: &str = "SELECT, INSERT, UPDATE, DELETE";

    [
        format!("GRANT CONNECT ON DATABASE {database_ident} TO {role_ident}"),
        format!("GRANT USAGE ON SCHEMA public TO {role_ident}"),
        format!("GRANT {DML} ON ALL TABLES IN SCHEMA public TO {role_ident}"),
        format!("ALTER DEFAULT PRIVILEGES IN SCHEMA public GRANT {DML} ON TABLES TO {role_ident}"),
    ]
}

/// Quote through the server; identifiers and passwords cannot be bound.
async fn quote(conn: &mut PgConnection, function: &str, value: &str) -> Result<String, CliError> {
    query_scalar(&format!("SELECT {function}($1)"))
        .bind(value)
        .fetch_one(conn)
        .await
        .map_err(CliError::sql("quoting role settings"))
}

pub(crate) async fn run(args: EnsureAppRoleArgs) -> Result<(), CliError> {
    if args.role_name.trim().is_empty() {
        return Err(CliError::InvalidArgument("role-name cannot be blank"));
    }

    if args.password.trim().is_empty() {
        return Err(CliError::InvalidArgument("password cannot be blank"));
    }

    let pool = args.database.connect().await?;

    let mut tx = pool
        .begin()
        .await
        .map_err(CliError::sql("starting transaction"))?;

    let role_ident = quote(&mut tx, "quote_ident", &args.role_name).await?;
    let password_literal = quote(&mut tx, "quote_literal", &args.password).await?;

    let exists: bool = query_scalar("SELECT EXISTS (SELECT 1 FROM pg_roles WHERE rolname = $1)")
        .bind(&args.role_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(CliError::sql("looking up role"))?;

    query(&role_statement(exists, &role_ident, &password_literal))
        .execute(&mut *tx)
        .await
        .map_err(CliError::sql("creating role"))?;

    let database_ident: String = query_scalar("SELECT quote_ident(current_database())")
        .fetch_one(&mut *tx)
        .await
        .map_err(CliError::sql("resolving database name"))?;

    for statement in grant_statements(&database_ident, &role_ident) {
        query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(CliError::sql("granting privileges"))?;
    }

    tx.commit().await.map_err(CliError::sql("committing"))?;

    println!(
        "{} role {} on database {database_ident}",
        if exists { "updated" } else { "created" },
        args.role_name
    );

    Ok(())
}
