//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, migrate::MigrateError, query, query_scalar};

use crate::domain::users::records::UserUuid;

/// SQL used to set user context for row-level security.
pub const SET_USER_CONTEXT_SQL: &str = "SELECT set_config('app.current_user_uuid', $1, true)";

const ROLE_BYPASSES_RLS_SQL: &str =
    "SELECT rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and set user context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting user context fails.
    pub async fn begin_user_transaction(
        &self,
        user: UserUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_USER_CONTEXT_SQL)
            .bind(user.to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Whether the connected role would skip row-level security policies.
///
/// Superusers and `BYPASSRLS` roles see every user's order sessions, so the
/// server refuses to start with one.
///
/// # Errors
///
/// Returns an error if the role lookup fails.
pub async fn role_bypasses_rls(pool: &PgPool) -> Result<bool, sqlx::Error> {
    query_scalar::<Postgres, bool>(ROLE_BYPASSES_RLS_SQL)
        .fetch_one(pool)
        .await
}
