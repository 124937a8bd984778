//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::order_sessions::{OrderSessionsService, PgOrderSessionsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    /// The connected role would read every user's sessions.
    #[error("database role bypasses row-level security; connect as the app role")]
    RlsBypassingRole,
}

#[derive(Clone)]
pub struct AppContext {
    pub order_sessions: Arc<dyn OrderSessionsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting fails or the role bypasses RLS.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if database::role_bypasses_rls(&pool)
            .await
            .map_err(AppInitError::Database)?
        {
            return Err(AppInitError::RlsBypassingRole);
        }

        Ok(Self {
            order_sessions: Arc::new(PgOrderSessionsService::new(Db::new(pool.clone()))),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
