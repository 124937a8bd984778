//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken,
        derive_token_verifier, format_api_token, generate_api_token_secret,
        models::NewApiToken, parse_api_token, repository::PgAuthRepository,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// The raw token is only available on the returned value.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let token_hash = derive_token_verifier(&token_uuid, version, &user_uuid, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user_uuid)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let verifier = derive_token_verifier(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.user_uuid,
            &parsed_token.secret,
        );

        if verifier != token.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort; a failed touch must not fail authentication.
        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            debug!(token_uuid = %parsed_token.token_uuid, %error, "failed to touch api token");
        }

        Ok(token.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
