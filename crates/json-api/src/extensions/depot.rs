//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use uuid::Uuid;

use till_app::{domain::users::records::UserUuid, request::RequestContext};

use crate::observability::REQUEST_ID_DEPOT_KEY;

const USER_UUID_DEPOT_KEY: &str = "user_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user_uuid(&mut self, user: UserUuid);

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    /// The authenticated user plus the request id, for service calls.
    fn request_context(&self) -> Result<RequestContext, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_DEPOT_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn request_context(&self) -> Result<RequestContext, StatusError> {
        let user = self.user_uuid_or_401()?;

        let request_id = self
            .get::<String>(REQUEST_ID_DEPOT_KEY)
            .map_or_else(|_ignored| Uuid::now_v7().to_string(), Clone::clone);

        Ok(RequestContext::new(user, request_id))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_user_is_unauthorized() {
        let depot = Depot::new();

        let result = depot.request_context();

        assert!(
            matches!(result, Err(ref e) if e.code == StatusCode::UNAUTHORIZED),
            "expected 401, got {result:?}"
        );
    }

    #[test]
    fn request_context_carries_user_and_request_id() -> TestResult {
        let user = UserUuid::new();
        let mut depot = Depot::new();

        depot.insert_user_uuid(user);
        depot.insert(REQUEST_ID_DEPOT_KEY, "req-1".to_string());

        let ctx = depot.request_context()?;

        assert_eq!(ctx.user, user, "user should come from the depot");
        assert_eq!(ctx.request_id, "req-1", "request id should come from the depot");

        Ok(())
    }
}
