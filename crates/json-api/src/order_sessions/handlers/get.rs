//! Get Current Order Session Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    order_sessions::{
        errors::into_status_error,
        models::{CurrentOrderSessionResponse, OrderSessionResponse},
    },
    state::State,
};

/// Get Current Order Session Handler
///
/// Returns the user's active session. A session parked by logout is restored
/// first, with its items intact.
#[endpoint(
    tags("order-sessions"),
    summary = "Get Current Order Session",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current session, or null"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CurrentOrderSessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context()?;

    let session = state
        .app
        .order_sessions
        .get_current_session(&ctx)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CurrentOrderSessionResponse {
        session: session.map(OrderSessionResponse::from),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use till_app::domain::order_sessions::{
        MockOrderSessionsService, OrderSessionsServiceError, models::OrderSessionStatus,
    };

    use crate::test_helpers::{TEST_USER_UUID, make_item, make_session, order_sessions_service};

    use super::*;

    fn make_service(sessions: MockOrderSessionsService) -> Service {
        order_sessions_service(
            sessions,
            Router::with_path("order-sessions/current").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_current_session() -> TestResult {
        let session = make_session(OrderSessionStatus::Active, vec![make_item("Flat White")]);
        let uuid = session.uuid.into_uuid();

        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_get_current_session()
            .once()
            .withf(|ctx| ctx.user == TEST_USER_UUID)
            .return_once(move |_| Ok(Some(session)));

        let mut res = TestClient::get("http://example.com/order-sessions/current")
            .send(&make_service(sessions))
            .await;

        let body: CurrentOrderSessionResponse = res.take_json().await?;
        let session = body.session.ok_or("expected a session")?;

        assert_eq!(res.status_code, Some(StatusCode::OK), "expected 200");
        assert_eq!(session.uuid, uuid, "wrong session");
        assert_eq!(session.status, "active", "wrong status");
        assert_eq!(session.items.len(), 1, "items should be returned");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_without_session_returns_null() -> TestResult {
        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_get_current_session()
            .once()
            .return_once(|_| Ok(None));

        let mut res = TestClient::get("http://example.com/order-sessions/current")
            .send(&make_service(sessions))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK), "expected 200");
        assert_eq!(body, serde_json::json!({ "session": null }), "expected null session");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_reference_returns_400() -> TestResult {
        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_get_current_session()
            .once()
            .return_once(|_| Err(OrderSessionsServiceError::InvalidReference));

        let res = TestClient::get("http://example.com/order-sessions/current")
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "expected 400");

        Ok(())
    }
}
