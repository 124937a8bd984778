//! Mark Current Order Session Pending Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    observability::observe_session_transition,
    order_sessions::{errors::into_status_error, models::OrderSessionResponse},
    state::State,
};

/// Logout Handler
///
/// Parks the active session so the next login on any till picks it up again.
#[endpoint(
    tags("order-sessions"),
    summary = "Park Current Order Session On Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session parked"),
        (status_code = StatusCode::NOT_FOUND, description = "No active session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderSessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context()?;

    let session = state
        .app
        .order_sessions
        .mark_current_session_pending_logout(&ctx)
        .await
        .map_err(into_status_error)?;

    observe_session_transition("pending_logout");

    Ok(Json(session.into()))
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
            Router::with_path("order-sessions/current/logout").post(handler),
        )
    }

    #[tokio::test]
    async fn test_logout_parks_session() -> TestResult {
        let session = make_session(OrderSessionStatus::PendingLogout, vec![make_item("Latte")]);

        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_mark_current_session_pending_logout()
            .once()
            .withf(|ctx| ctx.user == TEST_USER_UUID)
            .return_once(move |_| Ok(session));

        let mut res = TestClient::post("http://example.com/order-sessions/current/logout")
            .send(&make_service(sessions))
            .await;

        let body: OrderSessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK), "expected 200");
        assert_eq!(body.status, "pending_logout", "session should be parked");
        assert!(body.logout_at.is_some(), "logout time should be set");

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_without_active_session_returns_404() -> TestResult {
        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_mark_current_session_pending_logout()
            .once()
            .return_once(|_| Err(OrderSessionsServiceError::NotFound));

        let res = TestClient::post("http://example.com/order-sessions/current/logout")
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "expected 404");

        Ok(())
    }
}
