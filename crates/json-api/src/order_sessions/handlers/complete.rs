//! Complete Current Order Session Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    observability::observe_session_transition,
    order_sessions::{errors::into_status_error, models::OrderSessionResponse},
    state::State,
};

/// Complete Current Order Session Handler
///
/// Marks the active session as paid. The next persist starts a new session.
#[endpoint(
    tags("order-sessions"),
    summary = "Complete Current Order Session",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session completed"),
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
        .complete_current_session(&ctx)
        .await
        .map_err(into_status_error)?;

    observe_session_transition("completed_payment");

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use till_app::domain::order_sessions::{
        MockOrderSessionsService, OrderSessionsServiceError,
        models::{OrderSessionStatus, SessionCompletion},
    };

    use crate::test_helpers::{make_item, make_session, order_sessions_service};

    use super::*;

    fn make_service(sessions: MockOrderSessionsService) -> Service {
        order_sessions_service(
            sessions,
            Router::with_path("order-sessions/current/complete").post(handler),
        )
    }

    #[tokio::test]
    async fn test_complete_returns_completed_session() -> TestResult {
        let mut session = make_session(OrderSessionStatus::Completed, vec![make_item("Bagel")]);

        session.completion = Some(SessionCompletion::Payment);

        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_complete_current_session()
            .once()
            .return_once(move |_| Ok(session));

        let mut res = TestClient::post("http://example.com/order-sessions/current/complete")
            .send(&make_service(sessions))
            .await;

        let body: OrderSessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK), "expected 200");
        assert_eq!(body.status, "completed", "session should be completed");
        assert_eq!(body.completion.as_deref(), Some("payment"), "paid at the till");
        assert_eq!(body.tab_uuid, None, "payment has no tab");

        Ok(())
    }

    #[tokio::test]
    async fn test_complete_without_active_session_returns_404() -> TestResult {
        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_complete_current_session()
            .once()
            .return_once(|_| Err(OrderSessionsServiceError::NotFound));

        let res = TestClient::post("http://example.com/order-sessions/current/complete")
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "expected 404");

        Ok(())
    }
}
