//! Assign Current Order Session To Tab Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability::observe_session_transition,
    order_sessions::{
        errors::into_status_error,
        models::{AssignTabRequest, OrderSessionResponse},
    },
    state::State,
};

/// Assign To Tab Handler
///
/// Completes the active session by moving its items onto a tab.
#[endpoint(
    tags("order-sessions"),
    summary = "Assign Current Order Session To Tab",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session completed onto the tab"),
        (status_code = StatusCode::NOT_FOUND, description = "No active session"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AssignTabRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderSessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context()?;

    let session = state
        .app
        .order_sessions
        .assign_current_session_to_tab(&ctx, json.into_inner().tab_uuid)
        .await
        .map_err(into_status_error)?;

    observe_session_transition("completed_tab");

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use till_app::domain::order_sessions::{
        MockOrderSessionsService, OrderSessionsServiceError,
        models::{OrderSessionStatus, SessionCompletion},
    };

    use crate::test_helpers::{TEST_USER_UUID, make_item, make_session, order_sessions_service};

    use super::*;

    fn make_service(sessions: MockOrderSessionsService) -> Service {
        order_sessions_service(
            sessions,
            Router::with_path("order-sessions/current/assign-tab").post(handler),
        )
    }

    #[tokio::test]
    async fn test_assign_tab_returns_tab_completion() -> TestResult {
        let tab_uuid = Uuid::now_v7();
        let mut session = make_session(OrderSessionStatus::Completed, vec![make_item("Stout")]);

        session.completion = Some(SessionCompletion::Tab { tab_uuid });

        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_assign_current_session_to_tab()
            .once()
            .withf(move |ctx, tab| ctx.user == TEST_USER_UUID && *tab == tab_uuid)
            .return_once(move |_, _| Ok(session));

        let mut res = TestClient::post("http://example.com/order-sessions/current/assign-tab")
            .json(&json!({ "tab_uuid": tab_uuid }))
            .send(&make_service(sessions))
            .await;

        let body: OrderSessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK), "expected 200");
        assert_eq!(body.completion.as_deref(), Some("tab"), "completed onto a tab");
        assert_eq!(body.tab_uuid, Some(tab_uuid), "tab uuid should be echoed");

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_tab_without_active_session_returns_404() -> TestResult {
        let mut sessions = MockOrderSessionsService::new();

        sessions
            .expect_assign_current_session_to_tab()
            .once()
            .return_once(|_, _| Err(OrderSessionsServiceError::NotFound));

        let res = TestClient::post("http://example.com/order-sessions/current/assign-tab")
            .json(&json!({ "tab_uuid": Uuid::now_v7() }))
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "expected 404");

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_tab_without_tab_uuid_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/order-sessions/current/assign-tab")
            .json(&json!({}))
            .send(&make_service(MockOrderSessionsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "expected 400");

        Ok(())
    }
}
