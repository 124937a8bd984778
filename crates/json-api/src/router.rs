//! App Router

use salvo::Router;

use crate::{auth, order_sessions};

/// Authenticated routes.
pub fn app_router() -> Router {
    Router::new().hoop(auth::middleware::handler).push(
        Router::with_path("order-sessions")
            .push(Router::with_path("history").get(order_sessions::history::handler))
            .push(
                Router::with_path("current")
                    .get(order_sessions::get::handler)
                    .put(order_sessions::persist::handler)
                    .patch(order_sessions::update::handler)
                    .push(Router::with_path("logout").post(order_sessions::logout::handler))
                    .push(Router::with_path("complete").post(order_sessions::complete::handler))
                    .push(
                        Router::with_path("assign-tab").post(order_sessions::assign_tab::handler),
                    ),
            ),
    )
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, http::header::AUTHORIZATION, prelude::*, test::TestClient};
    use testresult::TestResult;

    use till_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::state_with_auth;

    use super::*;

    #[tokio::test]
    async fn order_session_routes_require_a_bearer_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .returning(|_| Err(AuthServiceError::NotFound));

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(app_router()),
        );

        for (method, path) in [
            ("GET", "/order-sessions/current"),
            ("PUT", "/order-sessions/current"),
            ("POST", "/order-sessions/current/logout"),
            ("GET", "/order-sessions/history"),
        ] {
            let url = format!("http://example.com{path}");

            let res = match method {
                "GET" => TestClient::get(url),
                "PUT" => TestClient::put(url),
                _ => TestClient::post(url),
            }
            .add_header(AUTHORIZATION, "Bearer ts_v1_bogus", true)
            .send(&service)
            .await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "{method} {path} should be rejected"
            );
        }

        Ok(())
    }
}
