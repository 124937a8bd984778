//! Completed Order Session History Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use till_app::domain::order_sessions::MAX_HISTORY_LIMIT;

use crate::{
    extensions::*,
    order_sessions::{
        errors::into_status_error,
        models::{OrderSessionHistoryResponse, OrderSessionResponse},
    },
    state::State,
};

const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// Order Session History Handler
///
/// Lists the user's completed sessions, most recently completed first.
#[endpoint(
    tags("order-sessions"),
    summary = "List Completed Order Sessions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Completed sessions"),
        (status_code = StatusCode::BAD_REQUEST, description = "Limit out of range"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrderSessionHistoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context()?;

    let limit = limit.into_inner().unwrap_or(DEFAULT_HISTORY_LIMIT);

    if limit == 0 || limit > MAX_HISTORY_LIMIT {
        return Err(StatusError::bad_request()
            .brief(format!("limit must be between 1 and {MAX_HISTORY_LIMIT}")));
    }

    let sessions = state
        .app
        .order_sessions
        .list_completed_sessions(&ctx, limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderSessionHistoryResponse {
        sessions: sessions.into_iter().map(OrderSessionResponse::from).collect(),
    }))
}
