//! Update Current Order Session Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability::observe_session_transition,
    order_sessions::{
        errors::into_status_error,
        models::{OrderSessionItemsRequest, OrderSessionResponse},
    },
    state::State,
};

/// Update Current Order Session Handler
///
/// Replaces the items of the active session. Unlike persist, this never
/// starts or restores a session.
#[endpoint(
    tags("order-sessions"),
    summary = "Update Current Order Session",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session updated"),
        (status_code = StatusCode::NOT_FOUND, description = "No active session"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<OrderSessionItemsRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderSessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context()?;

    let session = state
        .app
        .order_sessions
        .update_current_session(&ctx, json.into_inner().into_items())
        .await
        .map_err(into_status_error)?;

    observe_session_transition("updated");

    Ok(Json(session.into()))
}
