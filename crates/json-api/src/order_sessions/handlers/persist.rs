//! Persist Current Order Session Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability::observe_session_transition,
    order_sessions::{
        errors::into_status_error,
        models::{OrderSessionItemsRequest, PersistedOrderSessionResponse},
    },
    state::State,
};

/// Persist Current Order Session Handler
///
/// Saves the cart into the active session, restoring a parked one or starting
/// a new one as needed. An empty `items` list never overwrites a parked
/// session's items.
#[endpoint(
    tags("order-sessions"),
    summary = "Persist Current Order Session",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Session started"),
        (status_code = StatusCode::OK, description = "Session updated or restored"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Conflicting session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "order_sessions.persist",
    skip(json, depot, res),
    fields(items_count = tracing::field::Empty, created = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<OrderSessionItemsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PersistedOrderSessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let ctx = depot.request_context()?;
    let items = json.into_inner().into_items();

    let span = tracing::Span::current();

    span.record("items_count", items.len());

    let persisted = state
        .app
        .order_sessions
        .persist_current_session(&ctx, items)
        .await
        .map_err(into_status_error)?;

    span.record("created", persisted.created);

    if persisted.created {
        observe_session_transition("created");
        res.status_code(StatusCode::CREATED);
    } else {
        observe_session_transition("persisted");
        res.status_code(StatusCode::OK);
    }

    Ok(Json(PersistedOrderSessionResponse {
        created: persisted.created,
        session: persisted.session.into(),
    }))
}
