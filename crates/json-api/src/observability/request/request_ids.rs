//! Request ID resolution and response header helpers.
//!
//! Tills send their own `x-request-id` so a sale can be followed from the
//! device log into the server log. Anything that would not survive a round
//! trip through a header, or that is unreasonably long, is replaced.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::Response,
};
use tracing::debug;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic())
}

pub(super) fn resolve_request_id(header_value: Option<String>) -> String {
    match header_value {
        Some(value) if is_acceptable(&value) => value,
        Some(value) => {
            debug!(len = value.len(), "replacing unusable inbound request id");

            Uuid::now_v7().to_string()
        }
        None => Uuid::now_v7().to_string(),
    }
}

pub(super) fn set_request_id_header(res: &mut Response, request_id: &str) {
    // Resolved ids are visible ASCII, so this only fails on a logic error.
    if let Ok(value) = HeaderValue::from_str(request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}

pub(super) fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}
