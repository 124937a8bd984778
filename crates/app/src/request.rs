//! Request Context

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::users::records::UserUuid;

/// Per-request values handed explicitly to services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Authenticated user the request acts for.
    pub user: UserUuid,

    /// Correlation identifier, echoed in logs and the `x-request-id` header.
    pub request_id: String,
}

impl RequestContext {
    #[must_use]
    pub fn new(user: UserUuid, request_id: impl Into<String>) -> Self {
        Self {
            user,
            request_id: request_id.into(),
        }
    }
}

impl Display for RequestContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "user={} request_id={}", self.user, self.request_id)
    }
}
