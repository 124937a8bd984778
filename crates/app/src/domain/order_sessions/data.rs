//! Order Session Data

use jiff::Timestamp;

use crate::domain::{order_sessions::records::OrderSessionUuid, users::records::UserUuid};

/// New Order Session Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderSession {
    pub uuid: OrderSessionUuid,
    pub user: UserUuid,

    /// Serialized item list.
    pub items: String,

    /// Used for both `created_at` and `updated_at`.
    pub now: Timestamp,
}
