//! Order Session Records

use jiff::Timestamp;

use crate::{
    domain::{
        order_sessions::models::{OrderSessionStatus, SessionCompletion},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order Session UUID
pub type OrderSessionUuid = TypedUuid<OrderSessionRecord>;

/// Order Session Record
///
/// Row as stored; `items` is the serialized blob.
#[derive(Debug, Clone)]
pub struct OrderSessionRecord {
    pub uuid: OrderSessionUuid,
    pub user_uuid: UserUuid,
    pub items: String,
    pub status: OrderSessionStatus,
    pub completion: Option<SessionCompletion>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub logout_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}
