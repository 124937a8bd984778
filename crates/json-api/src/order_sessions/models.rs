//! Order Session Request and Response Types

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_app::domain::order_sessions::models::{OrderSession, OrderSessionItem};

/// Order Session Item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderSessionItemPayload {
    /// Line identifier, unique within the session
    pub uuid: Uuid,

    /// Product the line refers to
    pub product_uuid: Uuid,

    /// Product variant, when the product has variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_uuid: Option<Uuid>,

    /// Display name captured when the line was added
    pub name: String,

    /// Unit price in minor currency units
    pub unit_price: u64,

    /// Number of units
    pub quantity: u32,

    /// Tax rate in basis points
    pub tax_rate: u32,
}

impl From<OrderSessionItemPayload> for OrderSessionItem {
    fn from(payload: OrderSessionItemPayload) -> Self {
        OrderSessionItem {
            uuid: payload.uuid,
            product_uuid: payload.product_uuid,
            variant_uuid: payload.variant_uuid,
            name: payload.name,
            unit_price: payload.unit_price,
            quantity: payload.quantity,
            tax_rate: payload.tax_rate,
        }
    }
}

impl From<OrderSessionItem> for OrderSessionItemPayload {
    fn from(item: OrderSessionItem) -> Self {
        Self {
            uuid: item.uuid,
            product_uuid: item.product_uuid,
            variant_uuid: item.variant_uuid,
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            tax_rate: item.tax_rate,
        }
    }
}

/// Order Session Items Request
///
/// A missing `items` field is treated as an empty cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderSessionItemsRequest {
    #[serde(default)]
    pub items: Vec<OrderSessionItemPayload>,
}

impl OrderSessionItemsRequest {
    pub(crate) fn into_items(self) -> Vec<OrderSessionItem> {
        self.items.into_iter().map(Into::into).collect()
    }
}

/// Order Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderSessionResponse {
    /// The unique identifier of the session
    pub uuid: Uuid,

    /// `active`, `pending_logout` or `completed`
    pub status: String,

    /// The cart contents
    pub items: Vec<OrderSessionItemPayload>,

    /// `payment` or `tab` once completed
    pub completion: Option<String>,

    /// Tab the session was moved onto
    pub tab_uuid: Option<Uuid>,

    pub created_at: String,

    pub updated_at: String,

    /// When the session was parked by a logout
    pub logout_at: Option<String>,

    pub completed_at: Option<String>,
}

impl From<OrderSession> for OrderSessionResponse {
    fn from(session: OrderSession) -> Self {
        Self {
            uuid: session.uuid.into_uuid(),
            status: session.status.to_string(),
            items: session.items.into_iter().map(Into::into).collect(),
            completion: session.completion.map(|c| c.as_str().to_string()),
            tab_uuid: session.completion.and_then(|c| c.tab_uuid()),
            created_at: session.created_at.to_string(),
            updated_at: session.updated_at.to_string(),
            logout_at: session.logout_at.as_ref().map(ToString::to_string),
            completed_at: session.completed_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Current Order Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CurrentOrderSessionResponse {
    /// The user's active session, or `null` when there is none
    pub session: Option<OrderSessionResponse>,
}

/// Persisted Order Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PersistedOrderSessionResponse {
    /// `true` when a new session was started
    pub created: bool,

    pub session: OrderSessionResponse,
}

/// Assign To Tab Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AssignTabRequest {
    /// Tab that takes over the session's items
    pub tab_uuid: Uuid,
}

/// Order Session History Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderSessionHistoryResponse {
    /// Completed sessions, most recent first
    pub sessions: Vec<OrderSessionResponse>,
}
