//! Order Session Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    order_sessions::{items::decode_items, records::OrderSessionRecord},
    users::records::UserUuid,
};

pub use crate::domain::order_sessions::records::OrderSessionUuid;

/// Lifecycle status of an order session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSessionStatus {
    /// The user's mutable, in-use cart.
    Active,

    /// Parked by a logout; restored on the next fetch or persist.
    PendingLogout,

    /// Handed off to payment or a tab. Terminal for the row.
    Completed,
}

impl OrderSessionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PendingLogout => "pending_logout",
            Self::Completed => "completed",
        }
    }
}

impl Display for OrderSessionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order session status: {0}")]
pub struct UnknownOrderSessionStatus(String);

impl FromStr for OrderSessionStatus {
    type Err = UnknownOrderSessionStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "pending_logout" => Ok(Self::PendingLogout),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownOrderSessionStatus(other.to_string())),
        }
    }
}

/// How a completed session left the till.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCompletion {
    /// Paid at the till.
    Payment,

    /// Moved onto an open tab.
    Tab { tab_uuid: Uuid },
}

impl SessionCompletion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Tab { .. } => "tab",
        }
    }

    #[must_use]
    pub const fn tab_uuid(self) -> Option<Uuid> {
        match self {
            Self::Payment => None,
            Self::Tab { tab_uuid } => Some(tab_uuid),
        }
    }
}

/// A single order line stored inside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSessionItem {
    /// Line identifier, unique within the session.
    pub uuid: Uuid,

    /// Product the line refers to.
    pub product_uuid: Uuid,

    /// Product variant, when the product has variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_uuid: Option<Uuid>,

    /// Display name captured at the time the line was added.
    pub name: String,

    /// Unit price in minor currency units.
    pub unit_price: u64,

    pub quantity: u32,

    /// Effective tax rate in basis points (2000 = 20%).
    pub tax_rate: u32,
}

/// Order Session Model
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSession {
    pub uuid: OrderSessionUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<OrderSessionItem>,
    pub status: OrderSessionStatus,
    pub completion: Option<SessionCompletion>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub logout_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl TryFrom<OrderSessionRecord> for OrderSession {
    type Error = serde_json::Error;

    fn try_from(record: OrderSessionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: record.uuid,
            user_uuid: record.user_uuid,
            items: decode_items(&record.items)?,
            status: record.status,
            completion: record.completion,
            created_at: record.created_at,
            updated_at: record.updated_at,
            logout_at: record.logout_at,
            completed_at: record.completed_at,
        })
    }
}

/// Result of persisting the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedOrderSession {
    pub session: OrderSession,

    /// `true` when no active or parked session existed and a new row was made.
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_parses_its_storage_form() -> TestResult {
        for status in [
            OrderSessionStatus::Active,
            OrderSessionStatus::PendingLogout,
            OrderSessionStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<OrderSessionStatus>()?, status);
        }

        Ok(())
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("parked".parse::<OrderSessionStatus>().is_err());
    }

    #[test]
    fn tab_completion_carries_tab_uuid() {
        let tab_uuid = Uuid::now_v7();

        assert_eq!(SessionCompletion::Payment.tab_uuid(), None);
        assert_eq!(SessionCompletion::Tab { tab_uuid }.tab_uuid(), Some(tab_uuid));
        assert_eq!(SessionCompletion::Tab { tab_uuid }.as_str(), "tab");
    }

    #[test]
    fn record_with_corrupt_items_fails_to_decode() {
        let record = OrderSessionRecord {
            uuid: OrderSessionUuid::new(),
            user_uuid: UserUuid::new(),
            items: "{not json".to_string(),
            status: OrderSessionStatus::Active,
            completion: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            logout_at: None,
            completed_at: None,
        };

        assert!(OrderSession::try_from(record).is_err());
    }
}
