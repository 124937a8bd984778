//! Order Sessions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    order_sessions::{
        data::NewOrderSession,
        models::{OrderSessionStatus, SessionCompletion},
        records::{OrderSessionRecord, OrderSessionUuid},
    },
    users::records::UserUuid,
};

const LOCK_USER_ORDER_SESSIONS_SQL: &str = include_str!("sql/lock_user_order_sessions.sql");
const FIND_ORDER_SESSION_BY_STATUS_SQL: &str = include_str!("sql/find_order_session_by_status.sql");
const CREATE_ORDER_SESSION_SQL: &str = include_str!("sql/create_order_session.sql");
const REPLACE_ORDER_SESSION_ITEMS_SQL: &str = include_str!("sql/replace_order_session_items.sql");
const RESTORE_ORDER_SESSION_SQL: &str = include_str!("sql/restore_order_session.sql");
const MARK_ORDER_SESSION_PENDING_LOGOUT_SQL: &str =
    include_str!("sql/mark_order_session_pending_logout.sql");
const COMPLETE_ORDER_SESSION_SQL: &str = include_str!("sql/complete_order_session.sql");
const LIST_COMPLETED_ORDER_SESSIONS_SQL: &str =
    include_str!("sql/list_completed_order_sessions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderSessionsRepository;

impl PgOrderSessionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Serialize all lifecycle transactions of one user.
    ///
    /// Held until the transaction commits or rolls back.
    pub(crate) async fn lock_user_sessions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_USER_ORDER_SESSIONS_SQL)
            .bind(user.to_string())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: OrderSessionStatus,
    ) -> Result<Option<OrderSessionRecord>, sqlx::Error> {
        query_as::<Postgres, OrderSessionRecord>(FIND_ORDER_SESSION_BY_STATUS_SQL)
            .bind(user)
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: NewOrderSession,
    ) -> Result<OrderSessionRecord, sqlx::Error> {
        query_as::<Postgres, OrderSessionRecord>(CREATE_ORDER_SESSION_SQL)
            .bind(session.uuid)
            .bind(session.user)
            .bind(session.items)
            .bind(SqlxTimestamp::from(session.now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn replace_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: OrderSessionUuid,
        user: UserUuid,
        items: &str,
        now: Timestamp,
    ) -> Result<OrderSessionRecord, sqlx::Error> {
        query_as::<Postgres, OrderSessionRecord>(REPLACE_ORDER_SESSION_ITEMS_SQL)
            .bind(session)
            .bind(user)
            .bind(items)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await
    }

    /// Move a parked session back to `active`.
    ///
    /// Stored items are kept when `items` is `None`.
    pub(crate) async fn restore(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: OrderSessionUuid,
        user: UserUuid,
        items: Option<&str>,
        now: Timestamp,
    ) -> Result<OrderSessionRecord, sqlx::Error> {
        query_as::<Postgres, OrderSessionRecord>(RESTORE_ORDER_SESSION_SQL)
            .bind(session)
            .bind(user)
            .bind(items)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_pending_logout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: OrderSessionUuid,
        user: UserUuid,
        now: Timestamp,
    ) -> Result<OrderSessionRecord, sqlx::Error> {
        query_as::<Postgres, OrderSessionRecord>(MARK_ORDER_SESSION_PENDING_LOGOUT_SQL)
            .bind(session)
            .bind(user)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn complete(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: OrderSessionUuid,
        user: UserUuid,
        completion: SessionCompletion,
        now: Timestamp,
    ) -> Result<OrderSessionRecord, sqlx::Error> {
        query_as::<Postgres, OrderSessionRecord>(COMPLETE_ORDER_SESSION_SQL)
            .bind(session)
            .bind(user)
            .bind(completion.as_str())
            .bind(completion.tab_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_completed(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        limit: i64,
    ) -> Result<Vec<OrderSessionRecord>, sqlx::Error> {
        query_as::<Postgres, OrderSessionRecord>(LIST_COMPLETED_ORDER_SESSIONS_SQL)
            .bind(user)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderSessionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<OrderSessionStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            items: row.try_get("items")?,
            status,
            completion: try_get_completion(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            logout_at: row
                .try_get::<Option<SqlxTimestamp>, _>("logout_at")?
                .map(SqlxTimestamp::to_jiff),
            completed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("completed_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

fn try_get_completion(row: &PgRow) -> Result<Option<SessionCompletion>, sqlx::Error> {
    let completion: Option<String> = row.try_get("completion")?;
    let tab_uuid: Option<Uuid> = row.try_get("tab_uuid")?;

    match (completion.as_deref(), tab_uuid) {
        (None, _) => Ok(None),
        (Some("payment"), _) => Ok(Some(SessionCompletion::Payment)),
        (Some("tab"), Some(tab_uuid)) => Ok(Some(SessionCompletion::Tab { tab_uuid })),
        (Some(other), _) => Err(sqlx::Error::ColumnDecode {
            index: "completion".to_string(),
            source: format!("unexpected completion {other:?} with tab_uuid {tab_uuid:?}").into(),
        }),
    }
}
