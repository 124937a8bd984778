//! Order sessions service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, field, info};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::order_sessions::{
        data::NewOrderSession,
        errors::OrderSessionsServiceError,
        items::{encode_items, validate_items},
        models::{
            OrderSession, OrderSessionItem, OrderSessionStatus, PersistedOrderSession,
            SessionCompletion,
        },
        records::{OrderSessionRecord, OrderSessionUuid},
        repository::PgOrderSessionsRepository,
    },
    request::RequestContext,
};

/// Largest page `list_completed_sessions` will return.
pub const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct PgOrderSessionsService {
    db: Db,
    repository: PgOrderSessionsRepository,
}

impl PgOrderSessionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrderSessionsRepository::new(),
        }
    }

    /// Begin a user-scoped transaction holding the user's session lock.
    async fn begin_locked_transaction(
        &self,
        ctx: &RequestContext,
    ) -> Result<Transaction<'static, Postgres>, OrderSessionsServiceError> {
        let mut tx = self.db.begin_user_transaction(ctx.user).await?;

        self.repository.lock_user_sessions(&mut tx, ctx.user).await?;

        Ok(tx)
    }

    async fn find_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ctx: &RequestContext,
    ) -> Result<Option<OrderSessionRecord>, OrderSessionsServiceError> {
        self.repository
            .find_by_status(tx, ctx.user, OrderSessionStatus::Active)
            .await
            .map_err(Into::into)
    }

    async fn find_pending_logout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ctx: &RequestContext,
    ) -> Result<Option<OrderSessionRecord>, OrderSessionsServiceError> {
        self.repository
            .find_by_status(tx, ctx.user, OrderSessionStatus::PendingLogout)
            .await
            .map_err(Into::into)
    }

    async fn require_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ctx: &RequestContext,
    ) -> Result<OrderSessionRecord, OrderSessionsServiceError> {
        self.find_active(tx, ctx)
            .await?
            .ok_or(OrderSessionsServiceError::NotFound)
    }

    async fn finish_current_session(
        &self,
        ctx: &RequestContext,
        completion: SessionCompletion,
    ) -> Result<OrderSession, OrderSessionsServiceError> {
        let mut tx = self.begin_locked_transaction(ctx).await?;

        let active = self.require_active(&mut tx, ctx).await?;

        let completed = self
            .repository
            .complete(&mut tx, active.uuid, ctx.user, completion, Timestamp::now())
            .await?;

        let session = OrderSession::try_from(completed)?;

        tx.commit().await?;

        record_session(session.uuid, "completed");

        info!(
            session_uuid = %session.uuid,
            completion = completion.as_str(),
            items = session.items.len(),
            "completed order session"
        );

        Ok(session)
    }
}

#[async_trait]
impl OrderSessionsService for PgOrderSessionsService {
    #[tracing::instrument(
        name = "order_sessions.get_current",
        skip(self, ctx),
        fields(
            user_uuid = %ctx.user,
            request_id = %ctx.request_id,
            session_uuid = field::Empty,
            outcome = field::Empty
        ),
        err
    )]
    async fn get_current_session(
        &self,
        ctx: &RequestContext,
    ) -> Result<Option<OrderSession>, OrderSessionsServiceError> {
        let mut tx = self.begin_locked_transaction(ctx).await?;

        let record = if let Some(active) = self.find_active(&mut tx, ctx).await? {
            record_session(active.uuid, "active");

            Some(active)
        } else if let Some(parked) = self.find_pending_logout(&mut tx, ctx).await? {
            let restored = self
                .repository
                .restore(&mut tx, parked.uuid, ctx.user, None, Timestamp::now())
                .await?;

            record_session(restored.uuid, "restored");

            info!(session_uuid = %restored.uuid, "restored parked order session");

            Some(restored)
        } else {
            Span::current().record("outcome", "absent");

            None
        };

        let session = record.map(OrderSession::try_from).transpose()?;

        tx.commit().await?;

        Ok(session)
    }

    #[tracing::instrument(
        name = "order_sessions.persist_current",
        skip(self, ctx, items),
        fields(
            user_uuid = %ctx.user,
            request_id = %ctx.request_id,
            items = items.len(),
            session_uuid = field::Empty,
            outcome = field::Empty
        ),
        err
    )]
    async fn persist_current_session(
        &self,
        ctx: &RequestContext,
        items: Vec<OrderSessionItem>,
    ) -> Result<PersistedOrderSession, OrderSessionsServiceError> {
        validate_items(&items)?;

        let blob = encode_items(&items)?;
        let now = Timestamp::now();

        let mut tx = self.begin_locked_transaction(ctx).await?;

        let (record, created) = if let Some(active) = self.find_active(&mut tx, ctx).await? {
            let updated = self
                .repository
                .replace_items(&mut tx, active.uuid, ctx.user, &blob, now)
                .await?;

            record_session(updated.uuid, "updated");

            (updated, false)
        } else if let Some(parked) = self.find_pending_logout(&mut tx, ctx).await? {
            // A re-authenticating client may send an empty cart before it has
            // rehydrated; only a non-empty payload replaces the parked items.
            let replacement = (!items.is_empty()).then_some(blob.as_str());

            let restored = self
                .repository
                .restore(&mut tx, parked.uuid, ctx.user, replacement, now)
                .await?;

            record_session(restored.uuid, "restored");

            info!(
                session_uuid = %restored.uuid,
                items_replaced = replacement.is_some(),
                "restored parked order session"
            );

            (restored, false)
        } else {
            let created = self
                .repository
                .create(
                    &mut tx,
                    NewOrderSession {
                        uuid: OrderSessionUuid::new(),
                        user: ctx.user,
                        items: blob,
                        now,
                    },
                )
                .await?;

            record_session(created.uuid, "created");

            info!(session_uuid = %created.uuid, "created order session");

            (created, true)
        };

        let session = OrderSession::try_from(record)?;

        tx.commit().await?;

        Ok(PersistedOrderSession { session, created })
    }

    #[tracing::instrument(
        name = "order_sessions.update_current",
        skip(self, ctx, items),
        fields(
            user_uuid = %ctx.user,
            request_id = %ctx.request_id,
            items = items.len(),
            session_uuid = field::Empty,
            outcome = field::Empty
        ),
        err
    )]
    async fn update_current_session(
        &self,
        ctx: &RequestContext,
        items: Vec<OrderSessionItem>,
    ) -> Result<OrderSession, OrderSessionsServiceError> {
        validate_items(&items)?;

        let blob = encode_items(&items)?;

        let mut tx = self.begin_locked_transaction(ctx).await?;

        let active = self.require_active(&mut tx, ctx).await?;

        let updated = self
            .repository
            .replace_items(&mut tx, active.uuid, ctx.user, &blob, Timestamp::now())
            .await?;

        let session = OrderSession::try_from(updated)?;

        tx.commit().await?;

        record_session(session.uuid, "updated");

        Ok(session)
    }

    #[tracing::instrument(
        name = "order_sessions.mark_pending_logout",
        skip(self, ctx),
        fields(
            user_uuid = %ctx.user,
            request_id = %ctx.request_id,
            session_uuid = field::Empty,
            outcome = field::Empty
        ),
        err
    )]
    async fn mark_current_session_pending_logout(
        &self,
        ctx: &RequestContext,
    ) -> Result<OrderSession, OrderSessionsServiceError> {
        let mut tx = self.begin_locked_transaction(ctx).await?;

        let active = self.require_active(&mut tx, ctx).await?;

        let parked = self
            .repository
            .mark_pending_logout(&mut tx, active.uuid, ctx.user, Timestamp::now())
            .await?;

        let session = OrderSession::try_from(parked)?;

        tx.commit().await?;

        record_session(session.uuid, "pending_logout");

        info!(session_uuid = %session.uuid, "parked order session on logout");

        Ok(session)
    }

    #[tracing::instrument(
        name = "order_sessions.complete_current",
        skip(self, ctx),
        fields(
            user_uuid = %ctx.user,
            request_id = %ctx.request_id,
            session_uuid = field::Empty,
            outcome = field::Empty
        ),
        err
    )]
    async fn complete_current_session(
        &self,
        ctx: &RequestContext,
    ) -> Result<OrderSession, OrderSessionsServiceError> {
        self.finish_current_session(ctx, SessionCompletion::Payment)
            .await
    }

    #[tracing::instrument(
        name = "order_sessions.assign_current_to_tab",
        skip(self, ctx),
        fields(
            user_uuid = %ctx.user,
            request_id = %ctx.request_id,
            session_uuid = field::Empty,
            outcome = field::Empty
        ),
        err
    )]
    async fn assign_current_session_to_tab(
        &self,
        ctx: &RequestContext,
        tab_uuid: Uuid,
    ) -> Result<OrderSession, OrderSessionsServiceError> {
        self.finish_current_session(ctx, SessionCompletion::Tab { tab_uuid })
            .await
    }

    #[tracing::instrument(
        name = "order_sessions.list_completed",
        skip(self, ctx),
        fields(user_uuid = %ctx.user, request_id = %ctx.request_id),
        err
    )]
    async fn list_completed_sessions(
        &self,
        ctx: &RequestContext,
        limit: u32,
    ) -> Result<Vec<OrderSession>, OrderSessionsServiceError> {
        if limit == 0 || limit > MAX_HISTORY_LIMIT {
            return Err(OrderSessionsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_user_transaction(ctx.user).await?;

        let records = self
            .repository
            .list_completed(&mut tx, ctx.user, i64::from(limit))
            .await?;

        tx.commit().await?;

        records
            .into_iter()
            .map(|record| OrderSession::try_from(record).map_err(Into::into))
            .collect()
    }
}

fn record_session(uuid: OrderSessionUuid, outcome: &'static str) {
    let span = Span::current();

    span.record("session_uuid", field::display(uuid));
    span.record("outcome", outcome);
}

#[automock]
#[async_trait]
pub trait OrderSessionsService: Send + Sync {
    /// Fetch the user's active session, restoring a parked one if needed.
    ///
    /// Returns `None` when the user has neither.
    async fn get_current_session(
        &self,
        ctx: &RequestContext,
    ) -> Result<Option<OrderSession>, OrderSessionsServiceError>;

    /// Save the user's cart, creating, updating or restoring as needed.
    ///
    /// Restoring a parked session with an empty `items` keeps the parked items.
    async fn persist_current_session(
        &self,
        ctx: &RequestContext,
        items: Vec<OrderSessionItem>,
    ) -> Result<PersistedOrderSession, OrderSessionsServiceError>;

    /// Replace the items of the active session. Never restores a parked one.
    async fn update_current_session(
        &self,
        ctx: &RequestContext,
        items: Vec<OrderSessionItem>,
    ) -> Result<OrderSession, OrderSessionsServiceError>;

    /// Park the active session on logout, keeping its items.
    async fn mark_current_session_pending_logout(
        &self,
        ctx: &RequestContext,
    ) -> Result<OrderSession, OrderSessionsServiceError>;

    /// Complete the active session after payment.
    async fn complete_current_session(
        &self,
        ctx: &RequestContext,
    ) -> Result<OrderSession, OrderSessionsServiceError>;

    /// Complete the active session by moving it onto a tab.
    async fn assign_current_session_to_tab(
        &self,
        ctx: &RequestContext,
        tab_uuid: Uuid,
    ) -> Result<OrderSession, OrderSessionsServiceError>;

    /// Completed sessions for the user, most recent first.
    async fn list_completed_sessions(
        &self,
        ctx: &RequestContext,
        limit: u32,
    ) -> Result<Vec<OrderSession>, OrderSessionsServiceError>;
}
