//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use till_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        order_sessions::{
            MockOrderSessionsService,
            models::{OrderSession, OrderSessionItem, OrderSessionStatus, OrderSessionUuid},
        },
        users::records::UserUuid,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_order_sessions_mock() -> MockOrderSessionsService {
    let mut sessions = MockOrderSessionsService::new();

    sessions.expect_get_current_session().never();
    sessions.expect_persist_current_session().never();
    sessions.expect_update_current_session().never();
    sessions.expect_mark_current_session_pending_logout().never();
    sessions.expect_complete_current_session().never();
    sessions.expect_assign_current_session_to_tab().never();
    sessions.expect_list_completed_sessions().never();

    sessions
}

fn state(order_sessions: MockOrderSessionsService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        order_sessions: Arc::new(order_sessions),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_order_sessions_mock(), auth)
}

/// Serve `route` as the test user. Unset expectations on `sessions` fail the test.
pub(crate) fn order_sessions_service(sessions: MockOrderSessionsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(sessions, strict_auth_mock())))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn make_item(name: &str) -> OrderSessionItem {
    OrderSessionItem {
        uuid: Uuid::now_v7(),
        product_uuid: Uuid::now_v7(),
        variant_uuid: None,
        name: name.to_string(),
        unit_price: 450,
        quantity: 1,
        tax_rate: 2000,
    }
}

pub(crate) fn make_session(status: OrderSessionStatus, items: Vec<OrderSessionItem>) -> OrderSession {
    OrderSession {
        uuid: OrderSessionUuid::new(),
        user_uuid: TEST_USER_UUID,
        items,
        status,
        completion: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        logout_at: (status == OrderSessionStatus::PendingLogout).then_some(Timestamp::UNIX_EPOCH),
        completed_at: (status == OrderSessionStatus::Completed).then_some(Timestamp::UNIX_EPOCH),
    }
}
