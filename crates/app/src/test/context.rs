//! Test context for service-level integration tests.

use sqlx::{Connection, PgConnection, PgPool, query};

use crate::{
    database::Db,
    domain::{
        order_sessions::PgOrderSessionsService,
        users::{PgUsersService, UsersService, data::NewUser, records::UserUuid},
    },
    request::RequestContext,
};

use super::db::{SUPERUSER, SUPERUSER_PASSWORD, TestDb};

/// Non-superuser role the services connect as, so RLS policies apply.
const APP_ROLE: &str = "till_app_test";
const APP_ROLE_PASSWORD: &str = "till_app_test_pass";

pub struct TestContext {
    /// Superuser access for fixtures and assertions.
    pub db: TestDb,
    pub user_uuid: UserUuid,
    pub order_sessions: PgOrderSessionsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let app_pool = Self::setup_app_pool(&test_db).await;

        let mut ctx = Self {
            order_sessions: PgOrderSessionsService::new(Db::new(app_pool)),
            user_uuid: UserUuid::new(),
            db: test_db,
        };

        ctx.user_uuid = ctx.create_user("Front Till").await;

        ctx
    }

    /// A request acting as the default test user.
    pub fn request(&self) -> RequestContext {
        RequestContext::new(self.user_uuid, format!("test-{}", uuid::Uuid::now_v7()))
    }

    /// Create another user, e.g. for isolation tests.
    pub async fn create_user(&self, name: &str) -> UserUuid {
        let uuid = UserUuid::new();

        PgUsersService::new(self.db.pool().clone())
            .create_user(NewUser {
                uuid,
                name: name.to_string(),
            })
            .await
            .expect("Failed to create test user");

        uuid
    }

    /// Create the app role once per server and connect to the test database as it.
    async fn setup_app_pool(test_db: &TestDb) -> PgPool {
        let mut conn = PgConnection::connect(&test_db.superuser_url)
            .await
            .expect("Failed to connect to test database for role setup");

        // Parallel tests race on CREATE ROLE; an existing role is fine.
        let created = query(&format!(
            "CREATE ROLE {APP_ROLE} WITH LOGIN PASSWORD '{APP_ROLE_PASSWORD}' \
               NOSUPERUSER NOCREATEDB NOCREATEROLE NOBYPASSRLS"
        ))
        .execute(&mut conn)
        .await;

        match created {
            Ok(_) => {}
            Err(sqlx::Error::Database(ref e))
                if matches!(e.code().as_deref(), Some("42710" | "23505")) => {}
            Err(error) => panic!("Failed to create app role: {error}"),
        }

        for stmt in [
            format!("GRANT CONNECT ON DATABASE \"{}\" TO {APP_ROLE}", test_db.name),
            format!("GRANT USAGE ON SCHEMA public TO {APP_ROLE}"),
            format!(
                "GRANT SELECT, INSERT, UPDATE, DELETE ON ALL TABLES IN SCHEMA public TO {APP_ROLE}"
            ),
        ] {
            query(&stmt)
                .execute(&mut conn)
                .await
                .expect("Failed to grant privileges to app role");
        }

        conn.close()
            .await
            .expect("Failed to close role setup connection");

        let app_url = test_db.superuser_url.replacen(
            &format!("{SUPERUSER}:{SUPERUSER_PASSWORD}"),
            &format!("{APP_ROLE}:{APP_ROLE_PASSWORD}"),
            1,
        );

        PgPool::connect(&app_url)
            .await
            .expect("Failed to create app pool")
    }
}
