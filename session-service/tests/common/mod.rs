#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use session_service::config::SessionConfig;
use session_service::domain::session::service::SessionService;
use session_service::inbound::http::router::create_router;
use session_service::session::errors::SessionError;
use session_service::session::models::RefreshTokenRecord;
use session_service::session::ports::RefreshTokenRepository;
use session_service::user::errors::UserError;
use session_service::user::models::EmailAddress;
use session_service::user::models::UserCredentials;
use session_service::user::models::UserId;
use session_service::user::ports::UserRepository;
use tokio::sync::RwLock;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub type TestSessionService =
    SessionService<InMemoryUserRepository, InMemoryRefreshTokenRepository>;

/// User store keyed by email
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, UserCredentials>>,
}

impl InMemoryUserRepository {
    pub async fn insert(&self, user: UserCredentials) {
        self.users
            .write()
            .await
            .insert(user.email.as_str().to_string(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserError> {
        Ok(self.users.read().await.get(email.as_str()).cloned())
    }
}

/// Refresh token store keyed by token
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    records: RwLock<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenRepository {
    pub async fn get(&self, token: &str) -> Option<RefreshTokenRecord> {
        self.records.read().await.get(token).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError> {
        Ok(self.get(token).await)
    }

    async fn save(&self, record: RefreshTokenRecord) -> Result<(), SessionError> {
        self.records
            .write()
            .await
            .insert(record.token.clone(), record);
        Ok(())
    }

    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<(), SessionError> {
        if let Some(record) = self.records.write().await.get_mut(token) {
            record.revoke(revoked_at);
        }
        Ok(())
    }
}

/// Session service wired to in-memory stores
pub struct TestSession {
    pub service: Arc<TestSessionService>,
    pub users: Arc<InMemoryUserRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub authenticator: Arc<Authenticator>,
}

impl TestSession {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::default());
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, Duration::hours(1)));

        let service = Arc::new(SessionService::new(
            Arc::clone(&users),
            Arc::clone(&refresh_tokens),
            Arc::clone(&authenticator),
            &SessionConfig::default(),
        ));

        Self {
            service,
            users,
            refresh_tokens,
            authenticator,
        }
    }

    /// Register an account and return its id
    pub async fn seed_user(&self, email: &str, password: &str) -> UserId {
        let user = UserCredentials {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).expect("Invalid test email"),
            password_hash: self
                .authenticator
                .hash_password(password)
                .expect("Failed to hash password"),
        };
        let id = user.id;
        self.users.insert(user).await;
        id
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub session: TestSession,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let session = TestSession::new();
        let router = create_router(session.service.clone());

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            port,
            session,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}
