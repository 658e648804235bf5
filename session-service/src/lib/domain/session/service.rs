use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::RefreshTokenIssuer;
use chrono::Duration;
use chrono::Utc;

use crate::config::SessionConfig;
use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::RefreshTokenRecord;
use crate::session::models::RefreshTokenState;
use crate::session::models::Session;
use crate::session::ports::RefreshTokenRepository;
use crate::session::ports::SessionServicePort;
use crate::user::models::EmailAddress;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for session operations.
///
/// Concrete implementation of SessionServicePort with dependency injection.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    authenticator: Arc<Authenticator>,
    refresh_token_ttl: Duration,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User lookup implementation
    /// * `refresh_tokens` - Refresh token persistence implementation
    /// * `authenticator` - Password, access token and refresh token primitives
    /// * `config` - Session settings
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator,
            refresh_token_ttl: config.refresh_token_ttl(),
        }
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = match EmailAddress::new(command.email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            return Err(self.authenticator.reject(&command.password).into());
        };

        let tokens = self.authenticator.authenticate(
            &command.password,
            &user.password_hash,
            user.id.0,
        )?;

        let record = RefreshTokenRecord::issue(
            tokens.refresh_token.clone(),
            user.id,
            Utc::now(),
            self.refresh_token_ttl,
        )
        .ok_or(SessionError::LifetimeOutOfRange)?;
        self.refresh_tokens.save(record).await?;

        Ok(Session {
            user_id: user.id,
            email: user.email,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        if !RefreshTokenIssuer::is_well_formed(refresh_token) {
            return Err(SessionError::Unauthorized);
        }

        let record = self
            .refresh_tokens
            .find(refresh_token)
            .await?
            .ok_or(SessionError::Unauthorized)?;

        if record.state(Utc::now()) != RefreshTokenState::Active {
            return Err(SessionError::Unauthorized);
        }

        Ok(self.authenticator.generate_token(record.user_id.0)?)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        // Nothing that could have been issued, so nothing to revoke
        if !RefreshTokenIssuer::is_well_formed(refresh_token) {
            return Ok(());
        }

        self.refresh_tokens.revoke(refresh_token, Utc::now()).await
    }

    fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError> {
        let subject = self.authenticator.validate_token(access_token)?;
        Ok(UserId(subject))
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenError;
    use chrono::DateTime;
    use mockall::mock;

    use super::*;
    use crate::user::errors::UserError;
    use crate::user::models::UserCredentials;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn find_by_email(
                &self,
                email: &EmailAddress,
            ) -> Result<Option<UserCredentials>, UserError>;
        }
    }

    mock! {
        pub TestRefreshTokenRepository {}

        #[async_trait]
        impl RefreshTokenRepository for TestRefreshTokenRepository {
            async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, SessionError>;
            async fn save(&self, record: RefreshTokenRecord) -> Result<(), SessionError>;
            async fn revoke(
                &self,
                token: &str,
                revoked_at: DateTime<Utc>,
            ) -> Result<(), SessionError>;
        }
    }

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, Duration::hours(1)))
    }

    fn service(
        users: MockTestUserRepository,
        refresh_tokens: MockTestRefreshTokenRepository,
    ) -> SessionService<MockTestUserRepository, MockTestRefreshTokenRepository> {
        SessionService::new(
            Arc::new(users),
            Arc::new(refresh_tokens),
            authenticator(),
            &SessionConfig::default(),
        )
    }

    fn credentials(password: &str) -> UserCredentials {
        UserCredentials {
            id: UserId::new(),
            email: EmailAddress::new("walt@breakingbad.com".to_string()).unwrap(),
            password_hash: authenticator().hash_password(password).unwrap(),
        }
    }

    fn active_record(user_id: UserId) -> RefreshTokenRecord {
        RefreshTokenRecord::issue("ab".repeat(32), user_id, Utc::now(), Duration::days(60))
            .expect("Failed to issue record")
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = credentials("04234");
        let user_id = user.id;

        users
            .expect_find_by_email()
            .withf(|email| email.as_str() == "walt@breakingbad.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        refresh_tokens
            .expect_save()
            .withf(move |record| {
                record.user_id == user_id
                    && record.token.len() == 64
                    && record.revoked_at.is_none()
                    && record.expires_at - record.created_at == Duration::days(60)
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = service(users, refresh_tokens);

        let session = service
            .login(LoginCommand::new(
                "walt@breakingbad.com".to_string(),
                "04234".to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(session.user_id, user_id);
        assert_eq!(session.refresh_token.len(), 64);
        assert_eq!(service.authenticate(&session.access_token).unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = credentials("04234");
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        refresh_tokens.expect_save().times(0);

        let service = service(users, refresh_tokens);

        let result = service
            .login(LoginCommand::new(
                "walt@breakingbad.com".to_string(),
                "wrong".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        refresh_tokens.expect_save().times(0);

        let service = service(users, refresh_tokens);

        let result = service
            .login(LoginCommand::new(
                "saul@bettercall.com".to_string(),
                "04234".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_malformed_email_skips_lookup() {
        let mut users = MockTestUserRepository::new();
        let refresh_tokens = MockTestRefreshTokenRepository::new();

        users.expect_find_by_email().times(0);

        let service = service(users, refresh_tokens);

        let result = service
            .login(LoginCommand::new("not-an-email".to_string(), "04234".to_string()))
            .await;

        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_database_error() {
        let mut users = MockTestUserRepository::new();
        let refresh_tokens = MockTestRefreshTokenRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));

        let service = service(users, refresh_tokens);

        let result = service
            .login(LoginCommand::new(
                "walt@breakingbad.com".to_string(),
                "04234".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(SessionError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_login_refresh_lifetime_out_of_range() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = credentials("04234");
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        refresh_tokens.expect_save().times(0);

        let service = SessionService::new(
            Arc::new(users),
            Arc::new(refresh_tokens),
            authenticator(),
            &SessionConfig {
                refresh_token_ttl_days: 1_000_000_000,
            },
        );

        let result = service
            .login(LoginCommand::new(
                "walt@breakingbad.com".to_string(),
                "04234".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(SessionError::LifetimeOutOfRange)));
    }

    #[tokio::test]
    async fn test_login_save_failure_is_surfaced() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = credentials("04234");
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        refresh_tokens
            .expect_save()
            .times(1)
            .returning(|_| Err(SessionError::DatabaseError("disk full".to_string())));

        let service = service(users, refresh_tokens);

        let result = service
            .login(LoginCommand::new(
                "walt@breakingbad.com".to_string(),
                "04234".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(SessionError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user_id = UserId::new();
        let record = active_record(user_id);
        let token = record.token.clone();

        refresh_tokens
            .expect_find()
            .withf(|token| token == "ab".repeat(32))
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        refresh_tokens.expect_revoke().times(0);

        let service = service(users, refresh_tokens);

        let access_token = service.refresh(&token).await.unwrap();
        assert_eq!(service.authenticate(&access_token).unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_refresh_unknown_token() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        refresh_tokens
            .expect_find()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(users, refresh_tokens);

        let result = service.refresh(&"cd".repeat(32)).await;
        assert!(matches!(result, Err(SessionError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_refresh_revoked_token() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let mut record = active_record(UserId::new());
        record.revoke(Utc::now());

        refresh_tokens
            .expect_find()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(users, refresh_tokens);

        let result = service.refresh(&"ab".repeat(32)).await;
        assert!(matches!(result, Err(SessionError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_refresh_expired_token() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let record = RefreshTokenRecord::issue(
            "ab".repeat(32),
            UserId::new(),
            Utc::now() - Duration::days(61),
            Duration::days(60),
        )
        .expect("Failed to issue record");

        refresh_tokens
            .expect_find()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(users, refresh_tokens);

        let result = service.refresh(&"ab".repeat(32)).await;
        assert!(matches!(result, Err(SessionError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_refresh_malformed_token_skips_lookup() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        refresh_tokens.expect_find().times(0);

        let service = service(users, refresh_tokens);

        let result = service.refresh("abc.def.ghi").await;
        assert!(matches!(result, Err(SessionError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_revoke_delegates_to_repository() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        refresh_tokens
            .expect_revoke()
            .withf(|token, _| token == "ab".repeat(32))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(users, refresh_tokens);

        assert!(service.revoke(&"ab".repeat(32)).await.is_ok());
    }

    #[tokio::test]
    async fn test_revoke_malformed_token_is_noop() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        refresh_tokens.expect_revoke().times(0);

        let service = service(users, refresh_tokens);

        assert!(service.revoke("garbage").await.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_garbage() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestRefreshTokenRepository::new(),
        );

        let result = service.authenticate("invalid.token.here");
        assert!(matches!(
            result,
            Err(SessionError::Token(TokenError::Invalid))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_rejects_foreign_key() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestRefreshTokenRepository::new(),
        );
        let foreign = Authenticator::new(
            b"another-secret-key-for-jwt-signing-32-bytes",
            Duration::hours(1),
        );

        let token = foreign.generate_token(UserId::new().0).unwrap();

        assert!(matches!(
            service.authenticate(&token),
            Err(SessionError::Token(TokenError::Invalid))
        ));
    }
}
