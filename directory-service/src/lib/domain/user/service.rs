use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::SessionClaims;
use crate::domain::user::events::UserRegisteredEvent;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PasswordResetToken;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::EmailNotifier;
use crate::user::ports::EventPublisher;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for identity operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// The signing secret lives inside the injected authenticator; nothing in
/// here reads ambient global state.
pub struct UserService<UR, EP, EN>
where
    UR: UserRepository,
    EP: EventPublisher,
    EN: EmailNotifier,
{
    repository: Arc<UR>,
    event_publisher: Arc<EP>,
    email_notifier: Arc<EN>,
    authenticator: Arc<auth::Authenticator>,
    token_validity_hours: i64,
}

impl<UR, EP, EN> UserService<UR, EP, EN>
where
    UR: UserRepository,
    EP: EventPublisher,
    EN: EmailNotifier,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `event_publisher` - Domain event publishing implementation
    /// * `email_notifier` - Outbound email implementation
    /// * `authenticator` - Shared password-hashing and token-signing handle
    /// * `token_validity_hours` - Bearer token lifetime
    pub fn new(
        repository: Arc<UR>,
        event_publisher: Arc<EP>,
        email_notifier: Arc<EN>,
        authenticator: Arc<auth::Authenticator>,
        token_validity_hours: i64,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            email_notifier,
            authenticator,
            token_validity_hours,
        }
    }
}

#[async_trait]
impl<UR, EP, EN> UserServicePort for UserService<UR, EP, EN>
where
    UR: UserRepository,
    EP: EventPublisher,
    EN: EmailNotifier,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password);

        let created_user = self
            .repository
            .create(NewUser {
                first_name: command.first_name,
                last_name: command.last_name,
                email: command.email,
                password_hash,
                role: command.role,
            })
            .await?;

        let event = UserRegisteredEvent::new(&created_user);
        if let Err(e) = self.event_publisher.publish_user_registered(&event).await {
            tracing::error!(
                "Failed to publish UserRegistered event for user {}: {}",
                created_user.id,
                e
            );
        }

        Ok(created_user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, UserError> {
        // Unknown email and bad password collapse into one outcome so the
        // response cannot be used as an account oracle.
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self
            .authenticator
            .verify_password(password, &user.password_hash)
        {
            return Err(UserError::InvalidCredentials);
        }

        let claims = SessionClaims::for_user(&user, self.token_validity_hours);
        let token = self
            .authenticator
            .generate_token(&claims)
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        Ok(AuthenticatedUser { user, token })
    }

    async fn forget_password(&self, email: &str) -> Result<bool, UserError> {
        let mut user = match self.repository.find_by_email(email).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        let reset = PasswordResetToken::issue();
        let body = format!("Reset Token:\n{}", reset.token);
        user.reset_token = Some(reset);
        self.repository.save(&user).await?;

        // Delivery failure is not rolled back; the token stays valid and
        // the operation still reports success.
        if let Err(e) = self
            .email_notifier
            .send(user.email.as_str(), "Reset Password", &body)
            .await
        {
            tracing::error!(
                "Failed to send reset email to user {}: {}",
                user.id,
                e
            );
        }

        Ok(true)
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<bool, UserError> {
        let mut user = match self.repository.find_by_reset_token(token).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        // An expired-but-matching token is indistinguishable from no match.
        let alive = user
            .reset_token
            .as_ref()
            .map_or(false, |t| t.token == token && !t.is_expired(Utc::now()));
        if !alive {
            return Ok(false);
        }

        user.password_hash = self.authenticator.hash_password(new_password);
        user.reset_token = None;
        self.repository.save(&user).await?;

        Ok(true)
    }
}
