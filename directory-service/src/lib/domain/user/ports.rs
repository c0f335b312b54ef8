use async_trait::async_trait;

use crate::domain::user::events::UserRegisteredEvent;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::EmailNotifierError;
use crate::user::errors::EventPublisherError;
use crate::user::errors::UserError;

/// Port for identity operations: registration, login, and the
/// password-reset token lifecycle.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated registration data
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered (first write wins)
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Authenticate by email and password and issue a bearer token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller; both surface as `InvalidCredentials`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such email or password mismatch
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedUser, UserError>;

    /// Issue a password-reset token and mail it to the user.
    ///
    /// # Returns
    /// False when no user has the given email; true once the token is
    /// persisted. Email delivery failure does not roll the token back.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn forget_password(&self, email: &str) -> Result<bool, UserError>;

    /// Consume a reset token and set a new password.
    ///
    /// Single-use: a consumed or expired token never succeeds again.
    ///
    /// # Returns
    /// True when the token matched an unexpired record and the password
    /// was replaced; false otherwise.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<bool, UserError>;
}

/// Persistence operations for the user aggregate. System of record for
/// identities.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user and return it with its assigned id.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address (exact match).
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve the user holding the given reset token string, if any.
    ///
    /// Expiry is not evaluated here; the domain service decides whether a
    /// matching token is still alive.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, UserError>;

    /// Persist mutated password-hash and reset-token fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn save(&self, user: &User) -> Result<(), UserError>;
}

/// Event publishing for identity domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publish a user registration event.
    ///
    /// # Errors
    /// * `SerializationFailed` - Event serialization failed
    /// * `PublishFailed` - Failed to publish to broker
    async fn publish_user_registered(
        &self,
        event: &UserRegisteredEvent,
    ) -> Result<(), EventPublisherError>;
}

/// Outbound email notification, fire-and-forget from the domain's
/// perspective.
#[async_trait]
pub trait EmailNotifier: Send + Sync + 'static {
    /// Send a plain-text email.
    ///
    /// # Errors
    /// * `InvalidRecipient` - Recipient address failed to parse
    /// * `SendFailed` - Transport-level delivery failure
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailNotifierError>;
}
