use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Identity facts carried by a verified bearer token.
///
/// Never persisted; reconstructed per request from the token signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user's numeric id
    pub sub: i64,
    pub email: String,
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a user with an absolute expiry.
    ///
    /// # Arguments
    /// * `user` - Authenticated user entity
    /// * `validity_hours` - Hours until the token expires
    pub fn for_user(user: &User, validity_hours: i64) -> Self {
        Self {
            sub: user.id.0,
            email: user.email.as_str().to_string(),
            role: user.role,
            exp: (Utc::now() + Duration::hours(validity_hours)).timestamp(),
        }
    }

    /// The claimed user id as a domain identifier.
    pub fn user_id(&self) -> UserId {
        UserId(self.sub)
    }
}
