use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::User;

/// Domain event published when a new user registers.
///
/// Contains a snapshot of the identity at registration time for downstream
/// consumers. Publication is fire-and-forget; registration never rolls back
/// on a publish failure.
#[derive(Debug, Clone)]
pub struct UserRegisteredEvent {
    pub event_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub occurred_at: DateTime<Utc>,
}

impl UserRegisteredEvent {
    /// Create a new UserRegistered event from a user entity.
    ///
    /// Generates a unique event ID and extracts user data for serialization.
    pub fn new(user: &User) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            user_id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.as_str().to_string(),
            occurred_at: Utc::now(),
        }
    }
}
