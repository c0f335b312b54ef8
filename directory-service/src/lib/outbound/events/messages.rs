use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::contact::events::ContactCreatedEvent;
use crate::domain::user::events::UserRegisteredEvent;

/// Serializable envelope for all directory events.
///
/// Infrastructure representation for event publishing (Kafka, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DirectoryEventMessage {
    UserRegistered(UserRegisteredMessage),
    ContactCreated(ContactCreatedMessage),
}

/// Serializable message for UserRegistered domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegisteredMessage {
    pub event_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub occurred_at: DateTime<Utc>,
}

impl From<&UserRegisteredEvent> for UserRegisteredMessage {
    fn from(event: &UserRegisteredEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            user_id: event.user_id.clone(),
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            email: event.email.clone(),
            occurred_at: event.occurred_at,
        }
    }
}

impl From<&UserRegisteredEvent> for DirectoryEventMessage {
    fn from(event: &UserRegisteredEvent) -> Self {
        DirectoryEventMessage::UserRegistered(UserRegisteredMessage::from(event))
    }
}

/// Serializable message for ContactCreated domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCreatedMessage {
    pub event_id: String,
    pub contact_id: String,
    pub name: String,
    pub email: String,
    pub owner_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl From<&ContactCreatedEvent> for ContactCreatedMessage {
    fn from(event: &ContactCreatedEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            contact_id: event.contact_id.clone(),
            name: event.name.clone(),
            email: event.email.clone(),
            owner_id: event.owner_id.clone(),
            occurred_at: event.occurred_at,
        }
    }
}

impl From<&ContactCreatedEvent> for DirectoryEventMessage {
    fn from(event: &ContactCreatedEvent) -> Self {
        DirectoryEventMessage::ContactCreated(ContactCreatedMessage::from(event))
    }
}
