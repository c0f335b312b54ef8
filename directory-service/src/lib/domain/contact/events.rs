use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::contact::models::Contact;

/// Domain event published when a contact is created.
///
/// Fire-and-forget: a publish failure never rolls back the creation.
#[derive(Debug, Clone)]
pub struct ContactCreatedEvent {
    pub event_id: String,
    pub contact_id: String,
    pub name: String,
    pub email: String,
    pub owner_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl ContactCreatedEvent {
    /// Create a new ContactCreated event from a contact entity.
    pub fn new(contact: &Contact) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            contact_id: contact.id.to_string(),
            name: contact.name.clone(),
            email: contact.email.as_str().to_string(),
            owner_id: contact.owner_id.to_string(),
            occurred_at: Utc::now(),
        }
    }
}
