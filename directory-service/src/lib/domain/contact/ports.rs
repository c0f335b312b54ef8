use async_trait::async_trait;

use crate::domain::access::SessionClaims;
use crate::domain::contact::errors::CacheError;
use crate::domain::contact::errors::ContactError;
use crate::domain::contact::events::ContactCreatedEvent;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::models::UpdateContactCommand;
use crate::user::errors::EventPublisherError;

/// Port for contact directory operations.
///
/// Every operation resolves authorization against the caller's claims
/// before touching cache or store state.
#[async_trait]
pub trait ContactServicePort: Send + Sync + 'static {
    /// Retrieve the full contact collection (admin only).
    ///
    /// # Errors
    /// * `Forbidden` - Caller is not an admin
    /// * `DatabaseError` / `Cache` - Collaborator failure
    async fn list_contacts(&self, claims: &SessionClaims) -> Result<Vec<Contact>, ContactError>;

    /// Retrieve a single contact by id.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `Forbidden` - Caller is neither owner nor admin
    /// * `DatabaseError` / `Cache` - Collaborator failure
    async fn get_contact(
        &self,
        claims: &SessionClaims,
        id: ContactId,
    ) -> Result<Contact, ContactError>;

    /// Create a contact owned by the caller.
    ///
    /// # Errors
    /// * `DatabaseError` / `Cache` - Collaborator failure
    async fn create_contact(
        &self,
        claims: &SessionClaims,
        command: CreateContactCommand,
    ) -> Result<Contact, ContactError>;

    /// Replace a contact's fields, preserving ownership.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `Forbidden` - Caller is neither owner nor admin
    /// * `DatabaseError` / `Cache` - Collaborator failure
    async fn update_contact(
        &self,
        claims: &SessionClaims,
        id: ContactId,
        command: UpdateContactCommand,
    ) -> Result<Contact, ContactError>;

    /// Hard-delete a contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `Forbidden` - Caller is neither owner nor admin
    /// * `DatabaseError` / `Cache` - Collaborator failure
    async fn delete_contact(
        &self,
        claims: &SessionClaims,
        id: ContactId,
    ) -> Result<(), ContactError>;
}

/// Persistence operations for the contact aggregate. System of record for
/// contacts; the cache only ever mirrors it.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    /// Persist a new contact and return it with its assigned id.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn insert(&self, contact: NewContact) -> Result<Contact, ContactError>;

    /// Retrieve contact by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactError>;

    /// Retrieve the full contact set in canonical store order.
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn list_all(&self) -> Result<Vec<Contact>, ContactError>;

    /// Update an existing contact in storage.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `DatabaseError` - Store operation failed
    async fn update(&self, contact: &Contact) -> Result<(), ContactError>;

    /// Remove a contact from storage.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `DatabaseError` - Store operation failed
    async fn delete(&self, id: ContactId) -> Result<(), ContactError>;
}

/// Shared cache holding TTL-bounded snapshots of contacts.
///
/// Entries are non-authoritative mirrors of the store; implementations
/// must treat undecodable entries as absent, never as data.
#[async_trait]
pub trait ContactCache: Send + Sync + 'static {
    /// Look up a single cached contact.
    async fn get(&self, id: ContactId) -> Result<Option<Contact>, CacheError>;

    /// Store a single contact snapshot under the configured TTL.
    async fn put(&self, contact: &Contact) -> Result<(), CacheError>;

    /// Drop a single contact entry.
    async fn evict(&self, id: ContactId) -> Result<(), CacheError>;

    /// Look up the cached full collection.
    async fn get_all(&self) -> Result<Option<Vec<Contact>>, CacheError>;

    /// Store the full collection snapshot under the configured TTL.
    async fn put_all(&self, contacts: &[Contact]) -> Result<(), CacheError>;

    /// Drop the full collection entry.
    async fn evict_all(&self) -> Result<(), CacheError>;
}

/// Event publishing for contact domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publish a contact creation event.
    ///
    /// # Errors
    /// * `SerializationFailed` - Event serialization failed
    /// * `PublishFailed` - Failed to publish to broker
    async fn publish_contact_created(
        &self,
        event: &ContactCreatedEvent,
    ) -> Result<(), EventPublisherError>;
}
