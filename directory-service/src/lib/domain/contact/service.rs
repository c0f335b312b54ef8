use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::policy;
use crate::domain::access::SessionClaims;
use crate::domain::contact::errors::ContactError;
use crate::domain::contact::events::ContactCreatedEvent;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::CreateContactCommand;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::models::UpdateContactCommand;
use crate::domain::contact::ports::ContactCache;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::contact::ports::ContactServicePort;
use crate::domain::contact::ports::EventPublisher;
use crate::domain::user::models::Role;

/// Cache-aside contact service.
///
/// The store is the system of record on every path; cache entries are
/// TTL-bounded mirrors. Writes go store-first, and cache state is only
/// touched after the store confirms. Between the two calls a racing
/// reader may see a stale entry; the window is bounded by the TTL and by
/// the invalidate-after-write ordering, and no cross-operation locking is
/// attempted.
pub struct ContactService<CR, CC, EP>
where
    CR: ContactRepository,
    CC: ContactCache,
    EP: EventPublisher,
{
    repository: Arc<CR>,
    cache: Arc<CC>,
    event_publisher: Arc<EP>,
}

impl<CR, CC, EP> ContactService<CR, CC, EP>
where
    CR: ContactRepository,
    CC: ContactCache,
    EP: EventPublisher,
{
    /// Create a new contact service with injected dependencies.
    pub fn new(repository: Arc<CR>, cache: Arc<CC>, event_publisher: Arc<EP>) -> Self {
        Self {
            repository,
            cache,
            event_publisher,
        }
    }

    /// Repopulate the collection entry from the store's canonical full set.
    ///
    /// Rebuilding from the store, rather than patching the cached list,
    /// keeps the collection entry byte-identical to what a cold read
    /// would produce.
    async fn refresh_collection(&self) -> Result<(), ContactError> {
        let contacts = self.repository.list_all().await?;
        self.cache.put_all(&contacts).await?;
        Ok(())
    }
}

#[async_trait]
impl<CR, CC, EP> ContactServicePort for ContactService<CR, CC, EP>
where
    CR: ContactRepository,
    CC: ContactCache,
    EP: EventPublisher,
{
    async fn list_contacts(&self, claims: &SessionClaims) -> Result<Vec<Contact>, ContactError> {
        if !policy::has_role(Some(claims), Role::Admin) {
            return Err(ContactError::Forbidden);
        }

        if let Some(contacts) = self.cache.get_all().await? {
            return Ok(contacts);
        }

        // Miss: resolve from the store before responding, then refill
        let contacts = self.repository.list_all().await?;
        self.cache.put_all(&contacts).await?;

        Ok(contacts)
    }

    async fn get_contact(
        &self,
        claims: &SessionClaims,
        id: ContactId,
    ) -> Result<Contact, ContactError> {
        let contact = match self.cache.get(id).await? {
            Some(contact) => contact,
            None => {
                let contact = self
                    .repository
                    .find_by_id(id)
                    .await?
                    .ok_or(ContactError::NotFound(id.0))?;

                // Found entries are cached; absence is never cached
                self.cache.put(&contact).await?;
                contact
            }
        };

        if !policy::can_access(Some(claims), contact.owner_id) {
            return Err(ContactError::Forbidden);
        }

        Ok(contact)
    }

    async fn create_contact(
        &self,
        claims: &SessionClaims,
        command: CreateContactCommand,
    ) -> Result<Contact, ContactError> {
        // Store first; a failed insert leaves the cache untouched
        let contact = self
            .repository
            .insert(NewContact {
                name: command.name,
                email: command.email,
                phone: command.phone,
                owner_id: claims.user_id(),
            })
            .await?;

        self.cache.put(&contact).await?;
        self.refresh_collection().await?;

        let event = ContactCreatedEvent::new(&contact);
        if let Err(e) = self.event_publisher.publish_contact_created(&event).await {
            tracing::error!(
                "Failed to publish ContactCreated event for contact {}: {}",
                contact.id,
                e
            );
        }

        Ok(contact)
    }

    async fn update_contact(
        &self,
        claims: &SessionClaims,
        id: ContactId,
        command: UpdateContactCommand,
    ) -> Result<Contact, ContactError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(id.0))?;

        if !policy::can_access(Some(claims), existing.owner_id) {
            return Err(ContactError::Forbidden);
        }

        let updated = Contact {
            id,
            name: command.name,
            email: command.email,
            phone: command.phone,
            owner_id: existing.owner_id,
        };
        self.repository.update(&updated).await?;

        // Collection is invalidated for lazy repopulation; the single
        // entry is refreshed so it never trails the store write above
        self.cache.evict_all().await?;
        self.cache.put(&updated).await?;

        Ok(updated)
    }

    async fn delete_contact(
        &self,
        claims: &SessionClaims,
        id: ContactId,
    ) -> Result<(), ContactError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(id.0))?;

        if !policy::can_access(Some(claims), existing.owner_id) {
            return Err(ContactError::Forbidden);
        }

        self.repository.delete(id).await?;

        self.cache.evict(id).await?;
        self.cache.evict_all().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::contact::errors::CacheError;
    use crate::domain::contact::models::PhoneNumber;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::user::errors::EventPublisherError;

    mock! {
        pub TestContactRepository {}

        #[async_trait]
        impl ContactRepository for TestContactRepository {
            async fn insert(&self, contact: NewContact) -> Result<Contact, ContactError>;
            async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactError>;
            async fn list_all(&self) -> Result<Vec<Contact>, ContactError>;
            async fn update(&self, contact: &Contact) -> Result<(), ContactError>;
            async fn delete(&self, id: ContactId) -> Result<(), ContactError>;
        }
    }

    mock! {
        pub TestContactCache {}

        #[async_trait]
        impl ContactCache for TestContactCache {
            async fn get(&self, id: ContactId) -> Result<Option<Contact>, CacheError>;
            async fn put(&self, contact: &Contact) -> Result<(), CacheError>;
            async fn evict(&self, id: ContactId) -> Result<(), CacheError>;
            async fn get_all(&self) -> Result<Option<Vec<Contact>>, CacheError>;
            async fn put_all(&self, contacts: &[Contact]) -> Result<(), CacheError>;
            async fn evict_all(&self) -> Result<(), CacheError>;
        }
    }

    mock! {
        pub TestEventPublisher {}

        #[async_trait]
        impl EventPublisher for TestEventPublisher {
            async fn publish_contact_created(&self, event: &ContactCreatedEvent) -> Result<(), EventPublisherError>;
        }
    }

    fn service(
        repository: MockTestContactRepository,
        cache: MockTestContactCache,
        event_publisher: MockTestEventPublisher,
    ) -> ContactService<MockTestContactRepository, MockTestContactCache, MockTestEventPublisher>
    {
        ContactService::new(Arc::new(repository), Arc::new(cache), Arc::new(event_publisher))
    }

    fn admin_claims() -> SessionClaims {
        SessionClaims {
            sub: 1,
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            exp: i64::MAX,
        }
    }

    fn user_claims(sub: i64) -> SessionClaims {
        SessionClaims {
            sub,
            email: format!("user{}@example.com", sub),
            role: Role::User,
            exp: i64::MAX,
        }
    }

    fn bob_contact(owner: i64) -> Contact {
        Contact {
            id: ContactId(10),
            name: "Bob".to_string(),
            email: EmailAddress::new("bob@x.com".to_string()).unwrap(),
            phone: PhoneNumber::new("1234567890".to_string()).unwrap(),
            owner_id: UserId(owner),
        }
    }

    fn create_command() -> CreateContactCommand {
        CreateContactCommand {
            name: "Bob".to_string(),
            email: EmailAddress::new("bob@x.com".to_string()).unwrap(),
            phone: PhoneNumber::new("1234567890".to_string()).unwrap(),
        }
    }

    fn update_command() -> UpdateContactCommand {
        UpdateContactCommand {
            name: "Bobby".to_string(),
            email: EmailAddress::new("bobby@x.com".to_string()).unwrap(),
            phone: PhoneNumber::new("0987654321".to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_contacts_served_from_cache() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        cache
            .expect_get_all()
            .times(1)
            .returning(|| Ok(Some(vec![bob_contact(2)])));
        // Cache hit never touches the store
        repository.expect_list_all().times(0);

        let service = service(repository, cache, event_publisher);

        let contacts = service.list_contacts(&admin_claims()).await.unwrap();
        assert_eq!(contacts, vec![bob_contact(2)]);
    }

    #[tokio::test]
    async fn test_list_contacts_miss_resolves_from_store_and_refills() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        cache.expect_get_all().times(1).returning(|| Ok(None));
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![bob_contact(2)]));
        cache
            .expect_put_all()
            .withf(|contacts| contacts == [bob_contact(2)])
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, cache, event_publisher);

        let contacts = service.list_contacts(&admin_claims()).await.unwrap();
        assert_eq!(contacts, vec![bob_contact(2)]);
    }

    #[tokio::test]
    async fn test_list_contacts_requires_admin() {
        let repository = MockTestContactRepository::new();
        let cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        let service = service(repository, cache, event_publisher);

        let result = service.list_contacts(&user_claims(2)).await;
        assert!(matches!(result.unwrap_err(), ContactError::Forbidden));
    }

    #[tokio::test]
    async fn test_get_contact_cache_hit() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        cache
            .expect_get()
            .with(eq(ContactId(10)))
            .times(1)
            .returning(|_| Ok(Some(bob_contact(2))));
        repository.expect_find_by_id().times(0);

        let service = service(repository, cache, event_publisher);

        let contact = service
            .get_contact(&user_claims(2), ContactId(10))
            .await
            .unwrap();
        assert_eq!(contact, bob_contact(2));
    }

    #[tokio::test]
    async fn test_get_contact_miss_refills_cache() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        cache.expect_get().times(1).returning(|_| Ok(None));
        repository
            .expect_find_by_id()
            .with(eq(ContactId(10)))
            .times(1)
            .returning(|_| Ok(Some(bob_contact(2))));
        cache
            .expect_put()
            .withf(|contact| *contact == bob_contact(2))
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, cache, event_publisher);

        let contact = service
            .get_contact(&user_claims(2), ContactId(10))
            .await
            .unwrap();
        assert_eq!(contact, bob_contact(2));
    }

    #[tokio::test]
    async fn test_get_contact_absence_is_not_cached() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        cache.expect_get().times(1).returning(|_| Ok(None));
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        // No negative caching of missing contacts
        cache.expect_put().times(0);

        let service = service(repository, cache, event_publisher);

        let result = service.get_contact(&user_claims(2), ContactId(10)).await;
        assert!(matches!(result.unwrap_err(), ContactError::NotFound(10)));
    }

    #[tokio::test]
    async fn test_get_contact_owner_and_admin_allowed_other_user_forbidden() {
        for (claims, allowed) in [
            (user_claims(2), true),
            (admin_claims(), true),
            (user_claims(3), false),
        ] {
            let repository = MockTestContactRepository::new();
            let mut cache = MockTestContactCache::new();
            let event_publisher = MockTestEventPublisher::new();

            cache
                .expect_get()
                .times(1)
                .returning(|_| Ok(Some(bob_contact(2))));

            let service = service(repository, cache, event_publisher);

            let result = service.get_contact(&claims, ContactId(10)).await;
            if allowed {
                assert!(result.is_ok());
            } else {
                assert!(matches!(result.unwrap_err(), ContactError::Forbidden));
            }
        }
    }

    #[tokio::test]
    async fn test_create_contact_owned_by_caller_and_caches() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let mut event_publisher = MockTestEventPublisher::new();

        repository
            .expect_insert()
            .withf(|contact| contact.owner_id == UserId(2) && contact.name == "Bob")
            .times(1)
            .returning(|contact| {
                Ok(Contact {
                    id: ContactId(10),
                    name: contact.name,
                    email: contact.email,
                    phone: contact.phone,
                    owner_id: contact.owner_id,
                })
            });

        cache
            .expect_put()
            .withf(|contact| contact.id == ContactId(10))
            .times(1)
            .returning(|_| Ok(()));
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![bob_contact(2)]));
        cache
            .expect_put_all()
            .withf(|contacts| contacts == [bob_contact(2)])
            .times(1)
            .returning(|_| Ok(()));

        event_publisher
            .expect_publish_contact_created()
            .withf(|event| event.contact_id == "10" && event.name == "Bob")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, cache, event_publisher);

        let contact = service
            .create_contact(&user_claims(2), create_command())
            .await
            .unwrap();
        assert_eq!(contact.id, ContactId(10));
        assert_eq!(contact.owner_id, UserId(2));
    }

    #[tokio::test]
    async fn test_create_contact_store_failure_leaves_cache_untouched() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let mut event_publisher = MockTestEventPublisher::new();

        repository
            .expect_insert()
            .times(1)
            .returning(|_| Err(ContactError::DatabaseError("insert failed".to_string())));
        cache.expect_put().times(0);
        cache.expect_put_all().times(0);
        event_publisher.expect_publish_contact_created().times(0);

        let service = service(repository, cache, event_publisher);

        let result = service.create_contact(&user_claims(2), create_command()).await;
        assert!(matches!(result.unwrap_err(), ContactError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_create_contact_survives_publish_failure() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let mut event_publisher = MockTestEventPublisher::new();

        repository.expect_insert().times(1).returning(|contact| {
            Ok(Contact {
                id: ContactId(10),
                name: contact.name,
                email: contact.email,
                phone: contact.phone,
                owner_id: contact.owner_id,
            })
        });
        cache.expect_put().times(1).returning(|_| Ok(()));
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![bob_contact(2)]));
        cache.expect_put_all().times(1).returning(|_| Ok(()));

        event_publisher
            .expect_publish_contact_created()
            .times(1)
            .returning(|_| {
                Err(EventPublisherError::PublishFailed(
                    "broker unreachable".to_string(),
                ))
            });

        let service = service(repository, cache, event_publisher);

        assert!(service
            .create_contact(&user_claims(2), create_command())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_contact_invalidates_collection_and_refreshes_entry() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_id()
            .with(eq(ContactId(10)))
            .times(1)
            .returning(|_| Ok(Some(bob_contact(2))));
        repository
            .expect_update()
            .withf(|contact| {
                contact.id == ContactId(10)
                    && contact.name == "Bobby"
                    && contact.owner_id == UserId(2)
            })
            .times(1)
            .returning(|_| Ok(()));

        cache.expect_evict_all().times(1).returning(|| Ok(()));
        cache
            .expect_put()
            .withf(|contact| contact.name == "Bobby" && contact.phone.as_str() == "0987654321")
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, cache, event_publisher);

        let updated = service
            .update_contact(&user_claims(2), ContactId(10), update_command())
            .await
            .unwrap();
        assert_eq!(updated.name, "Bobby");
        // Ownership survives the field replacement
        assert_eq!(updated.owner_id, UserId(2));
    }

    #[tokio::test]
    async fn test_update_contact_absent_id_is_not_found() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);
        cache.expect_evict_all().times(0);
        cache.expect_put().times(0);

        let service = service(repository, cache, event_publisher);

        let result = service
            .update_contact(&user_claims(2), ContactId(10), update_command())
            .await;
        assert!(matches!(result.unwrap_err(), ContactError::NotFound(10)));
    }

    #[tokio::test]
    async fn test_update_contact_other_user_forbidden() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(bob_contact(2))));
        repository.expect_update().times(0);
        cache.expect_evict_all().times(0);
        cache.expect_put().times(0);

        let service = service(repository, cache, event_publisher);

        let result = service
            .update_contact(&user_claims(3), ContactId(10), update_command())
            .await;
        assert!(matches!(result.unwrap_err(), ContactError::Forbidden));
    }

    #[tokio::test]
    async fn test_update_contact_store_failure_leaves_cache_untouched() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(bob_contact(2))));
        repository
            .expect_update()
            .times(1)
            .returning(|_| Err(ContactError::DatabaseError("update failed".to_string())));
        cache.expect_evict_all().times(0);
        cache.expect_put().times(0);

        let service = service(repository, cache, event_publisher);

        let result = service
            .update_contact(&user_claims(2), ContactId(10), update_command())
            .await;
        assert!(matches!(result.unwrap_err(), ContactError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_delete_contact_evicts_both_keys() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(bob_contact(2))));
        repository
            .expect_delete()
            .with(eq(ContactId(10)))
            .times(1)
            .returning(|_| Ok(()));

        cache
            .expect_evict()
            .with(eq(ContactId(10)))
            .times(1)
            .returning(|_| Ok(()));
        cache.expect_evict_all().times(1).returning(|| Ok(()));

        let service = service(repository, cache, event_publisher);

        assert!(service
            .delete_contact(&admin_claims(), ContactId(10))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_contact_store_failure_leaves_cache_untouched() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(bob_contact(2))));
        repository
            .expect_delete()
            .times(1)
            .returning(|_| Err(ContactError::DatabaseError("delete failed".to_string())));
        cache.expect_evict().times(0);
        cache.expect_evict_all().times(0);

        let service = service(repository, cache, event_publisher);

        let result = service.delete_contact(&user_claims(2), ContactId(10)).await;
        assert!(matches!(result.unwrap_err(), ContactError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_delete_contact_other_user_forbidden() {
        let mut repository = MockTestContactRepository::new();
        let mut cache = MockTestContactCache::new();
        let event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(bob_contact(2))));
        repository.expect_delete().times(0);
        cache.expect_evict().times(0);
        cache.expect_evict_all().times(0);

        let service = service(repository, cache, event_publisher);

        let result = service.delete_contact(&user_claims(3), ContactId(10)).await;
        assert!(matches!(result.unwrap_err(), ContactError::Forbidden));
    }
}
