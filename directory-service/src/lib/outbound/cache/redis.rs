use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::Deserialize;
use serde::Serialize;

use crate::contact::errors::CacheError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::PhoneNumber;
use crate::domain::contact::ports::ContactCache;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

const COLLECTION_KEY: &str = "contact_list";

fn contact_key(id: ContactId) -> String {
    format!("contact_{}", id)
}

/// Serializable contact snapshot for cache storage.
///
/// Infrastructure representation; domain entities never cross the wire
/// undecoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContactRecord {
    id: i64,
    name: String,
    email: String,
    phone: String,
    owner_id: i64,
}

impl From<&Contact> for ContactRecord {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.0,
            name: contact.name.clone(),
            email: contact.email.as_str().to_string(),
            phone: contact.phone.as_str().to_string(),
            owner_id: contact.owner_id.0,
        }
    }
}

impl TryFrom<ContactRecord> for Contact {
    type Error = CacheError;

    fn try_from(record: ContactRecord) -> Result<Self, Self::Error> {
        Ok(Contact {
            id: ContactId(record.id),
            name: record.name,
            email: EmailAddress::new(record.email)
                .map_err(|e| CacheError::Serialization(e.to_string()))?,
            phone: PhoneNumber::new(record.phone)
                .map_err(|e| CacheError::Serialization(e.to_string()))?,
            owner_id: UserId(record.owner_id),
        })
    }
}

fn decode_contact(payload: &[u8]) -> Option<Contact> {
    serde_json::from_slice::<ContactRecord>(payload)
        .ok()
        .and_then(|record| Contact::try_from(record).ok())
}

fn decode_collection(payload: &[u8]) -> Option<Vec<Contact>> {
    serde_json::from_slice::<Vec<ContactRecord>>(payload)
        .ok()
        .and_then(|records| {
            records
                .into_iter()
                .map(Contact::try_from)
                .collect::<Result<Vec<_>, _>>()
                .ok()
        })
}

/// Redis-backed contact cache.
///
/// Owns the byte-level contract with the shared cache: the `contact_list`
/// collection key, per-entry `contact_{id}` keys, and the configured TTL
/// applied on every write. Entries that no longer decode are evicted and
/// reported as misses, never returned as data.
pub struct RedisContactCache {
    connection: ConnectionManager,
    ttl: Duration,
}

impl RedisContactCache {
    /// Create a new cache over a shared Redis connection.
    ///
    /// # Arguments
    /// * `connection` - Multiplexed connection shared across requests
    /// * `ttl` - Time-to-live applied to every entry
    pub fn new(connection: ConnectionManager, ttl: Duration) -> Self {
        Self { connection, ttl }
    }

    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut connection = self.connection.clone();
        connection
            .get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn write(&self, key: &str, payload: Vec<u8>) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        connection
            .set_ex::<_, _, ()>(key, payload, self.ttl.as_secs())
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        connection
            .del::<_, ()>(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}

#[async_trait]
impl ContactCache for RedisContactCache {
    async fn get(&self, id: ContactId) -> Result<Option<Contact>, CacheError> {
        let key = contact_key(id);
        let payload = match self.read(&key).await? {
            Some(payload) => payload,
            None => return Ok(None),
        };

        match decode_contact(&payload) {
            Some(contact) => Ok(Some(contact)),
            None => {
                self.remove(&key).await?;
                Ok(None)
            }
        }
    }

    async fn put(&self, contact: &Contact) -> Result<(), CacheError> {
        let payload = serde_json::to_vec(&ContactRecord::from(contact))
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.write(&contact_key(contact.id), payload).await
    }

    async fn evict(&self, id: ContactId) -> Result<(), CacheError> {
        self.remove(&contact_key(id)).await
    }

    async fn get_all(&self) -> Result<Option<Vec<Contact>>, CacheError> {
        let payload = match self.read(COLLECTION_KEY).await? {
            Some(payload) => payload,
            None => return Ok(None),
        };

        match decode_collection(&payload) {
            Some(contacts) => Ok(Some(contacts)),
            None => {
                self.remove(COLLECTION_KEY).await?;
                Ok(None)
            }
        }
    }

    async fn put_all(&self, contacts: &[Contact]) -> Result<(), CacheError> {
        let records: Vec<ContactRecord> = contacts.iter().map(ContactRecord::from).collect();
        let payload = serde_json::to_vec(&records)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.write(COLLECTION_KEY, payload).await
    }

    async fn evict_all(&self) -> Result<(), CacheError> {
        self.remove(COLLECTION_KEY).await
    }
}
