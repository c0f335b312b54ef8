use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use rdkafka::util::Timeout;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::domain::contact::events::ContactCreatedEvent;
use crate::domain::contact::ports::EventPublisher as ContactEventPublisher;
use crate::domain::user::events::UserRegisteredEvent;
use crate::domain::user::ports::EventPublisher as UserEventPublisher;
use crate::outbound::events::messages::DirectoryEventMessage;
use crate::user::errors::EventPublisherError;

#[derive(Debug, Error)]
pub enum KafkaProducerError {
    #[error("Failed to send message to Kafka: {0}")]
    SendError(String),

    #[error("Failed to serialize message: {0}")]
    SerializationError(String),
}

impl From<KafkaProducerError> for EventPublisherError {
    fn from(err: KafkaProducerError) -> Self {
        match err {
            KafkaProducerError::SerializationError(msg) => {
                EventPublisherError::SerializationFailed(msg)
            }
            KafkaProducerError::SendError(msg) => EventPublisherError::PublishFailed(msg),
        }
    }
}

pub struct KafkaEventProducer {
    producer: FutureProducer,
    topic: String,
    timeout: Duration,
}

impl KafkaEventProducer {
    /// Create a new Kafka event producer with "at least once" delivery semantics
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Notes:
    /// - `acks=all`: Wait for all in-sync replicas to acknowledge
    /// - `enable.idempotence=true`: Prevents duplicate messages during retries
    /// - `max.in.flight.requests.per.connection=5`: Allows pipelining with ordering guarantees
    /// - `retry.backoff.ms=100`: Backoff between retry attempts
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        tracing::info!(
            "Initializing Kafka producer for directory events: brokers={}, topic={}",
            &config.kafka.brokers,
            &config.kafka.topic
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.kafka.brokers)
            .set("message.timeout.ms", "30000")
            .set("queue.buffering.max.messages", "10000")
            .set("queue.buffering.max.kbytes", "1048576")
            .set("batch.num.messages", "100")
            .set("compression.type", "gzip")
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "10")
            .set("max.in.flight.requests.per.connection", "5")
            .set("retry.backoff.ms", "100")
            .create()?;

        tracing::info!("Kafka producer initialized successfully");

        Ok(Self {
            producer,
            topic: config.kafka.topic.to_string(),
            timeout: Duration::from_secs(30),
        })
    }

    /// Publish a domain event to Kafka with at-least-once delivery semantics
    ///
    /// Events are partitioned by the owning user's id so events for the
    /// same account stay ordered. The producer handles retries itself.
    async fn publish<T: Serialize>(
        &self,
        user_id: &str,
        event: &T,
    ) -> Result<(), KafkaProducerError> {
        let payload = serde_json::to_string(event)
            .map_err(|e| KafkaProducerError::SerializationError(e.to_string()))?;

        tracing::debug!(
            "Publishing event to topic '{}' (user_id: {})",
            self.topic,
            user_id
        );

        let record = FutureRecord::to(&self.topic)
            .key(user_id) // Partition by user_id for ordering
            .payload(&payload);

        self.producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map(|_| {
                tracing::debug!(
                    "Event published successfully to topic '{}' for user {}",
                    self.topic,
                    user_id
                );
            })
            .map_err(|(err, _)| {
                tracing::error!(
                    "Failed to publish event to Kafka after all retries: {}",
                    err
                );
                KafkaProducerError::SendError(err.to_string())
            })
    }
}

#[async_trait]
impl UserEventPublisher for KafkaEventProducer {
    async fn publish_user_registered(
        &self,
        event: &UserRegisteredEvent,
    ) -> Result<(), EventPublisherError> {
        // Convert domain event to serializable message
        let message = DirectoryEventMessage::from(event);

        self.publish(&event.user_id, &message).await.map_err(|e| {
            tracing::error!(
                "Failed to publish UserRegistered event for user {}: {}",
                event.user_id,
                e
            );
            e.into()
        })
    }
}

#[async_trait]
impl ContactEventPublisher for KafkaEventProducer {
    async fn publish_contact_created(
        &self,
        event: &ContactCreatedEvent,
    ) -> Result<(), EventPublisherError> {
        // Convert domain event to serializable message
        let message = DirectoryEventMessage::from(event);

        self.publish(&event.owner_id, &message).await.map_err(|e| {
            tracing::error!(
                "Failed to publish ContactCreated event for contact {}: {}",
                event.contact_id,
                e
            );
            e.into()
        })
    }
}
