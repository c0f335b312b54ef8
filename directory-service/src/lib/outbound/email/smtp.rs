use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Message;
use lettre::Tokio1Executor;

use crate::config::EmailConfig;
use crate::user::errors::EmailNotifierError;
use crate::user::ports::EmailNotifier;

/// SMTP-backed email notifier.
///
/// Delivery is best-effort from the domain's perspective; callers treat
/// failures as fire-and-forget.
pub struct SmtpEmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpEmailNotifier {
    /// Create a notifier from SMTP configuration.
    ///
    /// # Arguments
    /// * `config` - SMTP relay host, port, credentials, and sender address
    pub fn new(config: &EmailConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(
            "Initializing SMTP transport: host={}, port={}",
            &config.smtp_host,
            config.smtp_port
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        let sender: Mailbox = config.sender.parse()?;

        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl EmailNotifier for SmtpEmailNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailNotifierError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e: lettre::address::AddressError| {
                EmailNotifierError::InvalidRecipient(e.to_string())
            })?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| EmailNotifierError::SendFailed(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| EmailNotifierError::SendFailed(e.to_string()))
    }
}
