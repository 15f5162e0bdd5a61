//! Outbound Mail Transport
//!
//! SMTP mailer used by the contact route. When no SMTP host is configured
//! the mailer runs in no-op mode and only logs, so development setups do
//! not need mail infrastructure.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use thiserror::Error;

/// Mail transport configuration
#[derive(Debug, Clone, Default)]
pub struct MailConfig {
    /// SMTP host; empty string enables no-op mode
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    /// true: implicit TLS (465), false: STARTTLS
    pub smtp_secure: bool,
    /// Mailbox that receives contact mail (also the envelope sender)
    pub inbox: String,
}

/// Mail transport errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail configuration: {0}")]
    Config(String),

    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Failed to send mail: {0}")]
    Transport(String),
}

/// A contact-form submission to relay
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Async SMTP mailer (or no-op)
#[derive(Clone)]
pub struct Mailer {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    inbox: Mailbox,
}

impl Mailer {
    /// Build a mailer from configuration
    ///
    /// If the SMTP host is empty, operates in no-op mode (logs only).
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let inbox = config
            .inbox
            .parse::<Mailbox>()
            .map_err(|e| MailError::Config(format!("invalid inbox address: {e}")))?;

        let transport = if config.smtp_host.trim().is_empty() {
            tracing::warn!("SMTP host not configured; mailer will operate in no-op mode");
            None
        } else {
            let builder = if config.smtp_secure {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            }
            .map_err(|e| MailError::Config(format!("failed to configure SMTP transport: {e}")))?
            .port(config.smtp_port);

            let builder = if let (Some(username), Some(password)) =
                (&config.smtp_username, &config.smtp_password)
            {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, inbox })
    }

    /// Check if SMTP transport is enabled
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Relay a contact-form submission to the configured inbox
    ///
    /// The visitor's name/address go into the From display and the reply
    /// context inside the body, not the SMTP envelope.
    pub async fn send_contact(&self, contact: &ContactMessage) -> Result<(), MailError> {
        let body = format!(
            "{}\n\nFrom: {} ({})",
            contact.message, contact.name, contact.email
        );

        let message = Message::builder()
            .from(self.inbox.clone())
            .to(self.inbox.clone())
            .subject(contact.subject.as_str())
            .body(body)
            .map_err(|e| MailError::Address(e.to_string()))?;

        match &self.transport {
            Some(transport) => {
                transport
                    .send(message)
                    .await
                    .map_err(|e| MailError::Transport(e.to_string()))?;
                tracing::info!(subject = %contact.subject, "Contact mail sent");
                Ok(())
            }
            None => {
                tracing::info!(
                    subject = %contact.subject,
                    from = %contact.email,
                    "Mailer in no-op mode; contact mail not sent"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_config() -> MailConfig {
        MailConfig {
            inbox: "owner@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_host_is_noop() {
        let mailer = Mailer::new(&noop_config()).unwrap();
        assert!(!mailer.is_enabled());
    }

    #[test]
    fn test_invalid_inbox_rejected() {
        let config = MailConfig {
            inbox: "not an address".to_string(),
            ..Default::default()
        };
        assert!(matches!(Mailer::new(&config), Err(MailError::Config(_))));
    }

    #[tokio::test]
    async fn test_noop_send_succeeds() {
        let mailer = Mailer::new(&noop_config()).unwrap();
        let contact = ContactMessage {
            name: "Visitor".to_string(),
            email: "visitor@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Hi there".to_string(),
        };
        assert!(mailer.send_contact(&contact).await.is_ok());
    }
}
