//! Outbound mail delivery.
//!
//! Payload construction is separate from transport so the JSON shape is
//! testable without a network. The wire format is the SendGrid v3 send API;
//! any compatible endpoint works via [`Mailer::with_endpoint`].

use serde_json::{Value, json};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// Environment variable holding the delivery API key.
pub const API_KEY_VAR: &str = "SENDGRID_API_KEY";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail delivery request failed")]
    Transport(#[from] reqwest::Error),

    #[error("mail delivery rejected with status {status}")]
    Rejected { status: u16, body: String },
}

/// One outbound HTML message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl Message {
    /// SendGrid v3 request body.
    pub fn payload(&self) -> Value {
        json!({
            "personalizations": [{ "to": [{ "email": self.to }] }],
            "from": { "email": self.from },
            "subject": self.subject,
            "content": [{ "type": "text/html", "value": self.html_body }],
        })
    }
}

#[derive(Debug, Clone)]
pub struct Mailer {
    api_key: String,
    endpoint: String,
}

impl Mailer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Deliver one message, blocking until the endpoint answers.
    pub fn send(&self, message: &Message) -> Result<(), MailError> {
        let response = reqwest::blocking::Client::new()
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&message.payload())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        log::info!("mail to `{}` accepted with status {status}", message.to);
        Ok(())
    }
}
