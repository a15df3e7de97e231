mod inmemory;
mod web_push;

use push_reminder_domain::{NotificationPayload, PushSubscription};
use thiserror::Error;

pub use inmemory::{InMemoryPushSender, PushAttempt};
pub use web_push::{VapidKeyError, WebPushSender};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PushError {
    #[error("The subscription no longer exists, the push service responded with status: {0}")]
    Gone(u16),
    #[error("The subscription can not be delivered to: {0}")]
    InvalidSubscription(String),
    #[error("The push service rejected the message with status: {status} and body: {body}")]
    Rejected { status: u16, body: String },
    #[error("Unable to reach the push service: {0}")]
    Transport(String),
    #[error("Unable to encrypt the message: {0}")]
    Encryption(String),
}

impl PushError {
    /// Permanent errors mean the subscription should be forgotten
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Gone(_) | Self::InvalidSubscription(_))
    }
}

/// Maps the response status of a push service to the outcome of the push
pub fn classify_response(status: u16, body: String) -> Result<(), PushError> {
    match status {
        200..=299 => Ok(()),
        404 | 410 => Err(PushError::Gone(status)),
        _ => Err(PushError::Rejected { status, body }),
    }
}

/// Delivers a notification to a single subscription
#[async_trait::async_trait]
pub trait IPushSender: Send + Sync {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &NotificationPayload,
    ) -> Result<(), PushError>;
}
