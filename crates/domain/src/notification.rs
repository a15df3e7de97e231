use crate::ScheduledReminder;
use serde::{Deserialize, Serialize};

/// Largest encoded payload that fits the single 4096 byte record a push
/// service accepts, once the encryption header, padding delimiter and tag are added
pub const MAX_PAYLOAD_BYTES: usize = 3993;

/// The message pushed to every subscription when a reminder is delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

impl NotificationPayload {
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    pub fn for_reminder(title: &str, reminder: &ScheduledReminder) -> Self {
        Self::new(title, &reminder.text)
    }

    /// Whether the encoded payload can be pushed at all
    pub fn fits_push_record(&self) -> bool {
        self.to_bytes()
            .map(|bytes| bytes.len() <= MAX_PAYLOAD_BYTES)
            .unwrap_or(false)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
