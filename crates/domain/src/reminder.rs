use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// A `ScheduledReminder` is a text message that should be pushed to every
/// registered `PushSubscription` once `timestamp` has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReminder {
    pub id: ID,
    /// The body of the notification
    pub text: String,
    /// Millisecond timestamp at which the reminder should be delivered.
    /// A timestamp in the past means the reminder is delivered right away.
    pub timestamp: i64,
    /// Millisecond timestamp of when the reminder was accepted
    pub created_at: i64,
    pub status: ReminderStatus,
}

/// Lifecycle of a `ScheduledReminder`.
///
/// The only transitions are `Scheduled -> Sent` and `Scheduled -> Cancelled`,
/// the two terminal states never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Scheduled,
    Sent,
    Cancelled,
}

impl ReminderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Scheduled)
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            Self::Scheduled => "scheduled",
            Self::Sent => "sent",
            Self::Cancelled => "cancelled",
        };
        f.write_str(status)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderValidationError {
    #[error("A non empty `text` is required")]
    MissingText,
    #[error("A `timestamp` is required")]
    MissingTimestamp,
    #[error("The `text` is too long, the pushed notification can be at most {max} bytes")]
    TextTooLong { max: usize },
}

/// Checks that a reminder request carries both a message and a delivery time
pub fn validate_reminder_input(
    text: Option<&str>,
    timestamp: Option<i64>,
) -> Result<(), ReminderValidationError> {
    if text.map_or(true, str::is_empty) {
        return Err(ReminderValidationError::MissingText);
    }
    if timestamp.is_none() {
        return Err(ReminderValidationError::MissingTimestamp);
    }
    Ok(())
}

impl ScheduledReminder {
    pub fn new(
        text: Option<String>,
        timestamp: Option<i64>,
        created_at: i64,
    ) -> Result<Self, ReminderValidationError> {
        let text = text
            .filter(|text| !text.is_empty())
            .ok_or(ReminderValidationError::MissingText)?;
        let timestamp = timestamp.ok_or(ReminderValidationError::MissingTimestamp)?;
        Ok(Self {
            id: Default::default(),
            text,
            timestamp,
            created_at,
            status: ReminderStatus::Scheduled,
        })
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == ReminderStatus::Scheduled
    }

    /// Millis left until the reminder is due, zero or negative when it is overdue
    pub fn millis_until_due(&self, now: i64) -> i64 {
        self.timestamp - now
    }

    /// Returns `true` if the reminder went from scheduled to sent
    pub fn mark_sent(&mut self) -> bool {
        self.transition(ReminderStatus::Sent)
    }

    /// Returns `true` if the reminder went from scheduled to cancelled
    pub fn cancel(&mut self) -> bool {
        self.transition(ReminderStatus::Cancelled)
    }

    fn transition(&mut self, status: ReminderStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }
}

impl Entity for ScheduledReminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
