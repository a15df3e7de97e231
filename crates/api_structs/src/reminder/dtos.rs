use push_reminder_domain::{ReminderStatus, ScheduledReminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub text: String,
    pub timestamp: i64,
    pub created_at: i64,
    pub status: ReminderStatus,
}

impl ReminderDTO {
    pub fn new(reminder: ScheduledReminder) -> Self {
        Self {
            id: reminder.id,
            text: reminder.text,
            timestamp: reminder.timestamp,
            created_at: reminder.created_at,
            status: reminder.status,
        }
    }
}
