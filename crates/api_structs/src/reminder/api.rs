use crate::dtos::ReminderDTO;
use crate::shared::SuccessResponse;
use push_reminder_domain::ScheduledReminder;
use serde::{Deserialize, Serialize};

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub text: Option<String>,
        pub timestamp: Option<i64>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub item: ReminderDTO,
    }

    impl APIResponse {
        pub fn new(reminder: ScheduledReminder) -> Self {
            Self {
                success: true,
                item: ReminderDTO::new(reminder),
            }
        }
    }
}

pub mod get_reminders {
    use super::*;

    /// Every reminder regardless of status, in the order they were created
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(transparent)]
    pub struct APIResponse(pub Vec<ReminderDTO>);

    impl APIResponse {
        pub fn new(reminders: Vec<ScheduledReminder>) -> Self {
            Self(reminders.into_iter().map(ReminderDTO::new).collect())
        }
    }
}

pub mod cancel_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: String,
    }

    pub type APIResponse = SuccessResponse;
}
