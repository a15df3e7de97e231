use crate::{APIResponse, BaseClient};
use push_reminder_api_structs::*;
use push_reminder_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub text: String,
    /// Millisecond timestamp of when the reminder should be pushed
    pub timestamp: i64,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            text: Some(input.text),
            timestamp: Some(input.timestamp),
        };
        self.base
            .post(body, "schedule".into(), StatusCode::OK)
            .await
    }

    pub async fn get_all(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("scheduled".into(), StatusCode::OK).await
    }

    pub async fn cancel(&self, reminder_id: &ID) -> APIResponse<cancel_reminder::APIResponse> {
        self.base
            .delete(format!("scheduled/{}", reminder_id), StatusCode::OK)
            .await
    }
}
