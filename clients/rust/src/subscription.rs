use crate::{APIResponse, BaseClient};
use push_reminder_api_structs::*;
use push_reminder_domain::PushSubscription;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SubscriptionClient {
    base: Arc<BaseClient>,
}

impl SubscriptionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn subscribe(
        &self,
        subscription: &PushSubscription,
    ) -> APIResponse<subscribe::APIResponse> {
        self.base
            .post(subscription, "subscribe".into(), StatusCode::OK)
            .await
    }
}
