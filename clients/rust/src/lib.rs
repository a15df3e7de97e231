mod base;
mod reminder;
mod status;
mod subscription;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use push_reminder_api_structs::dtos::*;
pub use push_reminder_domain::{PushSubscription, ReminderStatus, ID};
use reminder::ReminderClient;
pub use reminder::CreateReminderInput;
use status::StatusClient;
use std::sync::Arc;
use subscription::SubscriptionClient;

// Domain
pub use push_reminder_api_structs::dtos::ReminderDTO as Reminder;

/// Push Reminder Server SDK
///
/// The SDK contains methods for interacting with the push reminder server
/// API.
#[derive(Clone)]
pub struct PushReminderSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub subscription: SubscriptionClient,
}

impl PushReminderSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let subscription = SubscriptionClient::new(base);

        Self {
            reminder,
            status,
            subscription,
        }
    }
}
