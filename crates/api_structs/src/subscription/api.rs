use crate::shared::SuccessResponse;

pub mod subscribe {
    use super::*;

    /// The subscription exactly as handed out by the browser
    pub type RequestBody = push_reminder_domain::PushSubscription;

    pub type APIResponse = SuccessResponse;
}
