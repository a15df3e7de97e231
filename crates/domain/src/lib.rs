mod notification;
mod reminder;
mod shared;
mod subscription;

pub use notification::{NotificationPayload, MAX_PAYLOAD_BYTES};
pub use reminder::{
    validate_reminder_input, ReminderStatus, ReminderValidationError, ScheduledReminder,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use subscription::{PushSubscription, SubscriptionKeys};
