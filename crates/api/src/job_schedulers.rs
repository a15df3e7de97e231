use crate::{
    reminder::send_reminder::SendReminderUseCase,
    shared::usecase::execute,
    subscription::remove_subscription::RemoveSubscriptionUseCase,
};
use push_reminder_infra::{DeliveryMessage, PushReminderContext};
use tracing::{info, warn};

/// Starts the single worker that handles everything posted to the delivery queue,
/// one message at a time.
pub fn start_delivery_worker(ctx: PushReminderContext) {
    let mut inbox = match ctx.take_delivery_inbox() {
        Some(inbox) => inbox,
        None => {
            warn!("The delivery worker has already been started");
            return;
        }
    };

    actix_web::rt::spawn(async move {
        while let Some(message) = inbox.next().await {
            handle_delivery_message(message, &ctx).await;
        }
    });
}

pub async fn handle_delivery_message(message: DeliveryMessage, ctx: &PushReminderContext) {
    match message {
        DeliveryMessage::ReminderDue(reminder_id) => {
            let usecase = SendReminderUseCase { reminder_id };
            // Failures are logged by the executor
            let _ = execute(usecase, ctx).await;
        }
        DeliveryMessage::SubscriptionGone(subscription) => {
            let usecase = RemoveSubscriptionUseCase { subscription };
            let _ = execute(usecase, ctx).await;
        }
    }
}

/// Arms a timer for every reminder that is still scheduled. Reminders that
/// became due while the server was down are delivered right away.
pub async fn restore_reminder_timers(ctx: &PushReminderContext) -> usize {
    let reminders = ctx.repos.reminders.find_scheduled().await;
    let armed = ctx.timers.restore_all(&reminders);
    info!("Restored the timers of {} scheduled reminders", armed);
    armed
}
