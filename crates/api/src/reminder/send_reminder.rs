use crate::shared::usecase::UseCase;
use push_reminder_domain::{NotificationPayload, PushSubscription, ID};
use push_reminder_infra::{DeliveryMessage, DeliveryOutbox, IPushSender, PushReminderContext};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pushes a due reminder to every registered subscription and marks it as sent
#[derive(Debug)]
pub struct SendReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseRes {
    /// The reminder was sent, `subscriptions` is how many pushes were started
    Sent { subscriptions: usize },
    /// The reminder is unknown or was cancelled before it became due
    Skipped,
}

async fn deliver(
    push: Arc<dyn IPushSender>,
    outbox: DeliveryOutbox,
    subscription: PushSubscription,
    payload: NotificationPayload,
) {
    match push.send(&subscription, &payload).await {
        Ok(()) => debug!("Pushed reminder to: {:?}", subscription.endpoint()),
        Err(e) if e.is_permanent() => {
            info!(
                "Subscription: {:?} can no longer be delivered to: {}",
                subscription.endpoint(),
                e
            );
            outbox.post(DeliveryMessage::SubscriptionGone(subscription));
        }
        Err(e) => warn!(
            "Push to: {:?} failed, keeping the subscription. Error: {}",
            subscription.endpoint(),
            e
        ),
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendReminderUseCase {
    type Response = UseCaseRes;

    type Error = ();

    const NAME: &'static str = "SendReminder";

    async fn execute(&mut self, ctx: &PushReminderContext) -> Result<Self::Response, Self::Error> {
        // Marking the reminder as sent decides the race with a cancel, so
        // nothing is pushed unless this call made the transition
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => ctx
                .repos
                .reminders
                .mark_sent(&reminder.id)
                .await
                .then_some(reminder),
            None => None,
        };
        let reminder = match reminder {
            Some(reminder) => reminder,
            None => {
                debug!("Reminder: {} is no longer scheduled", self.reminder_id);
                ctx.timers.clear(&self.reminder_id);
                return Ok(UseCaseRes::Skipped);
            }
        };
        ctx.timers.clear(&reminder.id);

        let payload = NotificationPayload::for_reminder(&ctx.config.notification_title, &reminder);
        let subscriptions = ctx.repos.subscriptions.find_all().await;
        let subscription_count = subscriptions.len();
        for subscription in subscriptions {
            actix_web::rt::spawn(deliver(
                ctx.push.clone(),
                ctx.outbox.clone(),
                subscription,
                payload.clone(),
            ));
        }

        info!(
            "Sent reminder: {} to {} subscriptions",
            reminder.id, subscription_count
        );
        Ok(UseCaseRes::Sent {
            subscriptions: subscription_count,
        })
    }
}
