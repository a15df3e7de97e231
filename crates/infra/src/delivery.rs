use push_reminder_domain::{PushSubscription, ID};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::error;

/// Work for the delivery worker. Timers and push tasks never change
/// state themselves, they post one of these instead.
#[derive(Debug, Clone)]
pub enum DeliveryMessage {
    /// The timer of the reminder has expired
    ReminderDue(ID),
    /// A push service reported that the subscription no longer exists
    SubscriptionGone(PushSubscription),
}

/// Sending half of the delivery queue
#[derive(Clone)]
pub struct DeliveryOutbox {
    sender: UnboundedSender<DeliveryMessage>,
}

impl DeliveryOutbox {
    pub fn post(&self, message: DeliveryMessage) {
        if let Err(e) = self.sender.send(message) {
            error!(
                "The delivery worker has stopped, dropping message: {:?}",
                e.0
            );
        }
    }
}

/// Receiving half of the delivery queue, owned by the single delivery worker
pub struct DeliveryInbox {
    receiver: UnboundedReceiver<DeliveryMessage>,
}

impl DeliveryInbox {
    /// `None` when every `DeliveryOutbox` is gone
    pub async fn next(&mut self) -> Option<DeliveryMessage> {
        self.receiver.recv().await
    }
}

pub fn delivery_queue() -> (DeliveryOutbox, DeliveryInbox) {
    let (sender, receiver) = unbounded_channel();
    (DeliveryOutbox { sender }, DeliveryInbox { receiver })
}
