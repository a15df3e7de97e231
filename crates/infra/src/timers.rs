use crate::{
    delivery::{DeliveryMessage, DeliveryOutbox},
    system::ISys,
};
use dashmap::DashMap;
use push_reminder_domain::{ScheduledReminder, ID};
use std::{sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Longest single sleep of a timer. Timers for distant reminders sleep in
/// chunks and look at the clock again in between.
const MAX_SLEEP_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// One-shot timers that post `DeliveryMessage::ReminderDue` to the
/// delivery queue once a reminder's timestamp has passed.
pub struct ReminderTimers {
    timers: DashMap<ID, JoinHandle<()>>,
    outbox: DeliveryOutbox,
    sys: Arc<dyn ISys>,
}

async fn wait_until_due(sys: Arc<dyn ISys>, timestamp: i64) {
    loop {
        let remaining = timestamp - sys.get_timestamp_millis();
        if remaining <= 0 {
            return;
        }
        let millis = remaining.min(MAX_SLEEP_MILLIS) as u64;
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

impl ReminderTimers {
    pub fn new(outbox: DeliveryOutbox, sys: Arc<dyn ISys>) -> Self {
        Self {
            timers: DashMap::new(),
            outbox,
            sys,
        }
    }

    /// Starts the timer of the reminder, replacing any timer it already had.
    /// An overdue reminder is posted as due right away.
    pub fn arm(&self, reminder: &ScheduledReminder) {
        let delay = reminder.millis_until_due(self.sys.get_timestamp_millis());
        if delay <= 0 {
            self.cancel(&reminder.id);
            debug!("Reminder: {} is already due", reminder.id);
            self.outbox
                .post(DeliveryMessage::ReminderDue(reminder.id.clone()));
            return;
        }

        let sys = self.sys.clone();
        let outbox = self.outbox.clone();
        let reminder_id = reminder.id.clone();
        let timestamp = reminder.timestamp;
        let handle = tokio::spawn(async move {
            wait_until_due(sys, timestamp).await;
            outbox.post(DeliveryMessage::ReminderDue(reminder_id));
        });

        if let Some(previous) = self.timers.insert(reminder.id.clone(), handle) {
            warn!(
                "Reminder: {} already had a timer, replacing it",
                reminder.id
            );
            previous.abort();
        }
    }

    /// Returns `true` if there was a timer to stop
    pub fn cancel(&self, reminder_id: &ID) -> bool {
        match self.timers.remove(reminder_id) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Forgets the timer of a reminder that has been handled
    pub fn clear(&self, reminder_id: &ID) {
        self.timers.remove(reminder_id);
    }

    /// Arms every scheduled reminder and returns how many were armed
    pub fn restore_all(&self, reminders: &[ScheduledReminder]) -> usize {
        let mut armed = 0;
        for reminder in reminders.iter().filter(|r| r.is_scheduled()) {
            self.arm(reminder);
            armed += 1;
        }
        armed
    }

    pub fn is_armed(&self, reminder_id: &ID) -> bool {
        self.timers.contains_key(reminder_id)
    }

    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }
}
