mod reminder;
mod shared;
mod subscription;

use crate::config::Config;
use push_reminder_domain::PushSubscription;
use std::sync::Arc;
use tracing::info;

pub use reminder::{CancelReminderError, CreateReminderError, ReminderRepo, RemindersDocument};
pub use shared::{IDocumentStore, InMemoryDocumentStore, JsonFileStore, StoreError};
pub use subscription::SubscriptionRepo;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<ReminderRepo>,
    pub subscriptions: Arc<SubscriptionRepo>,
}

impl Repos {
    /// Restores both tables from their json files
    pub async fn create_file(config: &Config) -> Self {
        info!(
            "Restoring reminders from: {:?} and subscriptions from: {:?}",
            config.reminders_file, config.subscriptions_file
        );
        let reminders_store: Arc<dyn IDocumentStore<RemindersDocument>> =
            Arc::new(JsonFileStore::new(&config.reminders_file));
        let subscriptions_store: Arc<dyn IDocumentStore<Vec<PushSubscription>>> =
            Arc::new(JsonFileStore::new(&config.subscriptions_file));
        Self {
            reminders: Arc::new(ReminderRepo::restore(reminders_store).await),
            subscriptions: Arc::new(SubscriptionRepo::restore(subscriptions_store).await),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(ReminderRepo::new(
                Vec::new(),
                Arc::new(InMemoryDocumentStore::new()),
            )),
            subscriptions: Arc::new(SubscriptionRepo::new(
                Vec::new(),
                Arc::new(InMemoryDocumentStore::new()),
            )),
        }
    }
}
