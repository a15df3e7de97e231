use super::shared::{load_or_reset, IDocumentStore, StoreError};
use push_reminder_domain::PushSubscription;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Every `PushSubscription` that notifications are fanned out to
pub struct SubscriptionRepo {
    subscriptions: Mutex<Vec<PushSubscription>>,
    store: Arc<dyn IDocumentStore<Vec<PushSubscription>>>,
}

impl SubscriptionRepo {
    pub fn new(
        subscriptions: Vec<PushSubscription>,
        store: Arc<dyn IDocumentStore<Vec<PushSubscription>>>,
    ) -> Self {
        Self {
            subscriptions: Mutex::new(subscriptions),
            store,
        }
    }

    pub async fn restore(store: Arc<dyn IDocumentStore<Vec<PushSubscription>>>) -> Self {
        let subscriptions = load_or_reset(store.as_ref(), "subscriptions").await;
        Self::new(subscriptions, store)
    }

    /// Returns `true` if the subscription was not already registered.
    /// Subscriptions are the same when their content is, regardless of field order.
    pub async fn register(&self, subscription: PushSubscription) -> Result<bool, StoreError> {
        let mut subscriptions = self.subscriptions.lock().await;
        if subscriptions.contains(&subscription) {
            return Ok(false);
        }
        subscriptions.push(subscription);
        if let Err(e) = self.store.save(&subscriptions).await {
            subscriptions.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Returns `true` if the subscription was registered and now is removed
    pub async fn remove(&self, subscription: &PushSubscription) -> Result<bool, StoreError> {
        let mut subscriptions = self.subscriptions.lock().await;
        let pos = match subscriptions.iter().position(|s| s == subscription) {
            Some(pos) => pos,
            None => return Ok(false),
        };
        let removed = subscriptions.remove(pos);
        if let Err(e) = self.store.save(&subscriptions).await {
            subscriptions.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }

    pub async fn find_all(&self) -> Vec<PushSubscription> {
        self.subscriptions.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.subscriptions.lock().await.len()
    }
}
