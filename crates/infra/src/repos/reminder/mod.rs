use super::shared::{load_or_reset, IDocumentStore, StoreError};
use push_reminder_domain::{Entity, ReminderValidationError, ScheduledReminder, ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::error;

/// Layout of the stored reminders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemindersDocument {
    #[serde(default)]
    pub scheduled: Vec<ScheduledReminder>,
}

#[derive(Error, Debug)]
pub enum CreateReminderError {
    #[error(transparent)]
    Invalid(#[from] ReminderValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum CancelReminderError {
    #[error("Reminder with id: {0} was not found")]
    NotFound(ID),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The table of every `ScheduledReminder`, kept in memory and written
/// through to its store on every change.
pub struct ReminderRepo {
    reminders: Mutex<Vec<ScheduledReminder>>,
    store: Arc<dyn IDocumentStore<RemindersDocument>>,
}

impl ReminderRepo {
    pub fn new(
        reminders: Vec<ScheduledReminder>,
        store: Arc<dyn IDocumentStore<RemindersDocument>>,
    ) -> Self {
        Self {
            reminders: Mutex::new(reminders),
            store,
        }
    }

    /// Builds the table from what is in the store
    pub async fn restore(store: Arc<dyn IDocumentStore<RemindersDocument>>) -> Self {
        let document = load_or_reset(store.as_ref(), "reminders").await;
        Self::new(document.scheduled, store)
    }

    async fn persist(&self, reminders: &[ScheduledReminder]) -> Result<(), StoreError> {
        let document = RemindersDocument {
            scheduled: reminders.to_vec(),
        };
        self.store.save(&document).await
    }

    pub async fn create(
        &self,
        text: Option<String>,
        timestamp: Option<i64>,
        now: i64,
    ) -> Result<ScheduledReminder, CreateReminderError> {
        let reminder = ScheduledReminder::new(text, timestamp, now)?;
        let mut reminders = self.reminders.lock().await;
        reminders.push(reminder.clone());
        if let Err(e) = self.persist(&reminders).await {
            reminders.pop();
            return Err(e.into());
        }
        Ok(reminder)
    }

    /// Returns `true` if the reminder was scheduled and is now sent.
    /// A failed write is logged, the reminder stays sent in memory so it is never delivered twice.
    pub async fn mark_sent(&self, reminder_id: &ID) -> bool {
        let mut reminders = self.reminders.lock().await;
        let changed = match reminders.iter_mut().find(|r| r.id() == reminder_id) {
            Some(reminder) => reminder.mark_sent(),
            None => false,
        };
        if changed {
            if let Err(e) = self.persist(&reminders).await {
                error!(
                    "Unable to store that reminder: {} was sent. Error: {:?}",
                    reminder_id, e
                );
            }
        }
        changed
    }

    /// Returns `true` if the reminder was scheduled and is now cancelled,
    /// `false` if it was already sent or cancelled.
    pub async fn cancel(&self, reminder_id: &ID) -> Result<bool, CancelReminderError> {
        let mut reminders = self.reminders.lock().await;
        let reminder = reminders
            .iter_mut()
            .find(|r| r.id() == reminder_id)
            .ok_or_else(|| CancelReminderError::NotFound(reminder_id.clone()))?;
        let previous_status = reminder.status;
        if !reminder.cancel() {
            return Ok(false);
        }
        if let Err(e) = self.persist(&reminders).await {
            if let Some(reminder) = reminders.iter_mut().find(|r| r.id() == reminder_id) {
                reminder.status = previous_status;
            }
            return Err(e.into());
        }
        Ok(true)
    }

    pub async fn find(&self, reminder_id: &ID) -> Option<ScheduledReminder> {
        self.reminders
            .lock()
            .await
            .iter()
            .find(|r| r.id() == reminder_id)
            .cloned()
    }

    pub async fn find_all(&self) -> Vec<ScheduledReminder> {
        self.reminders.lock().await.clone()
    }

    pub async fn find_scheduled(&self) -> Vec<ScheduledReminder> {
        self.reminders
            .lock()
            .await
            .iter()
            .filter(|r| r.is_scheduled())
            .cloned()
            .collect()
    }

    /// Drops every sent and cancelled reminder from memory and returns how many were dropped.
    /// Nothing is written, the next change stores the compacted table.
    pub async fn compact(&self) -> usize {
        let mut reminders = self.reminders.lock().await;
        let before = reminders.len();
        reminders.retain(|r| r.is_scheduled());
        before - reminders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::shared::InMemoryDocumentStore;
    use push_reminder_domain::ReminderStatus;

    fn setup() -> (ReminderRepo, Arc<InMemoryDocumentStore<RemindersDocument>>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        (ReminderRepo::new(Vec::new(), store.clone()), store)
    }

    async fn stored(store: &InMemoryDocumentStore<RemindersDocument>) -> Vec<ScheduledReminder> {
        store.document().await.unwrap_or_default().scheduled
    }

    #[tokio::test]
    async fn it_creates_and_persists_reminders() {
        let (repo, store) = setup();
        let first = repo.create(Some("First".into()), Some(10), 5).await.unwrap();
        let second = repo.create(Some("Second".into()), Some(20), 5).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.status, ReminderStatus::Scheduled);
        assert_eq!(first.created_at, 5);
        assert_eq!(repo.find_all().await, vec![first.clone(), second.clone()]);
        assert_eq!(stored(&store).await, vec![first, second]);
    }

    #[tokio::test]
    async fn it_rejects_invalid_reminders() {
        let (repo, store) = setup();
        let res = repo.create(Some("".into()), Some(10), 0).await;
        assert!(matches!(
            res,
            Err(CreateReminderError::Invalid(ReminderValidationError::MissingText))
        ));
        let res = repo.create(Some("Text".into()), None, 0).await;
        assert!(matches!(
            res,
            Err(CreateReminderError::Invalid(
                ReminderValidationError::MissingTimestamp
            ))
        ));
        assert!(repo.find_all().await.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn it_rolls_back_create_when_save_fails() {
        let (repo, store) = setup();
        store.fail_saves(true);
        let res = repo.create(Some("Text".into()), Some(10), 0).await;
        assert!(matches!(res, Err(CreateReminderError::Store(_))));
        assert!(repo.find_all().await.is_empty());
    }

    #[tokio::test]
    async fn it_cancels_only_scheduled_reminders() {
        let (repo, store) = setup();
        let reminder = repo.create(Some("Text".into()), Some(10), 0).await.unwrap();

        assert!(repo.cancel(&reminder.id).await.unwrap());
        assert!(!repo.cancel(&reminder.id).await.unwrap());
        assert_eq!(
            repo.find(&reminder.id).await.unwrap().status,
            ReminderStatus::Cancelled
        );
        assert_eq!(stored(&store).await[0].status, ReminderStatus::Cancelled);
        assert!(!repo.mark_sent(&reminder.id).await);
    }

    #[tokio::test]
    async fn it_does_not_cancel_sent_reminders() {
        let (repo, _) = setup();
        let reminder = repo.create(Some("Text".into()), Some(10), 0).await.unwrap();

        assert!(repo.mark_sent(&reminder.id).await);
        assert!(!repo.mark_sent(&reminder.id).await);
        assert!(!repo.cancel(&reminder.id).await.unwrap());
        assert_eq!(
            repo.find(&reminder.id).await.unwrap().status,
            ReminderStatus::Sent
        );
    }

    #[tokio::test]
    async fn it_signals_unknown_reminders() {
        let (repo, _) = setup();
        let res = repo.cancel(&ID::default()).await;
        assert!(matches!(res, Err(CancelReminderError::NotFound(_))));
        assert!(!repo.mark_sent(&ID::default()).await);
    }

    #[tokio::test]
    async fn it_rolls_back_cancel_when_save_fails() {
        let (repo, store) = setup();
        let reminder = repo.create(Some("Text".into()), Some(10), 0).await.unwrap();
        store.fail_saves(true);
        assert!(matches!(
            repo.cancel(&reminder.id).await,
            Err(CancelReminderError::Store(_))
        ));
        assert!(repo.find(&reminder.id).await.unwrap().is_scheduled());
    }

    #[tokio::test]
    async fn it_compacts_terminal_reminders() {
        let (repo, store) = setup();
        let sent = repo.create(Some("Sent".into()), Some(10), 0).await.unwrap();
        let cancelled = repo.create(Some("Cancelled".into()), Some(10), 0).await.unwrap();
        let scheduled = repo.create(Some("Scheduled".into()), Some(10), 0).await.unwrap();
        repo.mark_sent(&sent.id).await;
        repo.cancel(&cancelled.id).await.unwrap();
        let saves = store.save_count();

        assert_eq!(repo.compact().await, 2);
        assert_eq!(store.save_count(), saves);
        assert_eq!(repo.find_all().await, vec![scheduled.clone()]);
        assert_eq!(repo.find_scheduled().await, vec![scheduled]);
        assert_eq!(repo.compact().await, 0);
    }

    #[tokio::test]
    async fn it_restores_from_the_store() {
        let (repo, store) = setup();
        let reminder = repo.create(Some("Text".into()), Some(10), 0).await.unwrap();

        let restored = ReminderRepo::restore(store).await;
        assert_eq!(restored.find_all().await, vec![reminder]);
    }

    #[tokio::test]
    async fn it_restores_an_empty_table_from_a_broken_store() {
        let store = Arc::new(InMemoryDocumentStore::<RemindersDocument>::new());
        store.fail_loads(true);
        let repo = ReminderRepo::restore(store.clone()).await;
        assert!(repo.find_all().await.is_empty());
        assert_eq!(store.save_count(), 1);
    }
}
