use super::store::{IDocumentStore, StoreError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Keeps the last saved document in memory. Used by tests and
/// for running the server without touching the file system.
pub struct InMemoryDocumentStore<T> {
    document: Mutex<Option<T>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl<T> InMemoryDocumentStore<T> {
    pub fn new() -> Self {
        Self {
            document: Mutex::new(None),
            fail_loads: AtomicBool::new(false),
            fail_saves: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn with_document(document: T) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            ..Self::new()
        }
    }

    /// Makes every following `load` fail, as if the stored document was corrupt
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Makes every following `save` fail
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<T: Clone> InMemoryDocumentStore<T> {
    pub async fn document(&self) -> Option<T> {
        self.document.lock().await.clone()
    }
}

impl<T> Default for InMemoryDocumentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<T> IDocumentStore<T> for InMemoryDocumentStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Option<T>, StoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(self.document.lock().await.clone())
    }

    async fn save(&self, document: &T) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        *self.document.lock().await = Some(document.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
