use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unable to access the store: {0}")]
    Io(#[from] std::io::Error),
    #[error("The stored document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("The store is unavailable")]
    Unavailable,
}

/// A store holding exactly one serialized document which is always
/// written back as a whole.
#[async_trait::async_trait]
pub trait IDocumentStore<T>: Send + Sync {
    /// `None` when nothing has been stored yet
    async fn load(&self) -> Result<Option<T>, StoreError>;
    async fn save(&self, document: &T) -> Result<(), StoreError>;
}

/// Loads the document, and when it cannot be read, starts over from an empty one.
/// The empty document is written back right away so the broken content is gone on the next start.
pub async fn load_or_reset<T>(store: &dyn IDocumentStore<T>, name: &str) -> T
where
    T: Default + Send,
{
    match store.load().await {
        Ok(Some(document)) => document,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(
                "Unable to read the stored {}, starting with an empty one. Error: {:?}",
                name, e
            );
            let empty = T::default();
            if let Err(e) = store.save(&empty).await {
                warn!("Unable to reset the stored {}. Error: {:?}", name, e);
            }
            empty
        }
    }
}
