use super::store::{IDocumentStore, StoreError};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

/// Keeps a document as pretty printed json in a single file
pub struct JsonFileStore<T> {
    path: PathBuf,
    _document: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _document: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait::async_trait]
impl<T> IDocumentStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Sync,
{
    async fn load(&self) -> Result<Option<T>, StoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&content)?))
    }

    async fn save(&self, document: &T) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(document)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        // Write next to the target and swap it in so a crash never leaves half a document
        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::shared::load_or_reset;

    #[tokio::test]
    async fn it_loads_nothing_from_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Vec<String>>::new(dir.path().join("missing.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn it_loads_what_was_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::<Vec<String>>::new(dir.path().join("nested/dir/doc.json"));
        let document = vec!["first".to_string(), "second".to_string()];

        store.save(&document).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn it_rewrites_a_corrupt_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();
        let store = JsonFileStore::<Vec<String>>::new(&path);

        assert!(matches!(store.load().await, Err(StoreError::Malformed(_))));
        let document = load_or_reset(&store, "doc").await;
        assert!(document.is_empty());

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let rewritten: Vec<String> = serde_json::from_str(&content).unwrap();
        assert!(rewritten.is_empty());
    }
}
