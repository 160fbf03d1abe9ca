//! In-memory object store backend.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::client::ObjectClient;
use crate::error::{StoreError, StoreResult};

/// Object store keeping content in process memory.
///
/// Primarily used by tests and local development; listings are returned in
/// path order for determinism.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, Bytes>>,
}

impl MemoryObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with the supplied path/content pairs.
    #[must_use]
    pub fn with_objects<P, C>(objects: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<Bytes>,
    {
        let objects = objects
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        Self {
            objects: RwLock::new(objects),
        }
    }

    /// Inserts or replaces an object, bypassing overwrite checks.
    pub async fn insert(&self, path: impl Into<String>, content: impl Into<Bytes>) {
        self.objects
            .write()
            .await
            .insert(path.into(), content.into());
    }

    /// Returns the number of stored objects.
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectClient for MemoryObjectStore {
    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let guard = self.objects.read().await;
        let mut paths: Vec<String> = guard
            .keys()
            .filter(|path| path.starts_with(prefix))
            .cloned()
            .collect();
        paths.sort();
        Ok(paths)
    }

    async fn object_exists(&self, path: &str) -> StoreResult<bool> {
        Ok(self.objects.read().await.contains_key(path))
    }

    async fn get_object(&self, path: &str) -> StoreResult<Option<Bytes>> {
        Ok(self.objects.read().await.get(path).cloned())
    }

    async fn put_object(&self, path: &str, content: Bytes, overwrite: bool) -> StoreResult<()> {
        let mut guard = self.objects.write().await;
        if !overwrite && guard.contains_key(path) {
            return Err(StoreError::AlreadyExists {
                path: path.to_owned(),
            });
        }
        guard.insert(path.to_owned(), content);
        Ok(())
    }

    async fn delete_object(&self, path: &str) -> StoreResult<()> {
        self.objects.write().await.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use super::*;

    #[tokio::test]
    async fn missing_object_reads_none() {
        let store = MemoryObjectStore::new();
        assert!(store.get_object("absent.json").await.unwrap().is_none());
        assert!(!store.object_exists("absent.json").await.unwrap());
    }

    #[tokio::test]
    async fn put_then_get_roundtrips() {
        let store = MemoryObjectStore::new();
        store
            .put_object("agents/a.json", Bytes::from_static(b"{}"), true)
            .await
            .unwrap();
        assert_eq!(
            store.get_object("agents/a.json").await.unwrap(),
            Some(Bytes::from_static(b"{}"))
        );
    }

    #[tokio::test]
    async fn overwrite_false_conflicts() {
        let store = MemoryObjectStore::with_objects([("a.json", "{}")]);
        let err = store
            .put_object("a.json", Bytes::from_static(b"{}"), false)
            .await
            .expect_err("conflict expected");
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryObjectStore::with_objects([("a.json", "{}")]);
        store.delete_object("a.json").await.unwrap();
        store.delete_object("a.json").await.unwrap();
        assert_eq!(store.object_count().await, 0);
    }

    #[tokio::test]
    async fn default_stream_yields_whole_object() {
        let store = MemoryObjectStore::with_objects([("a.txt", "hello")]);
        let stream = store
            .get_object_stream("a.txt")
            .await
            .unwrap()
            .expect("object present");
        let chunks: Vec<Bytes> = stream.try_collect().await.unwrap();
        assert_eq!(chunks, [Bytes::from_static(b"hello")]);
    }

    #[tokio::test]
    async fn listing_is_sorted_and_prefix_scoped() {
        let store = MemoryObjectStore::with_objects([
            ("agents/b.json", "{}"),
            ("agents/a.json", "{}"),
            ("prompts/p.txt", "x"),
        ]);
        assert_eq!(
            store.list_objects("agents").await.unwrap(),
            ["agents/a.json", "agents/b.json"]
        );
        assert_eq!(store.list_objects("").await.unwrap().len(), 3);
    }
}
