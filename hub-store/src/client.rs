//! Raw byte-level object store operations.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::error::StoreResult;

/// Streaming object content emitted by [`ObjectClient::get_object_stream`].
pub type ObjectStream = Pin<Box<dyn Stream<Item = StoreResult<Bytes>> + Send>>;

/// Trait implemented by object store backends.
///
/// Paths are store-relative with `/` separators and no leading separator; the
/// gateway normalizes caller input before it reaches a client. Clients are
/// domain-agnostic and perform no record parsing.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    /// Lists full store-relative paths of objects whose path starts with
    /// `prefix`. An empty prefix lists the whole store.
    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Returns whether an object exists at `path`.
    async fn object_exists(&self, path: &str) -> StoreResult<bool>;

    /// Returns the object content, or `None` when no object exists at `path`.
    async fn get_object(&self, path: &str) -> StoreResult<Option<Bytes>>;

    /// Returns the object content as a stream of chunks, or `None` when no
    /// object exists at `path`.
    ///
    /// The default implementation buffers the whole object into a single
    /// chunk; backends with true streaming reads should override it.
    async fn get_object_stream(&self, path: &str) -> StoreResult<Option<ObjectStream>> {
        Ok(self.get_object(path).await?.map(|content| {
            let stream: ObjectStream =
                Box::pin(futures::stream::once(async move { Ok(content) }));
            stream
        }))
    }

    /// Uploads an object. With `overwrite = false` the upload fails with
    /// [`StoreError::AlreadyExists`](crate::StoreError::AlreadyExists) when an
    /// object is already present.
    async fn put_object(&self, path: &str, content: Bytes, overwrite: bool) -> StoreResult<()>;

    /// Deletes an object along with any versioned snapshots the backend
    /// keeps. Deleting a missing object is not an error.
    async fn delete_object(&self, path: &str) -> StoreResult<()>;
}
