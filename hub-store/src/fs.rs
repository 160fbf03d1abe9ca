//! Local-filesystem object store backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncReadExt;

use hub_primitives::VirtualPath;

use crate::client::{ObjectClient, ObjectStream};
use crate::error::{StoreError, StoreResult};

const STREAM_CHUNK_BYTES: usize = 64 * 1024;

/// Object store mapping virtual paths onto files under a root directory.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Opens (or creates) a store rooted at the provided directory.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors encountered while creating the root directory.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Returns the root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> StoreResult<PathBuf> {
        let path = VirtualPath::normalize(path)?;
        Ok(self.root.join(path.as_str()))
    }

    async fn walk(&self) -> StoreResult<Vec<String>> {
        let mut found = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                    let segments: Vec<String> = relative
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy().into_owned())
                        .collect();
                    found.push(segments.join("/"));
                }
            }
        }

        found.sort();
        Ok(found)
    }
}

#[async_trait]
impl ObjectClient for FsObjectStore {
    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let paths = self.walk().await?;
        Ok(paths
            .into_iter()
            .filter(|path| path.starts_with(prefix))
            .collect())
    }

    async fn object_exists(&self, path: &str) -> StoreResult<bool> {
        let resolved = self.resolve(path)?;
        Ok(fs::try_exists(&resolved).await? && !fs::metadata(&resolved).await?.is_dir())
    }

    async fn get_object(&self, path: &str) -> StoreResult<Option<Bytes>> {
        let resolved = self.resolve(path)?;
        match fs::read(&resolved).await {
            Ok(content) => Ok(Some(Bytes::from(content))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_object_stream(&self, path: &str) -> StoreResult<Option<ObjectStream>> {
        let resolved = self.resolve(path)?;
        let file = match fs::File::open(&resolved).await {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let stream = futures::stream::try_unfold(file, |mut file| async move {
            let mut buffer = vec![0_u8; STREAM_CHUNK_BYTES];
            let read = file.read(&mut buffer).await.map_err(StoreError::from)?;
            if read == 0 {
                Ok(None)
            } else {
                buffer.truncate(read);
                Ok(Some((Bytes::from(buffer), file)))
            }
        });
        Ok(Some(Box::pin(stream)))
    }

    async fn put_object(&self, path: &str, content: Bytes, overwrite: bool) -> StoreResult<()> {
        let resolved = self.resolve(path)?;
        if !overwrite && fs::try_exists(&resolved).await? {
            return Err(StoreError::AlreadyExists {
                path: path.to_owned(),
            });
        }
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&resolved, &content).await?;
        Ok(())
    }

    async fn delete_object(&self, path: &str) -> StoreResult<()> {
        let resolved = self.resolve(path)?;
        match fs::remove_file(&resolved).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
