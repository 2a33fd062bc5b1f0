//! File-backed durable store.

use crate::{DurableStore, Result, StorageFuture};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Durable store writing one JSON document per key.
///
/// Records live at `<dir>/<key>.json`. The directory is created on first
/// write. This is the local-storage analogue: state survives process
/// restarts on the same machine, nothing more.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`.
    ///
    /// The directory does not need to exist yet.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the record files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DurableStore for JsonFileStore {
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    fn read_record<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<Value>> {
        let path = self.path_for(key);

        Box::pin(async move {
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let value = serde_json::from_slice(&bytes)?;
                    Ok(Some(value))
                },
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        })
    }

    #[tracing::instrument(skip(self, value), fields(dir = %self.dir.display()))]
    fn write_record<'a>(&'a self, key: &'a str, value: Value) -> StorageFuture<'a, ()> {
        let dir = self.dir.clone();
        let path = self.path_for(key);

        Box::pin(async move {
            tokio::fs::create_dir_all(&dir).await?;
            let bytes = serde_json::to_vec_pretty(&value)?;
            tokio::fs::write(&path, bytes).await?;
            tracing::debug!(path = %path.display(), "record written");
            Ok(())
        })
    }

    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    fn remove_record<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        let path = self.path_for(key);

        Box::pin(async move {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            }
        })
    }
}
