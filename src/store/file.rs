//! JSON-file store: one document per key in a directory

use super::KeyValueStore;
use crate::error::{AvakitError, AvakitResult};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::debug;

/// Key-value store persisting each key as `<dir>/<key>.json`
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> AvakitResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AvakitError::io(format!("creating store dir {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    /// Directory holding the store's files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> AvakitResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AvakitError::store(key, "key must be [A-Za-z0-9_-]+"));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> AvakitResult<Option<serde_json::Value>> {
        let path = self.item_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| AvakitError::io(format!("reading store file {}", path.display()), e))?;

        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    async fn set_item(&self, key: &str, value: serde_json::Value) -> AvakitResult<()> {
        let path = self.item_path(key)?;
        let content = serde_json::to_vec_pretty(&value)?;
        let dir = self.dir.clone();

        // Each write gets its own temp file so concurrent writers never share one;
        // the rename makes the last finished write win.
        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &content))
            .await
            .map_err(|e| AvakitError::store(key, format!("write task failed: {}", e)))??;

        debug!("Stored {}", key);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> AvakitResult<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(&path).await.map_err(|e| {
                AvakitError::io(format!("removing store file {}", path.display()), e)
            })?;
        }
        Ok(())
    }
}

fn write_atomic(dir: &Path, path: &Path, content: &[u8]) -> AvakitResult<()> {
    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| AvakitError::io(format!("creating temp file in {}", dir.display()), e))?;
    tmp.write_all(content)
        .map_err(|e| AvakitError::io(format!("writing {}", tmp.path().display()), e))?;
    tmp.persist(path)
        .map_err(|e| AvakitError::io(format!("replacing store file {}", path.display()), e.error))?;
    Ok(())
}
