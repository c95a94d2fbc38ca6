//! API key storage
//!
//! Keys are written one file per platform with owner-only permissions.
//! Validation never reads from here; persisting a key is the caller's call
//! once validation has succeeded.

use crate::error::{AvakitError, AvakitResult};
use crate::platform::PlatformId;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Opaque store for per-platform API keys
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Persist `key` for `platform`, replacing any previous key
    async fn save_key(&self, platform: PlatformId, key: &str) -> AvakitResult<bool>;

    /// Read the stored key for `platform`
    async fn get_key(&self, platform: PlatformId) -> AvakitResult<Option<String>>;

    /// Forget the key for `platform`. Removing a missing key succeeds.
    async fn remove_key(&self, platform: PlatformId) -> AvakitResult<bool>;
}

/// File-backed secret store
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    /// Open the store at `dir`, creating it with restrictive permissions
    pub async fn open(dir: impl Into<PathBuf>) -> AvakitResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AvakitError::io("creating key directory", e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            std::fs::set_permissions(&dir, perms)
                .map_err(|e| AvakitError::io("setting key dir permissions", e))?;
        }

        Ok(Self { dir })
    }

    fn key_path(&self, platform: PlatformId) -> PathBuf {
        self.dir.join(format!("{}.key", platform.as_str()))
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn save_key(&self, platform: PlatformId, key: &str) -> AvakitResult<bool> {
        let path = self.key_path(platform);

        fs::write(&path, key.trim())
            .await
            .map_err(|e| AvakitError::io(format!("writing key file {}", path.display()), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, perms)
                .map_err(|e| AvakitError::io("setting key file permissions", e))?;
        }

        debug!("Saved key {} for {}", key_fingerprint(key), platform);
        Ok(true)
    }

    async fn get_key(&self, platform: PlatformId) -> AvakitResult<Option<String>> {
        let path = self.key_path(platform);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| AvakitError::io(format!("reading key file {}", path.display()), e))?;

        let key = content.trim();
        if key.is_empty() {
            Ok(None)
        } else {
            Ok(Some(key.to_string()))
        }
    }

    async fn remove_key(&self, platform: PlatformId) -> AvakitResult<bool> {
        let path = self.key_path(platform);
        if path.exists() {
            fs::remove_file(&path).await.map_err(|e| {
                AvakitError::io(format!("removing key file {}", path.display()), e)
            })?;
        }
        Ok(true)
    }
}

/// Render a key for display, keeping only its first and last four characters
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.trim().chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Short stable identifier for a key, safe to put in logs
pub fn key_fingerprint(key: &str) -> String {
    let digest = Sha256::digest(key.trim().as_bytes());
    hex::encode(&digest[..4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (FileSecretStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = FileSecretStore::open(temp.path().join("keys")).await.unwrap();
        (store, temp)
    }

    #[tokio::test]
    async fn save_and_get() {
        let (store, _temp) = test_store().await;

        assert!(store.save_key(PlatformId::PlatformB, " sk_test_123\n").await.unwrap());
        let key = store.get_key(PlatformId::PlatformB).await.unwrap();

        assert_eq!(key.as_deref(), Some("sk_test_123"));
        assert!(store.get_key(PlatformId::PlatformA).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let (store, _temp) = test_store().await;
        store.save_key(PlatformId::PlatformC, "abc").await.unwrap();

        assert!(store.remove_key(PlatformId::PlatformC).await.unwrap());
        assert!(store.remove_key(PlatformId::PlatformC).await.unwrap());
        assert!(store.get_key(PlatformId::PlatformC).await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _temp) = test_store().await;
        store.save_key(PlatformId::PlatformA, "abc").await.unwrap();

        let mode = std::fs::metadata(store.key_path(PlatformId::PlatformA))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn masking() {
        assert_eq!(mask_key("sk_test_123"), "sk_t…_123");
        assert_eq!(mask_key("short"), "*****");
        assert_eq!(mask_key(""), "****");
    }

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = key_fingerprint("sk_test_123");
        assert_eq!(a.len(), 8);
        assert_eq!(a, key_fingerprint(" sk_test_123 "));
        assert_ne!(a, key_fingerprint("sk_test_124"));
    }
}
