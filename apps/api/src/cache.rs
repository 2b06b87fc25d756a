//! Content-addressed cache for analysis results.
//!
//! Keys are the SHA-256 hex digest of the uploaded bytes, so the same
//! document re-uploaded under any filename replays the stored result.
//! Cache failures are never fatal: a read error is a miss and a write
//! error only loses the replay.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of raw document bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[async_trait]
pub trait ResultCache: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// One JSON file per digest under the configured cache directory.
pub struct DiskResultCache {
    root: PathBuf,
}

impl DiskResultCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn ensure_dir(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create cache dir {}", self.root.display()))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl ResultCache for DiskResultCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        match tokio::fs::read_to_string(self.entry_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.entry_path(key);
        tokio::fs::write(&path, value)
            .await
            .with_context(|| format!("Failed to write cache entry {}", path.display()))
    }
}
