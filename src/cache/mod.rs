//! Flat-file snippet cache.
//!
//! One file per URL inside the cache directory. The file name is the
//! URL's key and the contents are the rendered snippet bytes, nothing else.
//! Entries never expire.

mod key;

pub use key::key_for;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no cache entry for key {0}")]
    Missing(String),

    #[error("failed to read cache entry {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write cache entry {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create cache directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SnippetCache {
    dir: PathBuf,
}

impl SnippetCache {
    /// Use an existing directory. Nothing is checked until the first write.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Like [`open`](Self::open), but creates the directory first.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| CacheError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub async fn has(&self, key: &str) -> bool {
        tokio::fs::try_exists(self.path_for(key))
            .await
            .unwrap_or(false)
    }

    pub async fn get(&self, key: &str) -> Result<String, CacheError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CacheError::Missing(key.to_string()))
            }
            Err(source) => Err(CacheError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Write or overwrite an entry. Not atomic.
    pub async fn put(&self, key: &str, value: &str) -> Result<(), CacheError> {
        tokio::fs::write(self.path_for(key), value.as_bytes())
            .await
            .map_err(|source| CacheError::Write {
                key: key.to_string(),
                source,
            })?;
        debug!(key, bytes = value.len(), "cache entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnippetCache::open(dir.path());
        let key = key_for("https://example.com/");

        assert!(!cache.has(&key).await);
        cache.put(&key, "<h4>cached</h4>").await.unwrap();
        assert!(cache.has(&key).await);
        assert_eq!(cache.get(&key).await.unwrap(), "<h4>cached</h4>");

        let on_disk = std::fs::read_to_string(dir.path().join(&key)).unwrap();
        assert_eq!(on_disk, "<h4>cached</h4>");
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnippetCache::open(dir.path());

        cache.put("k", "first").await.unwrap();
        cache.put("k", "second").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnippetCache::open(dir.path());

        assert!(matches!(
            cache.get("absent").await,
            Err(CacheError::Missing(key)) if key == "absent"
        ));
    }

    #[tokio::test]
    async fn test_put_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnippetCache::open(dir.path().join("does-not-exist"));

        let err = cache.put("k", "v").await.unwrap_err();
        assert!(matches!(err, CacheError::Write { .. }));
        assert!(!cache.has("k").await);
    }

    #[tokio::test]
    async fn test_create_makes_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let cache = SnippetCache::create(&nested).await.unwrap();
        assert!(nested.is_dir());
        cache.put("k", "v").await.unwrap();
        assert_eq!(cache.dir(), nested.as_path());
    }
}
