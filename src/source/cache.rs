//! ImageCache - on-disk cache for fetched source images.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// File extension used for cached image bodies.
const CACHE_EXTENSION: &str = "img";

/// Persistent disk cache for images fetched over HTTP, keyed by URL.
#[derive(Debug, Clone)]
pub struct ImageCache {
    cache_dir: PathBuf,
}

impl ImageCache {
    /// Create a new ImageCache with the given cache directory.
    /// Does not create the directory - call `ensure_dir_exists()` to create it.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Create an ImageCache in the default directory.
    /// Default: ~/.cache/codeblocks/sources/
    pub fn with_default_dir() -> Self {
        Self::new(default_dir())
    }

    /// Ensure the cache directory exists, creating it if necessary.
    pub fn ensure_dir_exists(&self) -> Result<(), std::io::Error> {
        std::fs::create_dir_all(&self.cache_dir)
    }

    /// Get the cache directory path.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path a URL is (or would be) cached at.
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{}", Self::hash_url(url), CACHE_EXTENSION))
    }

    /// Get the cached file for `url`, if present.
    pub fn get(&self, url: &str) -> Option<PathBuf> {
        let path = self.path_for(url);
        path.is_file().then_some(path)
    }

    /// Store fetched bytes for `url`, replacing any previous entry.
    pub fn store(&self, url: &str, bytes: &[u8]) -> Result<PathBuf, std::io::Error> {
        self.ensure_dir_exists()?;
        let path = self.path_for(url);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Deterministic cache key for a URL.
    /// Returns a 32-character hex string (first 16 bytes of SHA256).
    pub fn hash_url(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..16])
    }

    /// Remove every cached image. Returns the number of files deleted.
    pub fn clear_all(&self) -> Result<usize, std::io::Error> {
        if !self.cache_dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in std::fs::read_dir(&self.cache_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(CACHE_EXTENSION)
                && std::fs::remove_file(&path).is_ok()
            {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

/// Default cache location, falling back to `./.cache` without a home directory.
pub fn default_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("codeblocks")
        .join("sources")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_dir_path_structure() {
        let dir = default_dir();
        assert!(dir.ends_with("codeblocks/sources"));
    }

    #[test]
    fn test_hash_url_deterministic() {
        let a = ImageCache::hash_url("https://example.com/wales.png");
        let b = ImageCache::hash_url("https://example.com/wales.png");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_url_differs_per_url() {
        assert_ne!(
            ImageCache::hash_url("https://example.com/a.png"),
            ImageCache::hash_url("https://example.com/b.png")
        );
    }

    #[test]
    fn test_get_returns_none_for_missing() {
        let temp = TempDir::new().unwrap();
        let cache = ImageCache::new(temp.path().to_path_buf());
        assert!(cache.get("https://example.com/missing.png").is_none());
    }

    #[test]
    fn test_store_and_get() {
        let temp = TempDir::new().unwrap();
        let cache = ImageCache::new(temp.path().join("nested"));
        let url = "https://example.com/logo.svg";

        let stored = cache.store(url, b"<svg/>").unwrap();
        assert_eq!(cache.get(url), Some(stored.clone()));
        assert_eq!(std::fs::read(stored).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_store_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let cache = ImageCache::new(temp.path().to_path_buf());
        let url = "https://example.com/logo.png";

        cache.store(url, b"old").unwrap();
        let path = cache.store(url, b"new").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }

    #[test]
    fn test_clear_all_only_removes_cached_images() {
        let temp = TempDir::new().unwrap();
        let cache = ImageCache::new(temp.path().to_path_buf());
        cache.store("https://example.com/1.png", b"1").unwrap();
        cache.store("https://example.com/2.png", b"2").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "keep").unwrap();

        assert_eq!(cache.clear_all().unwrap(), 2);
        assert!(temp.path().join("notes.txt").exists());
        assert!(cache.get("https://example.com/1.png").is_none());
    }

    #[test]
    fn test_clear_all_nonexistent_dir() {
        let temp = TempDir::new().unwrap();
        let cache = ImageCache::new(temp.path().join("does-not-exist"));
        assert_eq!(cache.clear_all().unwrap(), 0);
    }
}
