use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::error::FetchError;
use crate::util::http::HttpFetch;

/// On-disk store for downloaded descriptors and jars. Paths are derived
/// deterministically from coordinates; a file that already exists is never
/// re-downloaded.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>) -> CacheStore {
        CacheStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/{group as dirs}/{artifactId}/{version}.pom`
    pub fn pom_path(&self, group_id: &str, artifact_id: &str, version: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in group_id.split('.') {
            path.push(segment);
        }
        path.push(artifact_id);
        path.push(format!("{}.pom", version));
        path
    }

    pub async fn ensure_root(&self) -> std::io::Result<()> {
        create_directory(&self.root).await
    }

    pub async fn read_if_present(&self, path: &Path) -> std::io::Result<Option<Bytes>> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => Ok(Some(Bytes::from(tokio::fs::read(path).await?))),
            _ => Ok(None),
        }
    }

    /// Returns the cached file's bytes, downloading from the first working
    /// URL and writing the file when absent. A directory squatting on the
    /// path is removed first.
    pub async fn get_or_download(
        &self,
        path: &Path,
        urls: &[String],
        fetcher: &dyn HttpFetch,
    ) -> Result<Bytes, FetchError> {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => {
                tokio::fs::remove_dir_all(path).await?;
            }
            Ok(_) => return Ok(Bytes::from(tokio::fs::read(path).await?)),
            Err(_) => {}
        }

        if let Some(parent) = path.parent() {
            create_directory(parent).await?;
        }

        let bytes = fetcher.fetch_first(urls).await?;
        debug!(path = %path.display(), "caching downloaded file");
        tokio::fs::write(path, &bytes).await?;
        Ok(bytes)
    }

    /// Streams the first working URL into an explicit output file,
    /// overwriting whatever was there.
    pub async fn download_to(
        &self,
        output: &Path,
        urls: &[String],
        fetcher: &dyn HttpFetch,
    ) -> Result<(), FetchError> {
        if let Some(parent) = output.parent() {
            create_directory(parent).await?;
        }
        let bytes = fetcher.fetch_first(urls).await?;
        tokio::fs::write(output, &bytes).await?;
        Ok(())
    }
}

/// Creates a directory chain, replacing a plain file squatting on the path.
async fn create_directory(path: &Path) -> std::io::Result<()> {
    if let Ok(meta) = tokio::fs::metadata(path).await {
        if meta.is_dir() {
            return Ok(());
        }
        tokio::fs::remove_file(path).await?;
    }
    tokio::fs::create_dir_all(path).await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::http::HttpFetch;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct OneShot {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HttpFetch for OneShot {
        async fn fetch(&self, _url: &str) -> Result<Bytes, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Bytes::from_static(b"<project/>"))
        }
    }

    #[test]
    fn test_pom_path_layout() {
        let store = CacheStore::new("/cache");
        assert_eq!(
            store.pom_path("org.example.deep", "lib", "1.0.0"),
            PathBuf::from("/cache/org/example/deep/lib/1.0.0.pom")
        );
    }

    #[tokio::test]
    async fn test_get_or_download_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());
        let fetcher = OneShot {
            calls: AtomicUsize::new(0),
        };
        let path = store.pom_path("org", "lib", "1.0.0");
        let urls = vec!["http://repo/org/lib/1.0.0/lib-1.0.0.pom".to_string()];

        let first = store.get_or_download(&path, &urls, &fetcher).await.unwrap();
        let second = store.get_or_download(&path, &urls, &fetcher).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }
}
