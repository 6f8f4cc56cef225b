use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::error::FetchError;
use crate::util::cache::CacheStore;
use crate::util::http::HttpFetch;
use crate::util::xml::XmlDocument;

/// Fetches and caches parsed XML documents.
///
/// The cache is keyed by URL or local path; a fetch that succeeds under any
/// URL of a candidate list populates the entry for every URL in that list,
/// so a later request naming a different mirror of the same resource is a
/// hit. Malformed content is cached as an empty document, never an error.
pub struct DocumentProvider {
    fetcher: Arc<dyn HttpFetch>,
    cache: Mutex<HashMap<String, Arc<XmlDocument>>>,
}

impl DocumentProvider {
    pub fn new(fetcher: Arc<dyn HttpFetch>) -> DocumentProvider {
        DocumentProvider {
            fetcher,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn fetcher(&self) -> &dyn HttpFetch {
        self.fetcher.as_ref()
    }

    /// Document from the first of `urls` to respond. Fetch failure
    /// propagates; parse failure does not.
    pub async fn get_remote(&self, urls: &[String]) -> Result<Arc<XmlDocument>, FetchError> {
        if let Some(doc) = self.lookup(urls) {
            return Ok(doc);
        }

        let bytes = self.fetcher.fetch_first(urls).await?;
        let doc = Arc::new(XmlDocument::parse(&String::from_utf8_lossy(&bytes)));
        self.populate(urls, None, &doc);
        Ok(doc)
    }

    /// Document backed by the on-disk cache store: an existing file is
    /// parsed directly, otherwise the first working URL is downloaded and
    /// written through.
    pub async fn get_or_download(
        &self,
        store: &CacheStore,
        path: &Path,
        urls: &[String],
    ) -> Result<Arc<XmlDocument>, FetchError> {
        let key = path.display().to_string();
        if let Some(doc) = self.lookup_key(&key) {
            return Ok(doc);
        }

        let bytes = store.get_or_download(path, urls, self.fetcher.as_ref()).await?;
        let doc = Arc::new(XmlDocument::parse(&String::from_utf8_lossy(&bytes)));
        self.populate(urls, Some(&key), &doc);
        Ok(doc)
    }

    /// Document from a local file only; `NotFound` when the file is absent.
    pub async fn get_local(
        &self,
        store: &CacheStore,
        path: &Path,
    ) -> Result<Arc<XmlDocument>, FetchError> {
        let key = path.display().to_string();
        if let Some(doc) = self.lookup_key(&key) {
            return Ok(doc);
        }

        let bytes = store
            .read_if_present(path)
            .await?
            .ok_or(FetchError::NotFound)?;
        let doc = Arc::new(XmlDocument::parse(&String::from_utf8_lossy(&bytes)));
        self.populate(&[], Some(&key), &doc);
        Ok(doc)
    }

    fn lookup(&self, urls: &[String]) -> Option<Arc<XmlDocument>> {
        let cache = self.cache.lock().unwrap();
        for url in urls {
            if let Some(doc) = cache.get(url) {
                trace!(url, "document cache hit");
                return Some(doc.clone());
            }
        }
        None
    }

    fn lookup_key(&self, key: &str) -> Option<Arc<XmlDocument>> {
        let cache = self.cache.lock().unwrap();
        cache.get(key).map(|doc| {
            trace!(key, "document cache hit");
            doc.clone()
        })
    }

    fn populate(&self, urls: &[String], key: Option<&str>, doc: &Arc<XmlDocument>) {
        let mut cache = self.cache.lock().unwrap();
        for url in urls {
            cache.insert(url.clone(), doc.clone());
        }
        if let Some(key) = key {
            cache.insert(key.to_string(), doc.clone());
        }
        debug!(entries = cache.len(), "document cache populated");
    }
}
