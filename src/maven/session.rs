use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::maven::artifact::{Artifact, ArtifactParent};
use crate::maven::coordinates::Scope;
use crate::util::cache::CacheStore;
use crate::util::documents::DocumentProvider;
use crate::util::http::{HttpFetch, HyperHttpFetcher};

/// Owns everything shared across resolutions: the HTTP client, the document
/// cache, the on-disk store and the memoization maps. Parallel test runs and
/// repeated library calls each get their own session instead of hidden
/// global state.
pub struct ResolverSession {
    fetcher: Arc<dyn HttpFetch>,
    documents: DocumentProvider,
    store: CacheStore,
    artifacts: Mutex<HashMap<String, ArtifactMemo>>,
    parents: Mutex<HashMap<String, ParentMemo>>,
}

struct ArtifactMemo {
    artifact: Arc<Artifact>,
    target_scopes: Vec<Scope>,
    final_depth: bool,
}

struct ParentMemo {
    parent: Arc<ArtifactParent>,
    target_scopes: Vec<Scope>,
    final_depth: bool,
}

impl ResolverSession {
    pub fn new(cache_dir: impl Into<PathBuf>) -> ResolverSession {
        ResolverSession::with_fetcher(Arc::new(HyperHttpFetcher::new()), cache_dir)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn HttpFetch>,
        cache_dir: impl Into<PathBuf>,
    ) -> ResolverSession {
        ResolverSession {
            documents: DocumentProvider::new(fetcher.clone()),
            store: CacheStore::new(cache_dir),
            fetcher,
            artifacts: Mutex::new(HashMap::new()),
            parents: Mutex::new(HashMap::new()),
        }
    }

    pub fn documents(&self) -> &DocumentProvider {
        &self.documents
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn fetcher(&self) -> &dyn HttpFetch {
        self.fetcher.as_ref()
    }

    /// Memoized artifact lookup. A cached entry is reused when its target
    /// scope set matches and it was not resolved shallower than the current
    /// request; a scope-only difference yields a field-for-field copy
    /// restamped with the requested scope. Anything else forces a fresh
    /// resolution.
    pub(crate) fn cached_artifact(
        &self,
        key: &str,
        scope: Scope,
        target_scopes: &[Scope],
        final_depth: bool,
    ) -> Option<Arc<Artifact>> {
        let artifacts = self.artifacts.lock().unwrap();
        let entry = artifacts.get(key)?;
        if entry.target_scopes != target_scopes || (!final_depth && entry.final_depth) {
            return None;
        }
        debug!(key, "returning cached result");
        if entry.artifact.scope() == scope {
            Some(entry.artifact.clone())
        } else {
            Some(Arc::new(entry.artifact.with_scope(scope)))
        }
    }

    pub(crate) fn memoize_artifact(
        &self,
        key: String,
        artifact: Arc<Artifact>,
        target_scopes: Vec<Scope>,
        final_depth: bool,
    ) {
        let mut artifacts = self.artifacts.lock().unwrap();
        artifacts.insert(
            key,
            ArtifactMemo {
                artifact,
                target_scopes,
                final_depth,
            },
        );
    }

    pub(crate) fn cached_parent(
        &self,
        key: &str,
        target_scopes: &[Scope],
        final_depth: bool,
    ) -> Option<Arc<ArtifactParent>> {
        let parents = self.parents.lock().unwrap();
        let entry = parents.get(key)?;
        if entry.target_scopes != target_scopes || (!final_depth && entry.final_depth) {
            return None;
        }
        debug!(key, "returning cached parent");
        Some(entry.parent.clone())
    }

    pub(crate) fn memoize_parent(
        &self,
        key: String,
        parent: Arc<ArtifactParent>,
        target_scopes: Vec<Scope>,
        final_depth: bool,
    ) {
        let mut parents = self.parents.lock().unwrap();
        parents.insert(
            key,
            ParentMemo {
                parent,
                target_scopes,
                final_depth,
            },
        );
    }
}
