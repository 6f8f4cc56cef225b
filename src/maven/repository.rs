use crate::error::ResolveError;
use crate::maven::CENTRAL_REPOSITORY;

/// A remote repository base URL plus the URLs it proxies. URLs are always
/// normalized to end with `/`.
///
/// Two repositories are "the same repository" for presence checks when
/// either their base URLs match or one's proxy set contains the other's
/// URL; an internal mirror can stand in for a well-known upstream without
/// the resolver emitting a duplicate fallback entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    url: String,
    proxies: Vec<String>,
}

impl Repository {
    pub fn new(url: &str) -> Result<Repository, ResolveError> {
        Ok(Repository {
            url: normalize_url(url)?,
            proxies: Vec::new(),
        })
    }

    pub fn with_proxy(mut self, url: &str) -> Result<Repository, ResolveError> {
        let url = normalize_url(url)?;
        if !self.proxies.contains(&url) {
            self.proxies.push(url);
        }
        Ok(self)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn proxies(&self) -> &[String] {
        &self.proxies
    }

    /// Whether `url` names this repository, either directly or through one
    /// of its proxies.
    pub fn matches_url(&self, url: &str) -> bool {
        self.url == url || self.proxies.iter().any(|p| p == url)
    }
}

/// Validates a repository URL and guarantees the trailing `/`.
pub fn normalize_url(url: &str) -> Result<String, ResolveError> {
    if url.is_empty() {
        return Err(ResolveError::InvalidArgument(
            "url cannot be empty".to_string(),
        ));
    }
    if url.ends_with('/') {
        Ok(url.to_string())
    } else {
        Ok(format!("{}/", url))
    }
}

/// Ordered-set insertion: appends unless an equal repository is present.
pub fn add_unique(repositories: &mut Vec<Repository>, repository: Repository) {
    if !repositories.contains(&repository) {
        repositories.push(repository);
    }
}

/// Appends the default central repository unless some member already covers
/// it by URL or proxy.
pub fn ensure_central(repositories: &mut Vec<Repository>) {
    for repository in repositories.iter() {
        if repository.matches_url(CENTRAL_REPOSITORY) {
            return;
        }
    }
    // CENTRAL_REPOSITORY is a valid normalized URL
    if let Ok(central) = Repository::new(CENTRAL_REPOSITORY) {
        repositories.push(central);
    }
}
