use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_recursion::async_recursion;
use futures::future::join_all;
use tracing::{debug, info};

use crate::error::ResolveError;
use crate::maven::coordinates::{Coordinate, Scope, VersionFlavor, DEFAULT_TARGET_SCOPES};
use crate::maven::metadata;
use crate::maven::paths;
use crate::maven::pom::{self, AncestorLevel, DependencyEntry, DependencySection};
use crate::maven::repository::{self, Repository};
use crate::maven::session::ResolverSession;
use crate::util::inject::JarInjector;

/// Management sections are a version lookup table for descendants, so they
/// are extracted without scope filtering.
const MANAGEMENT_SCOPES: [Scope; 6] = [
    Scope::Compile,
    Scope::Provided,
    Scope::Runtime,
    Scope::Test,
    Scope::System,
    Scope::Import,
];

/// A fully resolved artifact: concrete versions, candidate download URLs,
/// the merged repository list, the parent chain and the resolved transitive
/// dependencies. Instances are immutable and shared via `Arc`.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub(crate) coordinate: Coordinate,
    pub(crate) scope: Scope,
    pub(crate) stripped_version: String,
    pub(crate) real_version: String,
    pub(crate) properties: HashMap<String, String>,
    pub(crate) repositories: Vec<Repository>,
    pub(crate) declared_repositories: Vec<Repository>,
    pub(crate) jar_urls: Vec<String>,
    pub(crate) pom_urls: Vec<String>,
    pub(crate) parent: Option<Arc<ArtifactParent>>,
    pub(crate) dependencies: Vec<Arc<Artifact>>,
}

impl Artifact {
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn group_id(&self) -> &str {
        self.coordinate.group_id()
    }

    pub fn artifact_id(&self) -> &str {
        self.coordinate.artifact_id()
    }

    pub fn version(&self) -> &str {
        self.coordinate.version()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Version without the snapshot suffix.
    pub fn stripped_version(&self) -> &str {
        &self.stripped_version
    }

    /// Version as it appears in repository file names; differs from
    /// `stripped_version` only for timestamped snapshots.
    pub fn real_version(&self) -> &str {
        &self.real_version
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// The merged repository list this artifact was resolved against.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Repositories declared by this artifact's own descriptor.
    pub fn declared_repositories(&self) -> &[Repository] {
        &self.declared_repositories
    }

    pub fn jar_urls(&self) -> &[String] {
        &self.jar_urls
    }

    pub fn pom_urls(&self) -> &[String] {
        &self.pom_urls
    }

    pub fn parent(&self) -> Option<&Arc<ArtifactParent>> {
        self.parent.as_ref()
    }

    /// Direct dependencies within the target scope set, declaration order,
    /// followed by hard dependencies inherited from the parent chain.
    pub fn dependencies(&self) -> &[Arc<Artifact>] {
        &self.dependencies
    }

    /// An artifact without a readable descriptor resolves to an empty shell
    /// rather than an error.
    pub fn is_phantom(&self) -> bool {
        self.properties.is_empty() && self.parent.is_none() && self.dependencies.is_empty()
    }

    pub(crate) fn with_scope(&self, scope: Scope) -> Artifact {
        let mut copy = self.clone();
        copy.scope = scope;
        copy
    }

    /// Downloads the jar to `output`, overwriting an existing file.
    pub async fn download_jar(
        &self,
        session: &ResolverSession,
        output: &Path,
    ) -> Result<(), ResolveError> {
        session
            .store()
            .download_to(output, &self.jar_urls, session.fetcher())
            .await
            .map_err(|source| ResolveError::Fetch {
                coordinate: self.coordinate.to_string(),
                source,
            })
    }

    /// Downloads the descriptor to `output`, overwriting an existing file.
    pub async fn download_pom(
        &self,
        session: &ResolverSession,
        output: &Path,
    ) -> Result<(), ResolveError> {
        session
            .store()
            .download_to(output, &self.pom_urls, session.fetcher())
            .await
            .map_err(|source| ResolveError::Fetch {
                coordinate: self.coordinate.to_string(),
                source,
            })
    }

    /// Ensures the jar is present at `output` and hands it to the injector.
    /// An already cached jar is not downloaded again.
    pub async fn inject_jar(
        &self,
        session: &ResolverSession,
        output: &Path,
        injector: &dyn JarInjector,
    ) -> Result<(), ResolveError> {
        session
            .store()
            .get_or_download(output, &self.jar_urls, session.fetcher())
            .await
            .map_err(|source| ResolveError::Fetch {
                coordinate: self.coordinate.to_string(),
                source,
            })?;
        injector.inject(output).await
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinate)
    }
}

/// A resolved ancestor descriptor. Unlike `Artifact` it has no jar and no
/// scope; its management entries stay unresolved because they are only a
/// version lookup table for descendants.
#[derive(Debug, Clone)]
pub struct ArtifactParent {
    pub(crate) coordinate: Coordinate,
    pub(crate) stripped_version: String,
    pub(crate) real_version: String,
    pub(crate) properties: HashMap<String, String>,
    pub(crate) repositories: Vec<Repository>,
    pub(crate) declared_repositories: Vec<Repository>,
    pub(crate) pom_urls: Vec<String>,
    pub(crate) parent: Option<Arc<ArtifactParent>>,
    pub(crate) soft_dependencies: Vec<DependencyEntry>,
    pub(crate) hard_dependencies: Vec<Arc<Artifact>>,
}

impl ArtifactParent {
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn stripped_version(&self) -> &str {
        &self.stripped_version
    }

    pub fn real_version(&self) -> &str {
        &self.real_version
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn declared_repositories(&self) -> &[Repository] {
        &self.declared_repositories
    }

    pub fn pom_urls(&self) -> &[String] {
        &self.pom_urls
    }

    pub fn parent(&self) -> Option<&Arc<ArtifactParent>> {
        self.parent.as_ref()
    }

    /// Unresolved management entries, declaration order, all scopes.
    pub fn soft_dependencies(&self) -> &[DependencyEntry] {
        &self.soft_dependencies
    }

    /// Resolved dependencies a child inherits from this ancestor.
    pub fn hard_dependencies(&self) -> &[Arc<Artifact>] {
        &self.hard_dependencies
    }
}

impl fmt::Display for ArtifactParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinate)
    }
}

/// Entry point of a resolution. Collects the coordinate, the requested
/// scope, the repositories to search and optional direct download URLs,
/// then runs against a session.
#[derive(Debug, Clone)]
pub struct ArtifactRequest {
    coordinate: Coordinate,
    scope: Scope,
    repositories: Vec<Repository>,
    direct_jar_urls: Vec<String>,
}

impl ArtifactRequest {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<ArtifactRequest, ResolveError> {
        Ok(ArtifactRequest {
            coordinate: Coordinate::new(group_id, artifact_id, version)?,
            scope: Scope::Compile,
            repositories: Vec::new(),
            direct_jar_urls: Vec::new(),
        })
    }

    pub fn scope(mut self, scope: Scope) -> ArtifactRequest {
        self.scope = scope;
        self
    }

    pub fn repository(mut self, url: &str) -> Result<ArtifactRequest, ResolveError> {
        repository::add_unique(&mut self.repositories, Repository::new(url)?);
        Ok(self)
    }

    pub fn repository_value(mut self, repository: Repository) -> ArtifactRequest {
        repository::add_unique(&mut self.repositories, repository);
        self
    }

    /// A download URL template tried before any repository-derived URL.
    /// `{GROUP}`, `{ARTIFACT}` and `{VERSION}` are expanded at resolution
    /// time; a `.jar` template also yields its `.pom` twin.
    pub fn direct_jar_url(mut self, url: &str) -> Result<ArtifactRequest, ResolveError> {
        if url.is_empty() {
            return Err(ResolveError::InvalidArgument(
                "direct jar url cannot be empty".to_string(),
            ));
        }
        if !self.direct_jar_urls.iter().any(|u| u == url) {
            self.direct_jar_urls.push(url.to_string());
        }
        Ok(self)
    }

    /// Resolves with the default compile+runtime scope filter. `depth`
    /// limits transitive resolution: 0 resolves only this artifact, -1 is
    /// unlimited.
    pub async fn resolve(
        self,
        session: &ResolverSession,
        depth: i32,
    ) -> Result<Arc<Artifact>, ResolveError> {
        self.resolve_with_scopes(session, depth, &DEFAULT_TARGET_SCOPES)
            .await
    }

    pub async fn resolve_with_scopes(
        self,
        session: &ResolverSession,
        depth: i32,
        target_scopes: &[Scope],
    ) -> Result<Arc<Artifact>, ResolveError> {
        if depth < -1 {
            return Err(ResolveError::InvalidArgument(
                "depth must be -1 (unlimited) or non-negative".to_string(),
            ));
        }
        if target_scopes.is_empty() {
            return Err(ResolveError::InvalidArgument(
                "target scope set cannot be empty".to_string(),
            ));
        }

        info!(coordinate = %self.coordinate, depth, "resolving artifact");
        session.store().ensure_root().await?;
        resolve_artifact(
            session,
            self.coordinate,
            self.scope,
            self.repositories,
            self.direct_jar_urls,
            depth,
            target_scopes,
            Vec::new(),
        )
        .await
    }
}

/// Depth of a dependency one level below `depth`.
fn dependency_depth(depth: i32) -> i32 {
    if depth == -1 {
        -1
    } else {
        (depth - 1).max(0)
    }
}

/// Depth at which an ancestor descriptor is resolved. Unlimited stays
/// unlimited; any limited request reads one level of the ancestor's own
/// dependencies so they can be inherited.
fn parent_depth(depth: i32) -> i32 {
    if depth == -1 {
        -1
    } else {
        1
    }
}

fn synthetic_properties(properties: &mut HashMap<String, String>, coordinate: &Coordinate) {
    for prefix in ["project", "pom"] {
        properties.insert(
            format!("{}.groupId", prefix),
            coordinate.group_id().to_string(),
        );
        properties.insert(
            format!("{}.artifactId", prefix),
            coordinate.artifact_id().to_string(),
        );
        properties.insert(
            format!("{}.version", prefix),
            coordinate.version().to_string(),
        );
    }
}

fn ancestor_chain(parent: &Option<Arc<ArtifactParent>>) -> Vec<&ArtifactParent> {
    let mut chain = Vec::new();
    let mut current = parent.as_deref();
    while let Some(level) = current {
        chain.push(level);
        current = level.parent.as_deref();
    }
    chain
}

fn ancestor_levels<'a>(chain: &[&'a ArtifactParent]) -> Vec<AncestorLevel<'a>> {
    chain
        .iter()
        .map(|level| AncestorLevel {
            properties: &level.properties,
            soft_dependencies: &level.soft_dependencies,
            version: level.coordinate.version(),
        })
        .collect()
}

fn merge_repositories(
    callers: &[Repository],
    declared: &[Repository],
    chain: &[&ArtifactParent],
) -> Vec<Repository> {
    let mut merged = callers.to_vec();
    for repo in declared {
        repository::add_unique(&mut merged, repo.clone());
    }
    for level in chain {
        for repo in &level.declared_repositories {
            repository::add_unique(&mut merged, repo.clone());
        }
    }
    repository::ensure_central(&mut merged);
    merged
}

#[async_recursion]
#[allow(clippy::too_many_arguments)]
async fn resolve_artifact(
    session: &ResolverSession,
    coordinate: Coordinate,
    scope: Scope,
    repositories: Vec<Repository>,
    direct_jar_urls: Vec<String>,
    depth: i32,
    target_scopes: &[Scope],
    active: Vec<String>,
) -> Result<Arc<Artifact>, ResolveError> {
    // memoization is keyed by the coordinate as requested, before any
    // symbolic version is replaced
    let key = coordinate.to_string();
    let final_depth = depth == 0;
    if let Some(cached) = session.cached_artifact(&key, scope, target_scopes, final_depth) {
        return Ok(cached);
    }

    if active.contains(&key) {
        debug!(%key, "dependency cycle, cutting with phantom");
        return Ok(Arc::new(Artifact {
            stripped_version: coordinate.stripped_version().to_string(),
            real_version: coordinate.stripped_version().to_string(),
            coordinate,
            scope,
            properties: HashMap::new(),
            repositories,
            declared_repositories: Vec::new(),
            jar_urls: Vec::new(),
            pom_urls: Vec::new(),
            parent: None,
            dependencies: Vec::new(),
        }));
    }
    let mut active = active;
    active.push(key.clone());

    // symbolic version resolution; a latest/release replacement may itself
    // be a snapshot needing a second round against version-level metadata
    let mut coordinate = coordinate;
    let flavor = coordinate.flavor();
    if matches!(flavor, VersionFlavor::Latest | VersionFlavor::Release) {
        let version = match flavor {
            VersionFlavor::Latest => {
                metadata::resolve_latest(session.documents(), session.store(), &coordinate, &repositories).await?
            }
            _ => {
                metadata::resolve_release(session.documents(), session.store(), &coordinate, &repositories).await?
            }
        };
        coordinate = coordinate.with_version(version);
    }
    let stripped = coordinate.stripped_version().to_string();
    let real = match coordinate.flavor() {
        VersionFlavor::Snapshot => {
            metadata::resolve_snapshot(session.documents(), session.store(), &coordinate, &repositories).await?
        }
        _ => stripped.clone(),
    };

    // candidate URLs, direct templates first
    let mut jar_urls = Vec::new();
    let mut pom_urls = Vec::new();
    for template in &direct_jar_urls {
        let url = paths::expand_direct_url(
            template,
            coordinate.group_id(),
            coordinate.artifact_id(),
            coordinate.version(),
        );
        let pom = url.replace(".jar", ".pom");
        if pom != url {
            pom_urls.push(pom);
        }
        jar_urls.push(url);
    }
    for repo in &repositories {
        jar_urls.push(paths::jar_url(
            repo.url(),
            coordinate.group_id(),
            coordinate.artifact_id(),
            coordinate.version(),
            &real,
        ));
        pom_urls.push(paths::pom_url(
            repo.url(),
            coordinate.group_id(),
            coordinate.artifact_id(),
            coordinate.version(),
            &real,
        ));
    }

    let pom_path = session.store().pom_path(
        coordinate.group_id(),
        coordinate.artifact_id(),
        coordinate.version(),
    );
    let document = match session
        .documents()
        .get_or_download(session.store(), &pom_path, &pom_urls)
        .await
    {
        Ok(document) => document,
        Err(err) => {
            // no repository carries a descriptor; resolve to an empty shell
            // so a jar-only artifact still participates in the graph
            debug!(%key, error = %err, "descriptor unavailable, phantom resolution");
            let artifact = Arc::new(Artifact {
                coordinate,
                scope,
                stripped_version: stripped,
                real_version: real,
                properties: HashMap::new(),
                repositories,
                declared_repositories: Vec::new(),
                jar_urls,
                pom_urls,
                parent: None,
                dependencies: Vec::new(),
            });
            session.memoize_artifact(key, artifact.clone(), target_scopes.to_vec(), final_depth);
            return Ok(artifact);
        }
    };

    let mut properties = pom::extract_properties(&document);
    synthetic_properties(&mut properties, &coordinate);
    for prefix in ["project", "pom"] {
        properties.insert(format!("{}.scope", prefix), scope.name().to_string());
    }

    let parent = match pom::extract_parent_ref(&document, &properties, &key)? {
        Some(parent_ref) => {
            resolve_parent(
                session,
                parent_ref,
                repositories.clone(),
                parent_depth(depth),
                target_scopes,
                vec![key.clone()],
                active.clone(),
            )
            .await?
        }
        None => None,
    };

    let chain = ancestor_chain(&parent);
    let ancestors = ancestor_levels(&chain);

    let mut property_chain: Vec<&HashMap<String, String>> = vec![&properties];
    property_chain.extend(ancestors.iter().map(|level| level.properties));
    let declared =
        pom::extract_declared_repositories(&document, &repositories, &property_chain, &key)?;
    drop(property_chain);

    let merged = merge_repositories(&repositories, &declared, &chain);

    let dependencies = if depth == 0 {
        Vec::new()
    } else {
        let entries =
            pom::extract_dependencies(&document, DependencySection::Hard, &properties, &ancestors, target_scopes);
        let mut pending = Vec::with_capacity(entries.len());
        for entry in entries {
            let dep = Coordinate::new(entry.group_id, entry.artifact_id, entry.version)?;
            pending.push((dep, entry.scope));
        }

        let next_depth = dependency_depth(depth);
        let futures = pending.into_iter().map(|(dep, dep_scope)| {
            resolve_artifact(
                session,
                dep,
                dep_scope,
                merged.clone(),
                Vec::new(),
                next_depth,
                target_scopes,
                active.clone(),
            )
        });

        let mut dependencies = Vec::new();
        for resolved in join_all(futures).await {
            dependencies.push(resolved?);
        }
        // inherited dependencies, nearest ancestor first
        for level in &chain {
            dependencies.extend(level.hard_dependencies.iter().cloned());
        }
        dependencies
    };

    drop(ancestors);
    drop(chain);

    let artifact = Arc::new(Artifact {
        coordinate,
        scope,
        stripped_version: stripped,
        real_version: real,
        properties,
        repositories: merged,
        declared_repositories: declared,
        jar_urls,
        pom_urls,
        parent,
        dependencies,
    });
    session.memoize_artifact(key, artifact.clone(), target_scopes.to_vec(), final_depth);
    Ok(artifact)
}

#[async_recursion]
async fn resolve_parent(
    session: &ResolverSession,
    parent_ref: pom::ParentRef,
    repositories: Vec<Repository>,
    depth: i32,
    target_scopes: &[Scope],
    visited: Vec<String>,
    active: Vec<String>,
) -> Result<Option<Arc<ArtifactParent>>, ResolveError> {
    let coordinate = Coordinate::new(
        parent_ref.group_id,
        parent_ref.artifact_id,
        parent_ref.version,
    )?;
    let key = coordinate.to_string();

    if visited.contains(&key) {
        debug!(%key, "inheritance cycle, ending parent chain");
        return Ok(None);
    }
    let final_depth = depth == 0;
    if let Some(cached) = session.cached_parent(&key, target_scopes, final_depth) {
        return Ok(Some(cached));
    }
    let mut visited = visited;
    visited.push(key.clone());

    let mut coordinate = coordinate;
    let flavor = coordinate.flavor();
    if matches!(flavor, VersionFlavor::Latest | VersionFlavor::Release) {
        let version = match flavor {
            VersionFlavor::Latest => {
                metadata::resolve_latest(session.documents(), session.store(), &coordinate, &repositories).await?
            }
            _ => {
                metadata::resolve_release(session.documents(), session.store(), &coordinate, &repositories).await?
            }
        };
        coordinate = coordinate.with_version(version);
    }
    let stripped = coordinate.stripped_version().to_string();
    let real = match coordinate.flavor() {
        // snapshot metadata failures are tolerated for ancestors: parent
        // descriptors are often published unstamped
        VersionFlavor::Snapshot => {
            match metadata::resolve_snapshot(session.documents(), session.store(), &coordinate, &repositories)
                .await
            {
                Ok(version) => version,
                Err(err) => {
                    debug!(%key, error = %err, "ancestor snapshot metadata missing, using unstamped version");
                    coordinate.version().to_string()
                }
            }
        }
        _ => stripped.clone(),
    };

    let mut pom_urls = Vec::new();
    for repo in &repositories {
        pom_urls.push(paths::pom_url(
            repo.url(),
            coordinate.group_id(),
            coordinate.artifact_id(),
            coordinate.version(),
            &real,
        ));
    }

    let pom_path = session.store().pom_path(
        coordinate.group_id(),
        coordinate.artifact_id(),
        coordinate.version(),
    );
    let document = match session
        .documents()
        .get_or_download(session.store(), &pom_path, &pom_urls)
        .await
    {
        Ok(document) => document,
        Err(err) => {
            debug!(%key, error = %err, "ancestor descriptor unavailable, phantom resolution");
            let parent = Arc::new(ArtifactParent {
                coordinate,
                stripped_version: stripped,
                real_version: real,
                properties: HashMap::new(),
                repositories,
                declared_repositories: Vec::new(),
                pom_urls,
                parent: None,
                soft_dependencies: Vec::new(),
                hard_dependencies: Vec::new(),
            });
            session.memoize_parent(key, parent.clone(), target_scopes.to_vec(), final_depth);
            return Ok(Some(parent));
        }
    };

    let mut properties = pom::extract_properties(&document);
    synthetic_properties(&mut properties, &coordinate);

    let grandparent = match pom::extract_parent_ref(&document, &properties, &key)? {
        Some(grandparent_ref) => {
            resolve_parent(
                session,
                grandparent_ref,
                repositories.clone(),
                parent_depth(depth),
                target_scopes,
                visited.clone(),
                active.clone(),
            )
            .await?
        }
        None => None,
    };

    let chain = ancestor_chain(&grandparent);
    let ancestors = ancestor_levels(&chain);

    let mut property_chain: Vec<&HashMap<String, String>> = vec![&properties];
    property_chain.extend(ancestors.iter().map(|level| level.properties));
    let declared =
        pom::extract_declared_repositories(&document, &repositories, &property_chain, &key)?;
    drop(property_chain);

    let merged = merge_repositories(&repositories, &declared, &chain);

    let (soft_dependencies, hard_dependencies) = if depth == 0 {
        (Vec::new(), Vec::new())
    } else {
        let soft = pom::extract_dependencies(
            &document,
            DependencySection::Soft,
            &properties,
            &ancestors,
            &MANAGEMENT_SCOPES,
        );
        let entries =
            pom::extract_dependencies(&document, DependencySection::Hard, &properties, &ancestors, target_scopes);
        let mut pending = Vec::with_capacity(entries.len());
        for entry in entries {
            let dep = Coordinate::new(entry.group_id, entry.artifact_id, entry.version)?;
            pending.push((dep, entry.scope));
        }

        let next_depth = dependency_depth(depth);
        let futures = pending.into_iter().map(|(dep, dep_scope)| {
            resolve_artifact(
                session,
                dep,
                dep_scope,
                merged.clone(),
                Vec::new(),
                next_depth,
                target_scopes,
                active.clone(),
            )
        });

        let mut hard = Vec::new();
        for resolved in join_all(futures).await {
            hard.push(resolved?);
        }
        (soft, hard)
    };

    drop(ancestors);
    drop(chain);

    let parent = Arc::new(ArtifactParent {
        coordinate,
        stripped_version: stripped,
        real_version: real,
        properties,
        repositories: merged,
        declared_repositories: declared,
        pom_urls,
        parent: grandparent,
        soft_dependencies,
        hard_dependencies,
    });
    session.memoize_parent(key, parent.clone(), target_scopes.to_vec(), final_depth);
    Ok(Some(parent))
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::unlimited(-1, -1)]
    #[case::one_becomes_final(1, 0)]
    #[case::final_stays_final(0, 0)]
    #[case::deep(5, 4)]
    fn test_dependency_depth(#[case] depth: i32, #[case] expected: i32) {
        assert_eq!(dependency_depth(depth), expected);
    }

    #[rstest]
    #[case::unlimited(-1, -1)]
    #[case::limited(0, 1)]
    #[case::limited_deep(7, 1)]
    fn test_parent_depth(#[case] depth: i32, #[case] expected: i32) {
        assert_eq!(parent_depth(depth), expected);
    }

    #[test]
    fn test_synthetic_properties_both_prefixes() {
        let coordinate = Coordinate::new("org.example", "lib", "1.0.0").unwrap();
        let mut properties = HashMap::new();
        synthetic_properties(&mut properties, &coordinate);
        assert_eq!(
            properties.get("project.version").map(String::as_str),
            Some("1.0.0")
        );
        assert_eq!(
            properties.get("pom.groupId").map(String::as_str),
            Some("org.example")
        );
        assert_eq!(
            properties.get("pom.artifactId").map(String::as_str),
            Some("lib")
        );
    }

    #[tokio::test]
    async fn test_request_rejects_bad_depth() {
        let dir = tempfile::tempdir().unwrap();
        let session = ResolverSession::new(dir.path());
        let request = ArtifactRequest::new("org", "lib", "1.0").unwrap();
        assert!(matches!(
            request.resolve(&session, -2).await,
            Err(ResolveError::InvalidArgument(_))
        ));

        let request = ArtifactRequest::new("org", "lib", "1.0").unwrap();
        assert!(matches!(
            request.resolve_with_scopes(&session, 0, &[]).await,
            Err(ResolveError::InvalidArgument(_))
        ));
    }
}
