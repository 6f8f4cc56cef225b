use tracing::debug;

use crate::error::{FetchError, ResolveError};
use crate::maven::coordinates::Coordinate;
use crate::maven::paths;
use crate::maven::repository::Repository;
use crate::util::cache::CacheStore;
use crate::util::documents::DocumentProvider;
use crate::util::xml::XmlDocument;

/// Resolves symbolic versions against `maven-metadata.xml`. When metadata
/// cannot be fetched from any repository, the same elements are looked for
/// in the locally cached descriptor before the fetch failure is surfaced.

pub async fn resolve_latest(
    documents: &DocumentProvider,
    store: &CacheStore,
    coordinate: &Coordinate,
    repositories: &[Repository],
) -> Result<String, ResolveError> {
    resolve_versioning_element(documents, store, coordinate, repositories, "latest").await
}

pub async fn resolve_release(
    documents: &DocumentProvider,
    store: &CacheStore,
    coordinate: &Coordinate,
    repositories: &[Repository],
) -> Result<String, ResolveError> {
    resolve_versioning_element(documents, store, coordinate, repositories, "release").await
}

/// `strippedVersion-timestamp-buildNumber`, from version-directory metadata.
pub async fn resolve_snapshot(
    documents: &DocumentProvider,
    store: &CacheStore,
    coordinate: &Coordinate,
    repositories: &[Repository],
) -> Result<String, ResolveError> {
    let urls = paths::version_level_metadata_urls(
        repositories,
        coordinate.group_id(),
        coordinate.artifact_id(),
        coordinate.version(),
    );

    let document = match documents.get_remote(&urls).await {
        Ok(document) => document,
        Err(err) => {
            debug!(coordinate = %coordinate, "snapshot metadata unreachable, trying local descriptor");
            match documents.get_local(store, &cache_pom(store, coordinate)).await {
                Ok(document) => document,
                Err(_) => {
                    return Err(ResolveError::MetadataUnavailable {
                        coordinate: coordinate.to_string(),
                        source: err,
                    })
                }
            }
        }
    };

    let stamp = snapshot_stamp(&document).ok_or_else(|| ResolveError::MetadataUnavailable {
        coordinate: coordinate.to_string(),
        source: FetchError::NotFound,
    })?;
    Ok(format!("{}-{}", coordinate.stripped_version(), stamp))
}

async fn resolve_versioning_element(
    documents: &DocumentProvider,
    store: &CacheStore,
    coordinate: &Coordinate,
    repositories: &[Repository],
    element: &str,
) -> Result<String, ResolveError> {
    let urls = paths::artifact_level_metadata_urls(
        repositories,
        coordinate.group_id(),
        coordinate.artifact_id(),
    );

    let document = match documents.get_remote(&urls).await {
        Ok(document) => document,
        Err(err) => {
            debug!(coordinate = %coordinate, element, "version metadata unreachable, trying local descriptor");
            match documents.get_local(store, &cache_pom(store, coordinate)).await {
                Ok(document) => document,
                Err(_) => {
                    return Err(ResolveError::MetadataUnavailable {
                        coordinate: coordinate.to_string(),
                        source: err,
                    })
                }
            }
        }
    };

    versioning_text(&document, element).ok_or_else(|| ResolveError::MalformedDescriptor {
        coordinate: coordinate.to_string(),
        detail: format!("no {} version in repository metadata", element),
    })
}

fn versioning_text(document: &XmlDocument, element: &str) -> Option<String> {
    let node = document.first(&["metadata", "versioning", element])?;
    if node.has_element_children() || node.text.is_empty() {
        return None;
    }
    Some(node.text.split_whitespace().collect())
}

/// `timestamp-buildNumber` from `/metadata/versioning/snapshot`; both
/// elements are required.
fn snapshot_stamp(document: &XmlDocument) -> Option<String> {
    let snapshot = document.first(&["metadata", "versioning", "snapshot"])?;
    let timestamp: String = snapshot.child_text("timestamp")?.split_whitespace().collect();
    let build_number: String = snapshot.child_text("buildNumber")?.split_whitespace().collect();
    if timestamp.is_empty() || build_number.is_empty() {
        return None;
    }
    Some(format!("{}-{}", timestamp, build_number))
}

fn cache_pom(store: &CacheStore, coordinate: &Coordinate) -> std::path::PathBuf {
    store.pom_path(
        coordinate.group_id(),
        coordinate.artifact_id(),
        coordinate.version(),
    )
}
