//! Resolves Maven coordinates against remote repositories into a graph of
//! artifacts: symbolic versions (`latest`, `release`, `-SNAPSHOT`) are
//! replaced with concrete ones, descriptors are fetched and cached, parent
//! chains are walked and transitive dependencies are resolved concurrently
//! up to a caller-chosen depth.
//!
//! ```no_run
//! use artifact_resolver::{ArtifactRequest, ResolverSession};
//!
//! # async fn example() -> Result<(), artifact_resolver::ResolveError> {
//! let session = ResolverSession::new("/tmp/artifact-cache");
//! let artifact = ArtifactRequest::new("com.google.guava", "guava", "27.1-jre")?
//!     .repository("https://repo1.maven.org/maven2/")?
//!     .resolve(&session, -1)
//!     .await?;
//! for dependency in artifact.dependencies() {
//!     println!("{}", dependency);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod maven;
pub mod util;

pub use error::{FetchError, ResolveError};
pub use maven::artifact::{Artifact, ArtifactParent, ArtifactRequest};
pub use maven::coordinates::{Coordinate, Scope, VersionFlavor, DEFAULT_TARGET_SCOPES};
pub use maven::repository::Repository;
pub use maven::session::ResolverSession;
pub use maven::CENTRAL_REPOSITORY;
pub use util::inject::JarInjector;
