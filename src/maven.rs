pub mod artifact;
pub mod coordinates;
pub mod metadata;
pub mod paths;
pub mod placeholder;
pub mod pom;
pub mod repository;
pub mod session;

/// Fallback repository appended to every merged repository list unless a
/// caller-supplied repository already covers it by URL or proxy.
pub const CENTRAL_REPOSITORY: &str = "https://repo1.maven.org/maven2/";
