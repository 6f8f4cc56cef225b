use std::fmt;

use crate::error::ResolveError;

/// The `(groupId, artifactId, version)` triple identifying an artifact.
/// Identity, equality and memoization are based on this triple only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl Coordinate {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Coordinate, ResolveError> {
        let coordinate = Coordinate {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        };
        if coordinate.group_id.is_empty() {
            return Err(ResolveError::InvalidArgument(
                "groupId cannot be empty".to_string(),
            ));
        }
        if coordinate.artifact_id.is_empty() {
            return Err(ResolveError::InvalidArgument(
                "artifactId cannot be empty".to_string(),
            ));
        }
        if coordinate.version.is_empty() {
            return Err(ResolveError::InvalidArgument(
                "version cannot be empty".to_string(),
            ));
        }
        Ok(coordinate)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn flavor(&self) -> VersionFlavor {
        VersionFlavor::of(&self.version)
    }

    /// Version with the trailing `-SNAPSHOT`/`-LATEST` suffix removed for
    /// snapshot coordinates, the version unchanged otherwise.
    pub fn stripped_version(&self) -> &str {
        match self.flavor() {
            VersionFlavor::Snapshot => match self.version.rfind('-') {
                Some(idx) => &self.version[..idx],
                None => &self.version,
            },
            _ => &self.version,
        }
    }

    /// Same triple with the version replaced, used once a symbolic version
    /// has been resolved to a concrete one.
    pub fn with_version(&self, version: impl Into<String>) -> Coordinate {
        Coordinate {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// How a version string is to be resolved, computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFlavor {
    Exact,
    Latest,
    Release,
    Snapshot,
}

impl VersionFlavor {
    pub fn of(version: &str) -> VersionFlavor {
        if version.ends_with("-SNAPSHOT") || version.ends_with("-LATEST") {
            VersionFlavor::Snapshot
        } else if version.eq_ignore_ascii_case("release") {
            VersionFlavor::Release
        } else if version.eq_ignore_ascii_case("latest") {
            VersionFlavor::Latest
        } else {
            VersionFlavor::Exact
        }
    }
}

/// Dependency usage classification used to filter transitive resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

/// Scope filter applied when the caller does not supply one.
pub const DEFAULT_TARGET_SCOPES: [Scope; 2] = [Scope::Compile, Scope::Runtime];

impl Scope {
    pub fn name(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
        }
    }

    /// Case-insensitive lookup; unknown or missing names default to
    /// `Compile`, never an error.
    pub fn from_name(name: Option<&str>) -> Scope {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => return Scope::Compile,
        };

        for scope in [
            Scope::Compile,
            Scope::Provided,
            Scope::Runtime,
            Scope::Test,
            Scope::System,
            Scope::Import,
        ] {
            if scope.name().eq_ignore_ascii_case(name) {
                return scope;
            }
        }
        Scope::Compile
    }
}
