use std::path::Path;

use async_trait::async_trait;

use crate::error::ResolveError;

/// Host-runtime capability that makes a resolved jar visible to a running
/// process's class-loading path. The resolver only ever calls this after a
/// jar has been downloaded; failures are reported to the caller and never
/// retried internally.
#[async_trait]
pub trait JarInjector: Send + Sync {
    async fn inject(&self, jar: &Path) -> Result<(), ResolveError>;
}
