//! Backend abstraction.
//!
//! The provisioning backend is reached exclusively through this trait, so
//! the deployment flow can be driven in tests without spawning the real
//! CLI tool.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// A resolved KV namespace. The preview id is only known when this run
/// created the namespace; a lookup of a pre-existing one cannot recover it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRecord {
    pub name: String,
    pub id: String,
    pub preview_id: Option<String>,
}

/// Operations the provisioning flow needs from the backend tool.
///
/// Every method maps to exactly one external invocation; none of them retry.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Queries authentication status and returns the account id.
    async fn check_auth(&self) -> Result<String>;

    /// Looks a namespace up by name in the backend's listing output.
    async fn find_namespace(&self, name: &str) -> Result<Option<NamespaceRecord>>;

    /// Creates a namespace and returns its identifiers.
    async fn create_namespace(&self, name: &str) -> Result<NamespaceRecord>;

    /// Deploys the worker. `config_path` is passed through as `--config`
    /// when present; `None` relies on the backend's own config discovery.
    async fn deploy(&self, config_path: Option<&Path>) -> Result<()>;

    /// Assigns a secret, transmitting the value via the child's stdin only.
    async fn put_secret(&self, name: &str, value: &str) -> Result<()>;

    /// Writes one KV entry, taking the value from a file to sidestep shell
    /// quoting of arbitrary JSON.
    async fn kv_bulk_put(
        &self,
        key: &str,
        payload_path: &Path,
        binding: &str,
        preview: bool,
    ) -> Result<()>;
}

/// Finds the namespace by name, creating it when absent.
///
/// Lookup-then-create is not atomic; two concurrent runs against the same
/// name can race. Accepted limitation.
pub async fn resolve_namespace(backend: &dyn Backend, name: &str) -> Result<NamespaceRecord> {
    if let Some(existing) = backend.find_namespace(name).await? {
        tracing::info!(
            name,
            id = existing.id,
            "namespace already exists, reusing it (preview id unknown for pre-existing namespaces)"
        );
        return Ok(existing);
    }
    tracing::info!(name, "namespace not found, creating it");
    backend.create_namespace(name).await
}
