//! Validated user intent for one provisioning run.

use std::path::PathBuf;

use regex::Regex;

use crate::error::{DeployError, Result};

/// Cloudflare caps KV namespace titles at 64 characters.
pub const MAX_NAMESPACE_NAME_LEN: usize = 64;

/// Everything the operator declares up front. Collected once per run and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningRequest {
    pub worker_name: String,
    pub namespace_name: String,
    pub base_url: String,
    pub config_path: PathBuf,
}

impl ProvisioningRequest {
    /// Builds a request, rejecting it before any external side effect when a
    /// required value is missing or malformed.
    pub fn new(
        worker_name: impl Into<String>,
        namespace_name: impl Into<String>,
        base_url: impl Into<String>,
        config_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let worker_name = worker_name.into();
        let namespace_name = namespace_name.into();
        let base_url = base_url.into();
        let config_path = config_path.into();

        if !valid_worker_name(&worker_name) {
            return Err(DeployError::Input(format!(
                "worker name {worker_name:?} must match [A-Za-z0-9-]+"
            )));
        }
        if !valid_namespace_name(&namespace_name) {
            return Err(DeployError::Input(format!(
                "namespace name {namespace_name:?} must match [A-Za-z0-9_-]+ and be at most {MAX_NAMESPACE_NAME_LEN} characters"
            )));
        }
        if base_url.is_empty() {
            return Err(DeployError::Input("base URL is required".to_string()));
        }
        if config_path.as_os_str().is_empty() {
            return Err(DeployError::Input("config path is required".to_string()));
        }

        Ok(Self {
            worker_name,
            namespace_name,
            base_url,
            config_path,
        })
    }
}

pub fn valid_worker_name(name: &str) -> bool {
    Regex::new(r"^[a-zA-Z0-9-]+$").unwrap().is_match(name)
}

pub fn valid_namespace_name(name: &str) -> bool {
    name.len() <= MAX_NAMESPACE_NAME_LEN
        && Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap().is_match(name)
}
