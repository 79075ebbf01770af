//! Deployment driver.
//!
//! The flow from an untouched config to a deployed worker is a small state
//! machine; each mutating transition merges into the in-memory document and
//! persists the whole file before moving on, so an abort at any checkpoint
//! leaves the last fully written document behind.

use std::path::{Path, PathBuf};

use edgeflow_config::{DEFAULT_CONFIG_FILE, KvNamespace, WranglerConfig};

use crate::backend::{Backend, NamespaceRecord};
use crate::error::{DeployError, Result};
use crate::request::ProvisioningRequest;
use crate::{BASE_URL_VAR, KV_BINDING, TOKEN_EXPIRES_IN_VAR};

/// Phases of one deployment run, in order. `Deployed` is a valid terminal
/// phase when the operator declines the expiration variable; otherwise the
/// run ends at `Redeployed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployPhase {
    Unconfigured,
    Configured,
    Deployed,
    Reconfigured,
    Redeployed,
}

impl std::fmt::Display for DeployPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeployPhase::Unconfigured => "unconfigured",
            DeployPhase::Configured => "configured",
            DeployPhase::Deployed => "deployed",
            DeployPhase::Reconfigured => "reconfigured",
            DeployPhase::Redeployed => "redeployed",
        };
        write!(f, "{name}")
    }
}

/// Returns the `--config` value to pass to the deploy command, or `None`
/// when the path points at the conventionally named file the backend
/// discovers on its own.
pub fn config_flag(path: &Path) -> Option<&Path> {
    if path.file_name() == Some(std::ffi::OsStr::new(DEFAULT_CONFIG_FILE)) {
        None
    } else {
        Some(path)
    }
}

/// Drives a single worker deployment through its phases.
pub struct DeployDriver<'a> {
    backend: &'a dyn Backend,
    config_path: PathBuf,
    config: WranglerConfig,
    phase: DeployPhase,
}

impl<'a> DeployDriver<'a> {
    /// Loads the config document (or synthesizes a default one) and starts
    /// the machine at `Unconfigured`.
    pub fn new(backend: &'a dyn Backend, config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();
        let config = edgeflow_config::load_or_default(&config_path)?;
        Ok(Self {
            backend,
            config_path,
            config,
            phase: DeployPhase::Unconfigured,
        })
    }

    pub fn phase(&self) -> DeployPhase {
        self.phase
    }

    pub fn config(&self) -> &WranglerConfig {
        &self.config
    }

    fn expect(&self, expected: DeployPhase) -> Result<()> {
        if self.phase != expected {
            return Err(DeployError::InvalidTransition {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        edgeflow_config::save(&self.config_path, &self.config)?;
        tracing::debug!(path = %self.config_path.display(), "config persisted");
        Ok(())
    }

    /// `Unconfigured → Configured`: merge worker identity, the base URL
    /// variable, and the resolved namespace binding; persist.
    pub fn configure(
        &mut self,
        request: &ProvisioningRequest,
        account_id: &str,
        namespace: &NamespaceRecord,
    ) -> Result<()> {
        self.expect(DeployPhase::Unconfigured)?;
        self.config.set_identity(&request.worker_name, account_id);
        self.config.set_var(BASE_URL_VAR, &request.base_url);
        let mut binding = KvNamespace::new(KV_BINDING, &namespace.id);
        binding.preview_id = namespace.preview_id.clone();
        self.config.upsert_kv_namespace(binding);
        self.persist()?;
        self.phase = DeployPhase::Configured;
        Ok(())
    }

    /// `Configured → Deployed`: run the deploy command.
    pub async fn deploy(&mut self) -> Result<()> {
        self.expect(DeployPhase::Configured)?;
        self.backend.deploy(config_flag(&self.config_path)).await?;
        self.phase = DeployPhase::Deployed;
        Ok(())
    }

    /// `Deployed → Reconfigured`: add the token expiration variable and
    /// persist. The running worker does not pick this up until redeployed.
    pub fn set_token_expiry(&mut self, seconds: &str) -> Result<()> {
        self.expect(DeployPhase::Deployed)?;
        self.config.set_var(TOKEN_EXPIRES_IN_VAR, seconds);
        self.persist()?;
        self.phase = DeployPhase::Reconfigured;
        Ok(())
    }

    /// `Reconfigured → Redeployed`: run the deploy command again so the new
    /// variable takes effect. The backend has no hot reload.
    pub async fn redeploy(&mut self) -> Result<()> {
        self.expect(DeployPhase::Reconfigured)?;
        self.backend.deploy(config_flag(&self.config_path)).await?;
        self.phase = DeployPhase::Redeployed;
        Ok(())
    }
}
