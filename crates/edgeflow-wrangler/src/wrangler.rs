//! wrangler CLI wrapper.
//!
//! One method per backend operation the deployment flow needs. Each method
//! issues exactly one command through the [`Gateway`] and interprets the
//! output with the extractors in [`crate::parse`].

use std::path::Path;

use edgeflow_deploy::NamespaceRecord;

use crate::error::{Result, WranglerError};
use crate::gateway::Gateway;
use crate::parse;

/// Environment variable overriding the wrangler invocation.
pub const WRANGLER_COMMAND_ENV: &str = "EDGEFLOW_WRANGLER_BIN";

/// Default invocation; `npx` resolves a project-local wrangler install.
pub const DEFAULT_WRANGLER_COMMAND: &str = "npx wrangler";

pub struct WranglerCli {
    gateway: Gateway,
}

impl WranglerCli {
    /// Builds the wrapper from `EDGEFLOW_WRANGLER_BIN` or the default
    /// `npx wrangler` invocation.
    pub fn from_env() -> Result<Self> {
        let command = std::env::var(WRANGLER_COMMAND_ENV)
            .unwrap_or_else(|_| DEFAULT_WRANGLER_COMMAND.to_string());
        Self::with_command(&command)
    }

    pub fn with_command(command: &str) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::new(command)?,
        })
    }

    /// Runs `whoami` and extracts the account id from its status table.
    pub async fn whoami(&self) -> Result<String> {
        let output = self.gateway.run(&["whoami"], None).await.map_err(|err| {
            WranglerError::AuthenticationFailed(format!(
                "'wrangler whoami' failed ({err}); run 'wrangler login' and retry"
            ))
        })?;
        parse::account_id_from_whoami(&output).ok_or_else(|| {
            WranglerError::AuthenticationFailed(
                "could not parse an account id from 'wrangler whoami'; run 'wrangler login' and retry"
                    .to_string(),
            )
        })
    }

    /// Lists KV namespaces and returns the record for `name`, if present.
    /// A pre-existing namespace never carries a preview id.
    pub async fn find_kv_namespace(&self, name: &str) -> Result<Option<NamespaceRecord>> {
        let output = self.gateway.run(&["kv", "namespace", "list"], None).await?;
        Ok(
            parse::namespace_id_from_list(&output, name).map(|id| NamespaceRecord {
                name: name.to_string(),
                id,
                preview_id: None,
            }),
        )
    }

    /// Creates a KV namespace and extracts its id (and preview id, when
    /// emitted) from the creation output.
    pub async fn create_kv_namespace(&self, name: &str) -> Result<NamespaceRecord> {
        // No shell is involved, so the name needs no quoting even when it
        // contains characters a shell would mangle.
        let output = self
            .gateway
            .run(&["kv", "namespace", "create", name], None)
            .await?;
        let (id, preview_id) = parse::ids_from_create(&output);
        let id = id.ok_or_else(|| {
            WranglerError::CreationFailed(format!(
                "no \"id\" field in the creation output for {name:?}; refusing to continue with an unknown namespace"
            ))
        })?;
        Ok(NamespaceRecord {
            name: name.to_string(),
            id,
            preview_id,
        })
    }

    /// Deploys the worker, passing `--config` only for non-default paths.
    pub async fn deploy(&self, config_path: Option<&Path>) -> Result<String> {
        match config_path {
            Some(path) => {
                let path = path.display().to_string();
                self.gateway
                    .run(&["deploy", "--config", path.as_str()], None)
                    .await
            }
            None => self.gateway.run(&["deploy"], None).await,
        }
    }

    /// Assigns a secret, writing the value to wrangler's stdin so it never
    /// shows up in argv or shell history.
    pub async fn put_secret(&self, name: &str, value: &str) -> Result<()> {
        self.gateway.run(&["secret", "put", name], Some(value)).await?;
        Ok(())
    }

    /// Writes one KV entry from a payload file against the given binding,
    /// targeting the preview namespace when `preview` is set.
    pub async fn kv_put_from_file(
        &self,
        key: &str,
        payload_path: &Path,
        binding: &str,
        preview: bool,
    ) -> Result<()> {
        let path = payload_path.display().to_string();
        let mut args = vec![
            "kv",
            "key",
            "put",
            key,
            "--path",
            path.as_str(),
            "--binding",
            binding,
        ];
        if preview {
            args.push("--preview");
        }
        args.push("--remote");
        self.gateway.run(&args, None).await?;
        Ok(())
    }
}
