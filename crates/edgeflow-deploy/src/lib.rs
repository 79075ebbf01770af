//! Deployment orchestration core for edgeflow.
//!
//! Provisioning a worker is a strict sequence of checkpoints: resolve the
//! account, find or create the KV namespace, merge identity and bindings
//! into the config document, deploy, then optionally seed a secret and the
//! initial KV state. Every step runs exactly once and any failure is fatal
//! to the remainder of the sequence.
//!
//! The backend tool is reached only through the [`Backend`] trait, so the
//! whole flow is testable without spawning subprocesses.

pub mod backend;
pub mod driver;
pub mod error;
pub mod request;
pub mod seed;

pub use backend::{Backend, NamespaceRecord, resolve_namespace};
pub use driver::{DeployDriver, DeployPhase, config_flag};
pub use error::{DeployError, Result};
pub use request::ProvisioningRequest;

/// Reserved binding name the worker code uses to reach its KV namespace.
pub const KV_BINDING: &str = "CLAUDE_KV";

/// Variable carrying the upstream base URL into the worker.
pub const BASE_URL_VAR: &str = "BASE_URL";

/// Optional variable bounding token lifetime, in seconds.
pub const TOKEN_EXPIRES_IN_VAR: &str = "TOKEN_EXPIRES_IN";

/// Secret holding the admin password.
pub const ADMIN_PASSWORD_SECRET: &str = "ADMIN_PASSWORD";

/// KV key seeded with the initial email-to-session-key map.
pub const SEED_KEY: &str = "EMAIL_TO_SK_MAP";

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted backend used by the driver and seeder tests.

    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::backend::{Backend, NamespaceRecord};
    use crate::error::{DeployError, Result};

    #[derive(Default)]
    pub struct MockBackend {
        pub existing_namespace: Option<NamespaceRecord>,
        pub fail_bulk_put: bool,
        /// Call log, one rendered entry per backend invocation.
        pub calls: Mutex<Vec<String>>,
        /// Payload file contents captured at `kv_bulk_put` call time.
        pub bulk_payloads: Mutex<Vec<String>>,
        pub bulk_paths: Mutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl Backend for MockBackend {
        async fn check_auth(&self) -> Result<String> {
            self.calls.lock().unwrap().push("whoami".to_string());
            Ok("f".repeat(32))
        }

        async fn find_namespace(&self, name: &str) -> Result<Option<NamespaceRecord>> {
            self.calls.lock().unwrap().push(format!("find {name}"));
            Ok(self.existing_namespace.clone())
        }

        async fn create_namespace(&self, name: &str) -> Result<NamespaceRecord> {
            self.calls.lock().unwrap().push(format!("create {name}"));
            Ok(NamespaceRecord {
                name: name.to_string(),
                id: "0123456789abcdef0123456789abcdef".to_string(),
                preview_id: Some("fedcba9876543210fedcba9876543210".to_string()),
            })
        }

        async fn deploy(&self, config_path: Option<&Path>) -> Result<()> {
            let call = match config_path {
                Some(path) => format!("deploy --config {}", path.display()),
                None => "deploy".to_string(),
            };
            self.calls.lock().unwrap().push(call);
            Ok(())
        }

        async fn put_secret(&self, name: &str, _value: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("secret {name}"));
            Ok(())
        }

        async fn kv_bulk_put(
            &self,
            key: &str,
            payload_path: &Path,
            binding: &str,
            preview: bool,
        ) -> Result<()> {
            let suffix = if preview { " --preview" } else { "" };
            self.calls
                .lock()
                .unwrap()
                .push(format!("bulk {key} {binding}{suffix}"));
            self.bulk_paths
                .lock()
                .unwrap()
                .push(payload_path.to_path_buf());
            if self.fail_bulk_put {
                return Err(DeployError::Command {
                    command: "wrangler kv key put".to_string(),
                    stdout: String::new(),
                    stderr: "simulated failure".to_string(),
                });
            }
            let contents = std::fs::read_to_string(payload_path)?;
            self.bulk_payloads.lock().unwrap().push(contents);
            Ok(())
        }
    }
}
