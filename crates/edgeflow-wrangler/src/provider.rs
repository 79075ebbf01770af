//! [`Backend`] implementation backed by the real wrangler CLI.

use std::path::Path;

use async_trait::async_trait;
use edgeflow_deploy::{Backend, NamespaceRecord};

use crate::wrangler::WranglerCli;

#[async_trait]
impl Backend for WranglerCli {
    async fn check_auth(&self) -> edgeflow_deploy::Result<String> {
        Ok(self.whoami().await?)
    }

    async fn find_namespace(&self, name: &str) -> edgeflow_deploy::Result<Option<NamespaceRecord>> {
        Ok(self.find_kv_namespace(name).await?)
    }

    async fn create_namespace(&self, name: &str) -> edgeflow_deploy::Result<NamespaceRecord> {
        Ok(self.create_kv_namespace(name).await?)
    }

    async fn deploy(&self, config_path: Option<&Path>) -> edgeflow_deploy::Result<()> {
        WranglerCli::deploy(self, config_path).await?;
        Ok(())
    }

    async fn put_secret(&self, name: &str, value: &str) -> edgeflow_deploy::Result<()> {
        WranglerCli::put_secret(self, name, value).await?;
        Ok(())
    }

    async fn kv_bulk_put(
        &self,
        key: &str,
        payload_path: &Path,
        binding: &str,
        preview: bool,
    ) -> edgeflow_deploy::Result<()> {
        self.kv_put_from_file(key, payload_path, binding, preview)
            .await?;
        Ok(())
    }
}
