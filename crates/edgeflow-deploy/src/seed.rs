//! Secret and initial-state seeding.
//!
//! Both sub-steps are optional and run only after the worker is deployed.
//! The secret travels exclusively over the child process's stdin; the bulk
//! KV payload is handed over through a uniquely named temporary file so no
//! shell quoting ever touches the JSON.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::backend::Backend;
use crate::error::Result;
use crate::{ADMIN_PASSWORD_SECRET, KV_BINDING, SEED_KEY};

/// Pipes the admin password to the backend's secret store. Returns `false`
/// without touching the backend when the value is empty.
pub async fn put_admin_secret(backend: &dyn Backend, value: &str) -> Result<bool> {
    if value.is_empty() {
        tracing::warn!("empty secret value, {ADMIN_PASSWORD_SECRET} not set");
        return Ok(false);
    }
    backend.put_secret(ADMIN_PASSWORD_SECRET, value).await?;
    Ok(true)
}

/// Reads and normalizes the optional seed source document.
///
/// The file is validated by parsing and re-serialized compactly, which also
/// discards a BOM and any whitespace quirks. A missing or unparsable file
/// degrades to an empty object rather than aborting the run.
pub fn seed_payload(source: Option<&Path>) -> String {
    let Some(path) = source else {
        return "{}".to_string();
    };
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "seed source unreadable, using empty map");
            return "{}".to_string();
        }
    };
    let cleaned = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    match serde_json::from_str::<serde_json::Value>(cleaned) {
        Ok(value) => value.to_string(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "seed source is not valid JSON, using empty map");
            "{}".to_string()
        }
    }
}

/// Seeds the initial KV entry for the production binding and, when a preview
/// id is known, for the preview binding as well.
///
/// The staged temporary file is removed on every exit path; a failed
/// removal is logged and never escalated.
pub async fn seed_initial_state(
    backend: &dyn Backend,
    source: Option<&Path>,
    has_preview: bool,
) -> Result<()> {
    let payload = seed_payload(source);

    let mut staged = NamedTempFile::new()?;
    staged.write_all(payload.as_bytes())?;
    staged.flush()?;
    let staged_path = staged.path().to_path_buf();
    tracing::debug!(path = %staged_path.display(), "seed payload staged");

    let outcome = async {
        backend
            .kv_bulk_put(SEED_KEY, &staged_path, KV_BINDING, false)
            .await?;
        if has_preview {
            backend
                .kv_bulk_put(SEED_KEY, &staged_path, KV_BINDING, true)
                .await?;
        }
        Ok(())
    }
    .await;

    if let Err(err) = staged.close() {
        tracing::warn!(error = %err, "could not remove staged seed payload");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;

    #[tokio::test]
    async fn empty_secret_is_skipped() {
        let backend = MockBackend::default();
        assert!(!put_admin_secret(&backend, "").await.unwrap());
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn secret_goes_through_backend() {
        let backend = MockBackend::default();
        assert!(put_admin_secret(&backend, "hunter2").await.unwrap());
        let calls = backend.calls.lock().unwrap();
        assert_eq!(*calls, vec!["secret ADMIN_PASSWORD".to_string()]);
    }

    #[test]
    fn missing_source_yields_empty_map() {
        assert_eq!(seed_payload(None), "{}");
        assert_eq!(seed_payload(Some(Path::new("/no/such/file.json"))), "{}");
    }

    #[test]
    fn valid_source_is_compacted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, "\u{feff}{\n  \"a@example.com\": \"sk-1\"\n}\n").unwrap();
        assert_eq!(seed_payload(Some(&path)), r#"{"a@example.com":"sk-1"}"#);
    }

    #[tokio::test]
    async fn invalid_source_still_seeds_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(&path, "{ broken").unwrap();

        let backend = MockBackend::default();
        seed_initial_state(&backend, Some(&path), false)
            .await
            .unwrap();

        let payloads = backend.bulk_payloads.lock().unwrap();
        assert_eq!(*payloads, vec!["{}".to_string()]);
    }

    #[tokio::test]
    async fn preview_id_triggers_second_put() {
        let backend = MockBackend::default();
        seed_initial_state(&backend, None, true).await.unwrap();
        let calls = backend.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                "bulk EMAIL_TO_SK_MAP CLAUDE_KV".to_string(),
                "bulk EMAIL_TO_SK_MAP CLAUDE_KV --preview".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn staged_file_is_removed_even_when_put_fails() {
        let backend = MockBackend {
            fail_bulk_put: true,
            ..MockBackend::default()
        };
        let err = seed_initial_state(&backend, None, false).await.unwrap_err();
        assert!(matches!(err, crate::DeployError::Command { .. }));

        let paths = backend.bulk_paths.lock().unwrap();
        assert_eq!(paths.len(), 1);
        assert!(!paths[0].exists(), "staged payload must be cleaned up");
    }

    #[tokio::test]
    async fn staged_file_is_removed_on_success() {
        let backend = MockBackend::default();
        seed_initial_state(&backend, None, false).await.unwrap();
        let paths = backend.bulk_paths.lock().unwrap();
        assert!(!paths[0].exists());
    }
}
