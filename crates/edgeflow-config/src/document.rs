//! Typed view of a wrangler configuration document.
//!
//! Only the fields edgeflow touches are modeled; everything else rides along
//! in flattened catch-all maps so a read-merge-write cycle never drops a
//! field it does not understand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Config file name wrangler discovers on its own; any other name has to be
/// passed to `wrangler deploy` via `--config`.
pub const DEFAULT_CONFIG_FILE: &str = "wrangler.jsonc";

/// Entry point written into a freshly synthesized config.
pub const DEFAULT_MAIN: &str = "src/index.ts";

/// A single KV namespace binding entry under `kv_namespaces`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvNamespace {
    pub binding: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KvNamespace {
    pub fn new(binding: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            binding: binding.into(),
            id: id.into(),
            preview_id: None,
            extra: Map::new(),
        }
    }
}

/// The wrangler configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WranglerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub vars: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kv_namespaces: Vec<KvNamespace>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WranglerConfig {
    /// Synthesizes the document written when no config file exists yet:
    /// the default entry point plus today's date as compatibility marker.
    pub fn synthesized() -> Self {
        Self {
            main: Some(DEFAULT_MAIN.to_string()),
            compatibility_date: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
            ..Self::default()
        }
    }

    /// Sets the worker name and account id.
    pub fn set_identity(&mut self, name: &str, account_id: &str) {
        self.name = Some(name.to_string());
        self.account_id = Some(account_id.to_string());
    }

    /// Inserts or overwrites a plain string variable, leaving other vars as
    /// they are.
    pub fn set_var(&mut self, key: &str, value: &str) {
        self.vars
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Merges a KV namespace binding into the document.
    ///
    /// An existing entry with the same binding name is replaced in place;
    /// otherwise the entry is appended. Entries with other binding names
    /// keep their relative order either way.
    pub fn upsert_kv_namespace(&mut self, namespace: KvNamespace) {
        match self
            .kv_namespaces
            .iter_mut()
            .find(|existing| existing.binding == namespace.binding)
        {
            Some(existing) => *existing = namespace,
            None => self.kv_namespaces.push(namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_config_has_entry_point_and_date() {
        let config = WranglerConfig::synthesized();
        assert_eq!(config.main.as_deref(), Some(DEFAULT_MAIN));
        let date = config.compatibility_date.unwrap();
        assert_eq!(date.len(), 10, "expected YYYY-MM-DD, got {date}");
    }

    #[test]
    fn set_var_preserves_other_vars() {
        let mut config = WranglerConfig::default();
        config.set_var("BASE_URL", "https://a.example");
        config.set_var("OTHER", "kept");
        config.set_var("BASE_URL", "https://b.example");
        assert_eq!(config.vars["BASE_URL"], "https://b.example");
        assert_eq!(config.vars["OTHER"], "kept");
    }

    #[test]
    fn upsert_replaces_same_binding_and_keeps_order() {
        let mut config = WranglerConfig::default();
        config.upsert_kv_namespace(KvNamespace::new("FIRST", "a".repeat(32)));
        config.upsert_kv_namespace(KvNamespace::new("CLAUDE_KV", "b".repeat(32)));
        config.upsert_kv_namespace(KvNamespace::new("LAST", "c".repeat(32)));

        let mut replacement = KvNamespace::new("CLAUDE_KV", "d".repeat(32));
        replacement.preview_id = Some("e".repeat(32));
        config.upsert_kv_namespace(replacement);

        let bindings: Vec<&str> = config
            .kv_namespaces
            .iter()
            .map(|ns| ns.binding.as_str())
            .collect();
        assert_eq!(bindings, ["FIRST", "CLAUDE_KV", "LAST"]);
        assert_eq!(config.kv_namespaces[1].id, "d".repeat(32));
        assert_eq!(config.kv_namespaces[1].preview_id, Some("e".repeat(32)));
    }

    #[test]
    fn unknown_fields_round_trip() {
        let source = r#"{
            "name": "svc",
            "routes": [{ "pattern": "example.com/*" }],
            "kv_namespaces": [{ "binding": "X", "id": "0", "custom": true }]
        }"#;
        let mut config: WranglerConfig = serde_json::from_str(source).unwrap();
        config.set_identity("svc", &"f".repeat(32));
        config.set_var("BASE_URL", "https://example.com");

        let value: Value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["routes"][0]["pattern"], "example.com/*");
        assert_eq!(value["kv_namespaces"][0]["custom"], true);
    }
}
