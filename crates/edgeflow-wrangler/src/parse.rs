//! Extractors for wrangler's textual output.
//!
//! wrangler has no structured "get by name" query, so identifiers are
//! scraped out of its human-oriented output. Each extractor documents the
//! exact shape it expects and is covered by golden-fixture tests; nothing
//! else in the crate touches these patterns.

use regex::Regex;

/// Pulls the account id out of `wrangler whoami` output.
///
/// Expects a box-drawn table row of the form
/// `│ <account name> │ <32 lowercase hex> │`.
pub fn account_id_from_whoami(output: &str) -> Option<String> {
    let row = Regex::new(r"(?i)│\s*.*\s*│\s*([a-f0-9]{32})\s*│").unwrap();
    row.captures(output).map(|caps| caps[1].to_lowercase())
}

/// Finds a namespace row in `wrangler kv namespace list` output.
///
/// Expects `│ <name> │ <32 hex id> │` with the name anchored exactly; the
/// name is escaped first since namespace names may contain `-` and other
/// regex metacharacters. Returns the id of the first matching row.
pub fn namespace_id_from_list(output: &str, name: &str) -> Option<String> {
    let pattern = format!(
        r"(?i)│\s*{}\s*│\s*([a-f0-9]{{32}})\s*│",
        regex::escape(name)
    );
    let row = Regex::new(&pattern).unwrap();
    row.captures(output).map(|caps| caps[1].to_lowercase())
}

/// Extracts `"id"` and `"preview_id"` from `wrangler kv namespace create`
/// output, which embeds a JSON fragment in otherwise free-form text.
///
/// The two fields are matched independently; the fragment as a whole is not
/// parsed because wrangler wraps it in prose and comments.
pub fn ids_from_create(output: &str) -> (Option<String>, Option<String>) {
    let id = Regex::new(r#""id":\s*"([a-f0-9]{32})""#).unwrap();
    let preview = Regex::new(r#""preview_id":\s*"([a-f0-9]{32})""#).unwrap();
    (
        id.captures(output).map(|caps| caps[1].to_string()),
        preview.captures(output).map(|caps| caps[1].to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHOAMI_FIXTURE: &str = "\
 ⛅️ wrangler 3.114.0\n\
-------------------\n\
Getting User settings...\n\
👋 You are logged in with an OAuth Token, associated with the email dev@example.com!\n\
┌───────────────────┬──────────────────────────────────┐\n\
│ Account Name      │ Account ID                       │\n\
├───────────────────┼──────────────────────────────────┤\n\
│ Example Account   │ 4f2d9a1b8c3e4f2d9a1b8c3e4f2d9a1b │\n\
└───────────────────┴──────────────────────────────────┘";

    const LIST_FIXTURE: &str = "\
┌──────────────────────┬──────────────────────────────────┐\n\
│ Title                │ ID                               │\n\
├──────────────────────┼──────────────────────────────────┤\n\
│ CLAUDE_KV_STORE-x1   │ aa11bb22cc33dd44ee55ff6600112233 │\n\
│ other-namespace      │ ffeeddccbbaa99887766554433221100 │\n\
└──────────────────────┴──────────────────────────────────┘";

    const CREATE_FIXTURE: &str = "\
🌀 Creating namespace with title \"svc-CLAUDE_KV_STORE-x1\"\n\
✨ Success!\n\
Add the following to your configuration file in your kv_namespaces array:\n\
{ \"binding\": \"CLAUDE_KV\", \"id\": \"0123456789abcdef0123456789abcdef\", \"preview_id\": \"fedcba9876543210fedcba9876543210\" }";

    #[test]
    fn whoami_yields_account_id() {
        assert_eq!(
            account_id_from_whoami(WHOAMI_FIXTURE).as_deref(),
            Some("4f2d9a1b8c3e4f2d9a1b8c3e4f2d9a1b")
        );
    }

    #[test]
    fn whoami_without_table_yields_none() {
        assert_eq!(account_id_from_whoami("You are not authenticated."), None);
    }

    #[test]
    fn list_matches_exact_name() {
        assert_eq!(
            namespace_id_from_list(LIST_FIXTURE, "CLAUDE_KV_STORE-x1").as_deref(),
            Some("aa11bb22cc33dd44ee55ff6600112233")
        );
    }

    #[test]
    fn list_without_row_yields_none() {
        assert_eq!(namespace_id_from_list(LIST_FIXTURE, "missing"), None);
    }

    #[test]
    fn list_name_with_metacharacters_is_escaped() {
        // `.` must not act as a wildcard that would match the hyphen row.
        assert_eq!(namespace_id_from_list(LIST_FIXTURE, "CLAUDE_KV_STORE.x1"), None);
    }

    #[test]
    fn create_yields_both_ids() {
        let (id, preview) = ids_from_create(CREATE_FIXTURE);
        assert_eq!(id.as_deref(), Some("0123456789abcdef0123456789abcdef"));
        assert_eq!(preview.as_deref(), Some("fedcba9876543210fedcba9876543210"));
    }

    #[test]
    fn create_without_preview_yields_id_only() {
        let output = r#"{ "binding": "CLAUDE_KV", "id": "0123456789abcdef0123456789abcdef" }"#;
        let (id, preview) = ids_from_create(output);
        assert!(id.is_some());
        assert_eq!(preview, None);
    }

    #[test]
    fn create_without_id_yields_none() {
        let (id, preview) = ids_from_create("✨ Success! (but no fragment)");
        assert_eq!(id, None);
        assert_eq!(preview, None);
    }
}
