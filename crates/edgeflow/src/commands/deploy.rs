use std::path::PathBuf;

use colored::Colorize;
use edgeflow_config::DEFAULT_CONFIG_FILE;
use edgeflow_deploy::{
    ADMIN_PASSWORD_SECRET, DeployDriver, ProvisioningRequest, SEED_KEY, request, resolve_namespace,
    seed,
};
use edgeflow_wrangler::WranglerCli;

use crate::prompt;

const DEFAULT_WORKER_NAME_PREFIX: &str = "edgeflow-worker";
const DEFAULT_KV_NAMESPACE_PREFIX: &str = "CLAUDE_KV_STORE";
const DEFAULT_BASE_URL: &str = "https://demo.fuclaude.com";
const DEFAULT_SEED_FILE: &str = "./initial-sk-map.json";

pub async fn handle(
    name: Option<String>,
    namespace: Option<String>,
    base_url: Option<String>,
    config: Option<PathBuf>,
    token_expires_in: Option<String>,
    seed_file: Option<PathBuf>,
    yes: bool,
) -> anyhow::Result<()> {
    println!("{}", "Starting worker deployment".blue().bold());

    let wrangler = WranglerCli::from_env()?;

    // Step 0: authentication status and account id.
    println!("{}", "Checking wrangler login status...".blue());
    let account_id = wrangler.whoami().await?;
    println!("Logged in. Account ID: {}", account_id.cyan());

    // Step 1: collect the provisioning request. Any required value left
    // empty cancels the run before anything is touched.
    let run_tag = base36(chrono::Utc::now().timestamp_millis() as u64);
    let worker_name = match name {
        Some(name) => name,
        None => prompt::text_validated(
            "Worker name (alphanumeric, dashes)",
            Some(&format!("{DEFAULT_WORKER_NAME_PREFIX}-{run_tag}")),
            "Invalid characters in worker name.",
            request::valid_worker_name,
        )?,
    };
    let namespace_name = match namespace {
        Some(namespace) => namespace,
        None => prompt::text_validated(
            "KV namespace to find or create",
            Some(&format!("{DEFAULT_KV_NAMESPACE_PREFIX}_{run_tag}")),
            "Invalid namespace name (letters, digits, - and _, max 64 chars).",
            request::valid_namespace_name,
        )?,
    };
    let base_url = match base_url {
        Some(base_url) => base_url,
        None => prompt::text("BASE_URL for the worker", Some(DEFAULT_BASE_URL))?,
    };
    let config_path = match config {
        Some(config) => config,
        None => PathBuf::from(prompt::text(
            "Path to your wrangler config",
            Some(DEFAULT_CONFIG_FILE),
        )?),
    };
    let provisioning =
        ProvisioningRequest::new(worker_name, namespace_name, base_url, config_path)?;
    tracing::debug!(
        worker = %provisioning.worker_name,
        namespace = %provisioning.namespace_name,
        config = %provisioning.config_path.display(),
        "provisioning request collected"
    );

    // Step 2: find or create the KV namespace.
    println!(
        "Resolving KV namespace {}...",
        provisioning.namespace_name.cyan()
    );
    let kv_namespace = resolve_namespace(&wrangler, &provisioning.namespace_name).await?;
    println!(
        "{} Namespace id: {}",
        "Namespace ready.".green(),
        kv_namespace.id.cyan()
    );
    if kv_namespace.preview_id.is_none() {
        println!(
            "{}",
            "Note: no preview id is known for this namespace; add preview_id to the config manually if you need local development."
                .yellow()
        );
    }

    // Step 3 + 4: merge the config document and deploy.
    let mut driver = DeployDriver::new(&wrangler, &provisioning.config_path)?;
    driver.configure(&provisioning, &account_id, &kv_namespace)?;
    println!(
        "Config written to {}.",
        provisioning.config_path.display().to_string().cyan()
    );
    println!(
        "{}",
        format!("Deploying worker {}...", provisioning.worker_name).blue()
    );
    driver.deploy().await?;
    println!("{}", "Worker deployed.".green().bold());

    // Step 5: admin password, transmitted via stdin only. The prompt is a
    // plain line read, so warn that the value is echoed while typing.
    let secret = prompt::text(
        &format!("{ADMIN_PASSWORD_SECRET} for the worker (input is visible; empty to skip)"),
        None,
    )?;
    if seed::put_admin_secret(&wrangler, &secret).await? {
        println!("{}", format!("{ADMIN_PASSWORD_SECRET} secret set.").green());
    } else {
        println!(
            "{}",
            format!("{ADMIN_PASSWORD_SECRET} not set (input was empty).").yellow()
        );
    }

    // Step 6: optional token expiration; a var change after deploy only
    // takes effect through a full redeploy.
    let expiry = match token_expires_in {
        Some(seconds) if !seconds.is_empty() => {
            anyhow::ensure!(
                is_numeric(&seconds),
                "--token-expires-in must be a number of seconds"
            );
            seconds
        }
        Some(_) => String::new(),
        None => prompt::text_validated(
            "Default token expiration in seconds (empty for no expiration)",
            None,
            "Please enter a whole number of seconds.",
            is_numeric,
        )?,
    };
    if expiry.is_empty() {
        println!("Tokens will not expire by default.");
    } else {
        driver.set_token_expiry(&expiry)?;
        println!("{}", "TOKEN_EXPIRES_IN set. Re-deploying to apply...".blue());
        driver.redeploy().await?;
        println!("{}", "Re-deployment complete.".green());
    }

    // Step 7: optional initial KV state.
    let wants_seed = yes
        || prompt::confirm(
            &format!(
                "Initialize {SEED_KEY} in namespace \"{}\"?",
                provisioning.namespace_name
            ),
            true,
        )?;
    if wants_seed {
        let source = match seed_file {
            Some(path) => Some(path),
            None => {
                let answer = prompt::text(
                    "Path to JSON file with the initial map (empty for an empty map)",
                    Some(DEFAULT_SEED_FILE),
                )?;
                if answer.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(answer))
                }
            }
        };
        seed::seed_initial_state(
            &wrangler,
            source.as_deref(),
            kv_namespace.preview_id.is_some(),
        )
        .await?;
        println!("{}", format!("{SEED_KEY} initialized in KV.").green());
    }

    println!();
    println!("{}", "Deployment and setup complete!".green().bold());
    println!("Worker name: {}", provisioning.worker_name.cyan());
    Ok(())
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Lowercase base-36 rendering, used to give prompt defaults a per-run tag.
fn base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}
