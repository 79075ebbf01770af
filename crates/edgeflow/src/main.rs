mod commands;
mod prompt;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edgeflow")]
#[command(about = "Provision and deploy a Cloudflare Worker with KV-backed state", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the KV namespace, update the wrangler config, and deploy
    Deploy {
        /// Worker name (alphanumeric, dashes)
        #[arg(long, env = "EDGEFLOW_WORKER_NAME")]
        name: Option<String>,
        /// KV namespace to find or create
        #[arg(long, env = "EDGEFLOW_KV_NAMESPACE")]
        namespace: Option<String>,
        /// BASE_URL variable propagated into the worker
        #[arg(long, env = "EDGEFLOW_BASE_URL")]
        base_url: Option<String>,
        /// Path to the wrangler config file
        #[arg(short, long, env = "EDGEFLOW_CONFIG")]
        config: Option<PathBuf>,
        /// Default token expiration in seconds (empty for no expiration)
        #[arg(long)]
        token_expires_in: Option<String>,
        /// JSON file seeding the initial EMAIL_TO_SK_MAP entry
        #[arg(long)]
        seed_file: Option<PathBuf>,
        /// Accept defaults for yes/no confirmations
        #[arg(short, long)]
        yes: bool,
    },
    /// Show wrangler authentication status and the resolved account id
    Check,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Deploy {
            name,
            namespace,
            base_url,
            config,
            token_expires_in,
            seed_file,
            yes,
        } => {
            commands::deploy::handle(
                name,
                namespace,
                base_url,
                config,
                token_expires_in,
                seed_file,
                yes,
            )
            .await
        }
        Commands::Check => commands::check::handle().await,
    };

    if let Err(err) = outcome {
        eprintln!();
        eprintln!("{} {err:#}", "Failed:".red().bold());
        std::process::exit(1);
    }
}
