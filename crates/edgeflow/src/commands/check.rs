use colored::Colorize;
use edgeflow_wrangler::WranglerCli;

pub async fn handle() -> anyhow::Result<()> {
    let wrangler = WranglerCli::from_env()?;
    println!("{}", "Checking wrangler authentication...".blue());
    let account_id = wrangler.whoami().await?;
    println!(
        "{} Account ID: {}",
        "Authenticated.".green().bold(),
        account_id.cyan()
    );
    Ok(())
}
