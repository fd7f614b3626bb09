//! Binary for the relay bot.

use anyhow::Result;
use clap::Parser;
use relay_bot::{
    load_base_config, load_config, prepare_logging, register_webhook, run_server,
    unregister_webhook, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_server(config).await
        }
        Commands::Register { url, token } => {
            let base = load_base_config(token)?;
            prepare_logging(&base.log_file)?;
            let result = register_webhook(&base, url).await?;
            println!("Webhook registered: {result}");
            Ok(())
        }
        Commands::Unregister { token } => {
            let base = load_base_config(token)?;
            prepare_logging(&base.log_file)?;
            let result = unregister_webhook(&base).await?;
            println!("Webhook unregistered: {result}");
            Ok(())
        }
    }
}
