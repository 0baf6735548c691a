mod categories;
mod variants;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::categories::CategoryCommands;
use crate::variants::VariantCommands;

#[derive(Debug, Parser)]
#[command(name = "shopdesk")]
#[command(about = "Catalog tree and variant tooling for the shop admin")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect category hierarchies exported from the backend
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Generate product variant rows from attribute selections
    Variants {
        #[command(subcommand)]
        command: VariantCommands,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = shopdesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "shopdesk starting");

    match cli.command {
        Some(Commands::Categories { command }) => categories::run(command),
        Some(Commands::Variants { command }) => variants::run(command, &config),
        None => {
            println!("shopdesk ready; run `shopdesk --help` for commands");
            Ok(())
        }
    }
}
