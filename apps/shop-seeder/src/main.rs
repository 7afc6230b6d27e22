//! Shop Seeder
//!
//! Loads the bundled sample catalog into MongoDB, or deletes every product.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::mongodb::MongoConfig;
use domain_products::MongoProductRepository;
use eyre::Result;
use tracing::info;

mod seed;

#[derive(Parser)]
#[command(name = "shop_seeder")]
#[command(about = "Import or destroy the sample product catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete all products, then insert the sample catalog
    Import {
        /// Account id recorded as the creator of the seeded products
        #[arg(short, long, default_value = "seed-admin")]
        owner: String,
    },

    /// Delete all products
    Destroy,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let config = MongoConfig::from_env()?;

    info!("Connecting to MongoDB at {}", config.url());
    let client = database::mongodb::connect_from_config_with_retry(&config, None).await?;
    let repository = MongoProductRepository::new(&client.database(config.database()));

    match cli.command {
        Commands::Import { owner } => {
            let inserted = seed::import(&repository, &owner).await?;
            println!("Data imported: {inserted} products");
        }
        Commands::Destroy => {
            let removed = seed::destroy(&repository).await?;
            println!("Data destroyed: {removed} products");
        }
    }

    client.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_owner_defaults() {
        let cli = Cli::try_parse_from(["shop_seeder", "import"]).unwrap();
        assert!(matches!(cli.command, Commands::Import { ref owner } if owner == "seed-admin"));
    }

    #[test]
    fn test_import_owner_flag() {
        let cli = Cli::try_parse_from(["shop_seeder", "import", "--owner", "admin-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Import { ref owner } if owner == "admin-1"));
    }

    #[test]
    fn test_destroy_subcommand() {
        let cli = Cli::try_parse_from(["shop_seeder", "destroy"]).unwrap();
        assert!(matches!(cli.command, Commands::Destroy));
    }
}
