//! 13th Vapour Lounge CLI - Database migrations and back-office tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! vl-cli migrate storefront
//!
//! # Run admin database migrations
//! vl-cli migrate admin
//!
//! # Run all database migrations
//! vl-cli migrate all
//!
//! # List notification types
//! vl-cli notifications types --category inventory
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use vapour_lounge_core::NotificationCategory;

mod commands;

#[derive(Parser)]
#[command(name = "vl-cli")]
#[command(author, version, about = "13th Vapour Lounge CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Inspect the notification vocabulary
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront database migrations
    Storefront,
    /// Run admin database migrations
    Admin,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum NotificationAction {
    /// List notification type tags by category
    Types {
        /// Only this category (e.g. `inventory`, `purchase_orders`)
        #[arg(short, long)]
        category: Option<NotificationCategory>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Notifications { action } => match action {
            NotificationAction::Types { category } => commands::notifications::types(category),
        },
    }
    Ok(())
}
