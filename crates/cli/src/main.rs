//! Stockroom CLI - database migrations and product management.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! stockroom migrate
//!
//! # Insert sample products
//! stockroom seed --count 20
//!
//! # Manage products
//! stockroom products list
//! stockroom products add --title "Widget" --quantity 5
//! stockroom products delete 0b9e4a1c-3f4e-4c55-9a57-2d1f8f0c6a10
//! ```
//!
//! # Environment Variables
//!
//! - `STOCKROOM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use stockroom_core::ProductId;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Stockroom CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample products
    Seed {
        /// Number of products to insert
        #[arg(short, long, default_value_t = commands::seed::DEFAULT_COUNT)]
        count: usize,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, newest first
    List,
    /// Create a product
    Add {
        /// Product title
        #[arg(short, long)]
        title: String,

        /// Units in stock
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        quantity: i32,
    },
    /// Delete a product by ID
    Delete {
        /// Product ID
        id: ProductId,
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

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { count } => commands::seed::run(count).await?,
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list().await?,
            ProductAction::Add { title, quantity } => {
                commands::products::add(title, quantity).await?;
            }
            ProductAction::Delete { id } => commands::products::delete(id).await?,
        },
    }
    Ok(())
}
