//! Rolodex CLI - Terminal frontend for the contact collection store.
//!
//! Each invocation seeds an in-memory backend with the sample contacts,
//! runs one store operation, and prints the result. Sessions are
//! process-lifetime only; there is no durable storage.
//!
//! # Usage
//!
//! ```bash
//! # List contacts, filtered and sorted for display
//! rolodex list
//! rolodex list --search maria --tag School
//! rolodex list --favorites
//!
//! # Add a contact (name and email are validated here)
//! rolodex add --name "Sam Pope" --email sam@example.com --tags Work,Tech
//!
//! # Remove contacts by id
//! rolodex remove 4c3f...-... 9a1b...-...
//!
//! # Pull synthetic contacts from the random-person source
//! rolodex random 5
//!
//! # Show the distinct tag set
//! rolodex tags
//! ```
//!
//! # Environment Variables
//!
//! See `rolodex-contacts`: `ROLODEX_LATENCY_MIN_MS`,
//! `ROLODEX_LATENCY_MAX_MS`, `RANDOM_USER_URL`. A `.env` file is loaded
//! when present.

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use rolodex_contacts::backend::{MemoryBackend, RandomUserClient};
use rolodex_contacts::{ContactStore, ContactsConfig};
use rolodex_core::ContactId;

mod commands;

#[derive(Parser)]
#[command(name = "rolodex")]
#[command(author, version, about = "Personal contact list manager")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contacts, filtered and sorted for display
    List {
        /// Case-insensitive substring match on name or email
        #[arg(short, long)]
        search: Option<String>,

        /// Keep only contacts carrying this exact tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Show only favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Add a contact
    Add {
        /// Display name (must be non-empty)
        #[arg(short, long)]
        name: String,

        /// Email address (must contain an @ symbol)
        #[arg(short, long)]
        email: String,

        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Comma-separated tags
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Postal address
        #[arg(long)]
        address: Option<String>,

        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: Option<NaiveDate>,
    },
    /// Remove contacts by id
    Remove {
        /// Contact ids (UUIDs) to delete
        #[arg(required = true)]
        ids: Vec<ContactId>,
    },
    /// Generate synthetic contacts from the random-person source
    Random {
        /// How many contacts to generate
        #[arg(default_value_t = 5)]
        count: usize,
    },
    /// Show the distinct tag set
    Tags,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ContactsConfig::from_env()?;
    let backend = MemoryBackend::with_sample_data(
        RandomUserClient::new(config.random_user_url.clone()),
        config.latency,
    );
    let store = ContactStore::new(backend);

    store.load().await;
    if let Some(e) = store.last_error() {
        return Err(format!("initial load failed: {e}").into());
    }

    match cli.command {
        Commands::List {
            search,
            tag,
            favorites,
        } => commands::list::run(&store, search, tag, favorites),
        Commands::Add {
            name,
            email,
            phone,
            notes,
            tags,
            address,
            birthday,
        } => {
            commands::edit::add(
                &store,
                commands::edit::AddArgs {
                    name,
                    email,
                    phone,
                    notes,
                    tags,
                    address,
                    birthday,
                },
            )
            .await?;
        }
        Commands::Remove { ids } => commands::edit::remove(&store, &ids).await?,
        Commands::Random { count } => commands::random::run(&store, count).await?,
        Commands::Tags => commands::list::tags(&store),
    }

    Ok(())
}
