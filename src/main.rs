//! Contactql CLI - run and inspect the contacts GraphQL server

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use contactql::config::{self, Overrides, ServerSettings};
use contactql::storage::ContactStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "contactql")]
#[command(version)]
#[command(about = "GraphQL CRUD server for contacts backed by SQLite")]
#[command(long_about = r#"
Contactql serves a GraphQL API over a single SQLite contacts table.

Example usage:
  contactql init
  contactql serve --port 3000
  contactql schema > schema.graphql
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the GraphQL server
    Serve {
        /// Path to the database file
        #[arg(short, long, env = "CONTACTQL_DATABASE")]
        database: Option<PathBuf>,

        /// Address to bind
        #[arg(long, env = "CONTACTQL_HOST")]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "CONTACTQL_PORT")]
        port: Option<u16>,
    },

    /// Write a config file with the defaults
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the GraphQL schema (SDL)
    Schema,

    /// Show how many contacts are stored
    Stats {
        /// Path to the database file
        #[arg(short, long, env = "CONTACTQL_DATABASE")]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { database, host, port } => {
            let settings = ServerSettings::resolve(
                file_config.as_ref(),
                Overrides { database, host, port },
            );
            tracing::debug!("Resolved settings: {:?}", settings);
            contactql::server::start_server(settings).await?;
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &config::starter_config(), force)?;
            println!("✅ Wrote {}", path.display());
        }

        Commands::Schema => {
            print!("{}", contactql::graphql::export_schema_sdl());
        }

        Commands::Stats { database } => {
            let settings = ServerSettings::resolve(
                file_config.as_ref(),
                Overrides { database, ..Default::default() },
            );
            config::ensure_db_dir(&settings.database)?;
            let store = ContactStore::open(&settings.database).await?;
            let count = store.count().await?;

            println!("📊 Contactql Statistics ({:?})", settings.database);
            println!("------------------------------------");
            println!("  Contacts: {}", count);
        }
    }

    Ok(())
}
