use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod session;
mod tui;

use api::{ApiClient, AuthProvider};
use config::Config;
use session::SessionStore;

#[derive(Parser)]
#[command(name = "megachat")]
#[command(author, version, about = "MegaChat - AI study assistant for school tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive TUI (default)
    Chat {
        /// Override the inference endpoint URL
        #[arg(long)]
        assist_url: Option<String>,

        /// Override the auth endpoint URL
        #[arg(long)]
        auth_url: Option<String>,
    },

    /// Sign in from the terminal without opening the TUI
    Auth {
        /// Provider to sign in with (google, yandex)
        provider: String,
    },

    /// Clear the stored session
    Logout,

    /// Print the configuration file path
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "megachat_cli=debug,megachat=debug"
    } else {
        "megachat_cli=info,megachat=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load()?;

    match cli.command.unwrap_or(Commands::Chat {
        assist_url: None,
        auth_url: None,
    }) {
        Commands::Chat {
            assist_url,
            auth_url,
        } => {
            if let Some(url) = assist_url {
                config.endpoints.assist_url = url;
            }
            if let Some(url) = auth_url {
                config.endpoints.auth_url = url;
            }
            tracing::info!("Starting MegaChat TUI");
            tui::run(config).await?;
        }
        Commands::Auth { provider } => {
            let provider: AuthProvider = provider.parse()?;
            let client = ApiClient::new(&config.endpoints);
            let store = SessionStore::open_default()?;

            let session = client.authenticate(provider).await?;
            store.save(&session)?;
            println!(
                "Signed in as {} <{}> via {}",
                session.user.name, session.user.email, session.user.provider
            );
        }
        Commands::Logout => {
            let store = SessionStore::open_default()?;
            store.clear()?;
            println!("Session cleared");
        }
        Commands::ConfigPath => {
            println!("{}", Config::config_path()?.display());
        }
    }

    Ok(())
}
