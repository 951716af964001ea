use std::fs;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use linkdeck::auth::{self, ADMIN_USERNAME, TokenService};
use linkdeck::config::{DEFAULT_SIGNING_SECRET, ServerConfig};
use linkdeck::server::{AppState, create_router};
use linkdeck::store::{SqliteStore, Store};

const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Parser)]
#[command(name = "linkdeck")]
#[command(about = "A self-hostable start page server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8080")]
        port: u16,

        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },
}

/// Opens the store and guarantees the admin identity, settings keys, and
/// starter catalog exist before the listener binds.
fn prepare_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    fs::create_dir_all(&config.data_dir)?;

    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    let default_hash = auth::hash_password(DEFAULT_ADMIN_PASSWORD)?;
    if store.ensure_admin(&default_hash)? {
        warn!(
            "Created default admin credential (username: {ADMIN_USERNAME}, password: \
             {DEFAULT_ADMIN_PASSWORD}). Change it via /api/auth/change-password."
        );
    } else if let Some(hash) = store.get_admin_hash()? {
        if auth::verify_password(DEFAULT_ADMIN_PASSWORD, &hash)? {
            warn!("Admin credential still uses the default password");
        }
    }

    let settings = store.get_settings()?;
    store.put_settings(&settings)?;

    if store.seed_default_links()? {
        info!("Seeded starter links into the empty catalog");
    }

    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("linkdeck=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let signing_secret = std::env::var("LINKDECK_SECRET")
                .unwrap_or_else(|_| DEFAULT_SIGNING_SECRET.to_string());

            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
                signing_secret,
            };

            if config.uses_default_secret() {
                warn!(
                    "LINKDECK_SECRET is unset; tokens are signed with the built-in secret \
                     and are forgeable. Set LINKDECK_SECRET before exposing this server."
                );
            }

            let store = prepare_store(&config)?;

            let state = Arc::new(AppState::new(
                Arc::new(store),
                TokenService::new(&config.signing_secret),
            ));

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
