use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campus_cms::{api, cache::NavCache, config::CacheConfig, db};

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Marketing site and back-office server for an educational institute")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the CMS server
    Serve {
        /// Port for the HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Database file path (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "campus_cms=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let (port, db_path) = match cli.command {
        Some(Commands::Serve { port, db }) => (port, db),
        None => (3000, None),
    };

    let db = match db_path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let cache_config = CacheConfig::from_env();
    let cache = if cache_config.enabled {
        match NavCache::connect(&cache_config.url).await {
            Ok(cache) => {
                tracing::info!("Navigation cache enabled at {}", cache_config.url);
                cache
            }
            Err(e) => {
                tracing::warn!("Could not connect to cache, running without: {}", e);
                NavCache::disabled()
            }
        }
    } else {
        NavCache::disabled()
    };

    let app = api::create_router(db, cache);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Campus CMS server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
