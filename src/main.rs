//! City Explorer
//!
//! HTTP API that geocodes city names (caching the results in PostgreSQL) and
//! proxies nearby restaurant and hiking trail listings.

use city_explorer_core::{ExplorerConfig, Result};
use city_explorer_infra::{init_logger, LoggerConfig};
use city_explorer_serve::{AppState, ServerBuilder, ServerConfig};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "city-explorer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "City Explorer - location, restaurant and trail aggregation API")]
#[command(long_about = r#"
City Explorer resolves city names to coordinates through LocationIQ, caching
every answer in PostgreSQL, and proxies restaurant listings from Yelp and
hiking trails from the Hiking Project.

Configuration is read from the environment (and an optional .env file):
PORT, DATABASE_URL, LOCATION_KEY, YELP_KEY and TRAIL_KEY are required.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Override the bind address
        #[arg(long)]
        host: Option<String>,

        /// Override the listening port
        #[arg(short, long)]
        port: Option<u16>,

        /// Disable cross-origin resource sharing
        #[arg(long)]
        no_cors: bool,
    },

    /// Load and validate configuration without starting the server
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the real environment may be complete.
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ExplorerConfig::from_env()?;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if cli.json_logs {
        config.log_json = true;
    }

    init_logger(LoggerConfig::from(&config))?;

    info!("Starting City Explorer v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            no_cors,
        }) => handle_serve(config, host, port, no_cors).await,
        Some(Commands::Validate) => handle_validate(&config),
        None => handle_serve(config, None, None, false).await,
    }
}

async fn handle_serve(
    config: ExplorerConfig,
    host: Option<String>,
    port: Option<u16>,
    no_cors: bool,
) -> Result<()> {
    let mut builder = ServerBuilder::with_config(ServerConfig::from(&config)).cors(!no_cors);
    if let Some(host) = host {
        builder = builder.host(host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }

    let state = AppState::connect(&config).await?;
    let server = builder.build(state);
    server.start().await?;

    info!("City Explorer stopped");
    Ok(())
}

fn handle_validate(config: &ExplorerConfig) -> Result<()> {
    config.validate()?;

    println!("✅ Configuration is valid");
    println!("🌐 Bind address: {}", config.bind_address()?);
    println!("📍 Geocoding: {}", config.location_api_url);
    println!("🍽️  Restaurants: {}", config.yelp_api_url);
    println!("🥾 Trails: {}", config.trail_api_url);

    Ok(())
}
