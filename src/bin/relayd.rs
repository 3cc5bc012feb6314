//! Relay server binary.

use std::path::Path;

use clap::Parser;
use tracing::info;

use mailbox_relay::config::RelayConfig;
use mailbox_relay::store::SqliteStore;
use mailbox_relay::transport::RelayServer;
use mailbox_relay::utils::logging;
use mailbox_relay::Result;

#[derive(Parser)]
#[command(name = "relayd", about = "Mailbox relay server", version)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long)]
    address: Option<String>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<String>,

    /// Maximum number of concurrent dispatch tasks
    #[arg(long)]
    dispatch_limit: Option<usize>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() {
    // Config can fail before the subscriber exists, so report on stderr.
    if let Err(e) = run(Args::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RelayConfig::from_file(path)?,
        None => RelayConfig::from_env()?,
    };

    // Flags override file and environment.
    if let Some(address) = args.address {
        config.server.address = address;
    }
    if let Some(database) = args.database {
        config.server.database_path = database;
    }
    if let Some(limit) = args.dispatch_limit {
        config.server.dispatch_limit = limit;
    }

    logging::init(&config.logging);
    config.validate_strict()?;

    let store = SqliteStore::connect(Path::new(&config.server.database_path)).await?;
    let server = RelayServer::bind(
        &config.server.address,
        store,
        config.server.dispatch_limit,
    )
    .await?;
    let metrics = server.metrics();

    tokio::select! {
        result = server.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("received CTRL+C signal, shutting down");
            metrics.log_summary();
            Ok(())
        }
    }
}
