//! Relay client binary: query, fetch, and send against a running server.

use std::io::Read;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use mailbox_relay::config::RelayConfig;
use mailbox_relay::service::RelayClient;
use mailbox_relay::utils::logging;
use mailbox_relay::Result;

#[derive(Parser)]
#[command(name = "relay", about = "Mailbox relay client", version)]
struct Args {
    /// Server address
    #[arg(short, long)]
    address: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query the list of message ids in a mailbox
    Query { mailbox: String },

    /// Fetch messages from a mailbox by id
    Fetch {
        mailbox: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Send a message to a mailbox; the body is read from standard input
    Send { mailbox: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = RelayConfig::from_env()?;
    if let Some(address) = args.address {
        config.client.address = address;
    }
    logging::init(&config.logging);

    let client = RelayClient::connect(&config.client.address)
        .await?
        .with_response_timeout(config.client.response_timeout);

    match args.command {
        Command::Query { mailbox } => {
            for id in client.query(&mailbox).await? {
                println!("{id}");
            }
        }
        Command::Fetch { mailbox, ids } => {
            for message in client.fetch(&mailbox, ids).await? {
                println!("ID: {}", message.id);
                println!("Mailbox: {}", message.mailbox);
                println!("Sender: {}", message.sender);
                println!("Timestamp: {}", message.timestamp);
                println!();
                println!("{}", message.body);
            }
        }
        Command::Send { mailbox } => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            client.send(&mailbox, &body).await?;
        }
    }

    Ok(())
}
