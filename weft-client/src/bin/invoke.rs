//! Demo driver: runs one invocation end to end over the in-memory
//! fabric and prints the decoded result payload.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use weft_client::in_memory::{EventScript, InMemoryFabric, ProposalBehavior};
use weft_client::{invoke_transaction, ClientConfig, InvokeParams};
use weft_common::{Peer, ValidationCode};

#[derive(Parser)]
#[command(name = "weft-invoke")]
#[command(about = "Weft ledger invocation demo")]
struct Cli {
    /// Client config file (JSON); a built-in demo config is used when
    /// absent.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Contract function to invoke.
    #[arg(short, long, default_value = "createVehicle")]
    function: String,

    /// Positional arguments for the function.
    #[arg(value_name = "ARG")]
    args: Vec<String>,

    /// Commit-confirmation timeout override in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,
}

fn demo_config() -> ClientConfig {
    ClientConfig {
        identity: "user1".to_string(),
        channel: "mychannel".to_string(),
        contract: "vehicles".to_string(),
        orderer_endpoint: "grpc://localhost:7050".to_string(),
        peers: vec![
            Peer::new("peer0", "grpc://localhost:7051", "grpc://localhost:7053", "admin"),
            Peer::new("peer1", "grpc://localhost:8051", "grpc://localhost:8053", "admin"),
        ],
        timeout_ms: 30_000,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::load_from_file(path)?,
        None => demo_config(),
    };

    // Scripted fabric: every peer endorses, the orderer accepts, and
    // the commit event lands shortly after submission.
    let fabric = InMemoryFabric::new();
    fabric.set_proposal(ProposalBehavior::Endorse {
        status: 200,
        payload: br#"{"status":"created"}"#.to_vec(),
    });
    fabric.push_event(EventScript::Commit {
        code: ValidationCode::Valid,
        after: Duration::from_millis(100),
    });

    let params = InvokeParams {
        contract: config.contract.clone(),
        function: cli.function,
        args: cli.args.into_iter().map(Some).collect(),
        channel_name: config.channel.clone(),
        peers: config.peers.clone(),
        identity: config.identity.clone(),
        timeout: cli.timeout.map(Duration::from_millis).or(Some(config.budget())),
    };

    let client = fabric.client();
    let channel = fabric.channel();
    let credentials = fabric.credentials();

    let payload = invoke_transaction(
        &client,
        &channel,
        &credentials,
        Box::new(fabric.event_hub()),
        params,
    )
    .await?;

    println!("{payload}");
    Ok(())
}
