use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Show OP_RETURN data for Bitcom style protocols: AIP, B, D, MAP, |
#[derive(Parser)]
#[command(name = "bitcom-peek")]
#[command(about = "Show OP_RETURN data for Bitcom style protocols: AIP, B, D, MAP, |")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a transaction and show its Bitcom OP_RETURN data
    Peek(commands::peek::PeekCommand),
    /// Decode a hex-encoded OP_RETURN script
    DecodeScript(commands::decode::DecodeScriptCommand),
    /// Decode the OP_RETURN data of a raw transaction hex
    DecodeRawTx(commands::decode::DecodeRawTxCommand),
    /// Test Bitcoin RPC connectivity
    TestRpc(commands::test_rpc::TestRpcCommand),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Peek(command) => command.run().await,
        Commands::DecodeScript(command) => command.run().await,
        Commands::DecodeRawTx(command) => command.run().await,
        Commands::TestRpc(command) => command.run().await,
    }
}
