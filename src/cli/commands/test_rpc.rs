use super::RpcArgs;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::rpc::BitcoinRpcClient;
use clap::Args;
use tracing::{error, info};

/// Test Bitcoin RPC connectivity
#[derive(Args)]
pub struct TestRpcCommand {
    #[command(flatten)]
    pub rpc: RpcArgs,
}

impl TestRpcCommand {
    pub async fn run(&self) -> AppResult<()> {
        info!("=== Testing Bitcoin RPC Connection ===");

        let app_config = AppConfig::get_defaults().map_err(|e| AppError::Config(e.to_string()))?;
        let rpc_config = self.rpc.apply(app_config.bitcoin_rpc);

        info!("Testing connection to: {}", rpc_config.url);
        info!("Username: {}", rpc_config.username);

        let client = BitcoinRpcClient::new(rpc_config)?;
        match client.test_connection().await {
            Ok(summary) => {
                println!("Bitcoin RPC connection test PASSED");
                println!("Chain: {}, blocks: {}", summary.chain, summary.blocks);
                Ok(())
            }
            Err(e) => {
                error!("RPC connection test failed: {}", e);
                println!("Bitcoin RPC connection test FAILED");
                println!("Error: {}", e);
                println!("\nTroubleshooting tips:");
                println!("1. Check that the node is running");
                println!("2. Verify the RPC URL and port (-m for mainnet)");
                println!("3. Ensure RPC credentials are valid");
                Err(e.into())
            }
        }
    }
}
