pub mod args;
mod block;
mod exit_pool;
mod repay;
mod twap;

use alloy::{
    eips::BlockId,
    providers::{Provider, ProviderBuilder},
};
use anyhow::Context;
use chrono::{DateTime, Utc};
use synthpool_sdk::{config::Config, explorer, explorer::Explorer};

use crate::args::{Cli, Commands};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)?;

    let rpc = match cli.rpc {
        Some(rpc) => rpc,
        None => {
            let key = std::env::var("ALCHEMY_KEY")
                .context("no RPC endpoint; pass --rpc or set ALCHEMY_KEY")?;
            format!("https://eth-mainnet.alchemyapi.io/v2/{key}")
        },
    };
    // One connection, no retry layers: a failed call fails the whole run
    let provider = ProviderBuilder::new()
        .connect(&rpc)
        .await
        .context("connecting to RPC")?;

    match cli.command {
        Commands::ExitPool { pool, address, settlement_price, relative, pool_price } => {
            exit_pool::render(
                provider,
                &config,
                &explorer_client(&config)?,
                pool,
                address,
                settlement_price,
                relative,
                pool_price,
            )
            .await
        },
        Commands::Twap { contract, timestamp, period, block, first_block } => {
            twap::render(
                provider,
                &explorer_client(&config)?,
                contract,
                timestamp,
                period,
                block,
                first_block,
            )
            .await
        },
        Commands::Block { timestamp, block } => {
            block::render(provider, &explorer_client(&config)?, timestamp, block).await
        },
        Commands::Repay { contract, address, keep, time } => {
            repay::render(provider, contract, address, keep, time).await
        },
    }
}

fn explorer_client(config: &Config) -> anyhow::Result<Explorer> {
    let key = config
        .etherscan_key
        .clone()
        .context("no Etherscan API key; set ETHERSCAN_KEY or add etherscan_key to the config")?;
    Ok(Explorer::new(explorer::DEFAULT_API_URL, key))
}

/// Timestamp of a block, fetched from the node.
pub(crate) async fn block_timestamp<P: Provider>(provider: &P, number: u64) -> anyhow::Result<u64> {
    let block = provider
        .get_block(BlockId::number(number))
        .await?
        .with_context(|| format!("block #{number} not found"))?;
    Ok(block.header.timestamp)
}

/// Current UNIX time. The chain never reports the future, so "now" is only
/// used as the default end of a lookup window.
pub(crate) fn unix_now() -> anyhow::Result<u64> {
    Ok(std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs())
}

/// UTC rendering used by every report line that mentions a timestamp.
pub(crate) fn utc(timestamp: u64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp as i64, 0)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
