use alloy::{primitives::Address, providers::Provider};
use colored::Colorize;
use synthpool_sdk::{
    explorer::Explorer,
    state::Token,
    twap::{Pair, PairObservation, twap0, twap1},
};

use crate::{block_timestamp, utc};

pub(crate) async fn render<P: Provider + Clone>(
    provider: P,
    explorer: &Explorer,
    pair_address: Address,
    timestamp: Option<u64>,
    period: u64,
    block: Option<u64>,
    first_block: Option<u64>,
) -> anyhow::Result<()> {
    let mut period_minutes = period as f64;

    // Resolve the window to a pair of block numbers. Block arguments win
    // over timestamps; otherwise the window ends "now".
    let (first, last, end_timestamp) = if let Some(last) = block {
        let end = block_timestamp(&provider, last).await?;
        let first = match first_block {
            Some(first) => {
                period_minutes = (end - block_timestamp(&provider, first).await?) as f64 / 60.0;
                first
            },
            None => explorer.block_by_time(end - period * 60).await?,
        };
        (first, last, end)
    } else if let Some(end) = timestamp {
        (
            explorer.block_by_time(end - period * 60).await?,
            explorer.block_by_time(end).await?,
            end,
        )
    } else {
        let end = crate::unix_now()?;
        (explorer.block_by_time(end - period * 60).await?, provider.get_block_number().await?, end)
    };

    println!(
        "Calculating TWAP ending at {} UTC for {:.2}m period",
        utc(end_timestamp).bold(),
        period_minutes,
    );

    let pair = Pair::new(pair_address, provider.clone());
    let first_obs = pair.observe(first, block_timestamp(&provider, first).await?).await?;
    let last_obs = pair.observe(last, block_timestamp(&provider, last).await?).await?;

    let token0 = Token::new(pair.token0().await?, provider.clone()).info().await?;
    let token1 = Token::new(pair.token1().await?, provider.clone()).info().await?;

    println!("Token 1: {} at {}, {} digits", token0.symbol, token0.address, token0.decimals);
    println!("Token 2: {} at {}, {} digits", token1.symbol, token1.address, token1.decimals);

    let spots0 =
        |obs: &PairObservation| obs.spot0(token0.decimals, token1.decimals);
    println!("{}", format!("{}/{}:", token0.symbol, token1.symbol).bold());
    println!("Block {} at {} UTC: {:.6}", first_obs.block, utc(first_obs.timestamp), spots0(&first_obs));
    println!("Block {} at {} UTC: {:.6}", last_obs.block, utc(last_obs.timestamp), spots0(&last_obs));
    println!(
        "TWAP: {}",
        format!("{:.6}", twap0(&first_obs, &last_obs, token0.decimals, token1.decimals)).green()
    );

    let spots1 =
        |obs: &PairObservation| obs.spot1(token0.decimals, token1.decimals);
    println!("{}", format!("{}/{}:", token1.symbol, token0.symbol).bold());
    println!("Block {} at {} UTC: {:.6}", first_obs.block, utc(first_obs.timestamp), spots1(&first_obs));
    println!("Block {} at {} UTC: {:.6}", last_obs.block, utc(last_obs.timestamp), spots1(&last_obs));
    println!(
        "TWAP: {}",
        format!("{:.6}", twap1(&first_obs, &last_obs, token0.decimals, token1.decimals)).green()
    );

    Ok(())
}
