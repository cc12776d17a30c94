use alloy::providers::Provider;
use colored::Colorize;
use synthpool_sdk::explorer::Explorer;

use crate::{block_timestamp, utc};

pub(crate) async fn render<P: Provider>(
    provider: P,
    explorer: &Explorer,
    timestamp: Option<u64>,
    block: Option<u64>,
) -> anyhow::Result<()> {
    let (requested, number) = match (block, timestamp) {
        (Some(number), _) => (block_timestamp(&provider, number).await?, number),
        (None, Some(requested)) => (requested, explorer.block_by_time(requested).await?),
        (None, None) => (crate::unix_now()?, provider.get_block_number().await?),
    };
    let actual = block_timestamp(&provider, number).await?;

    println!("Requested timestamp: {} is {} UTC", requested, utc(requested));
    println!("Block timestamp: {} is {} UTC", actual, utc(actual));
    println!("Block number: {}", number.to_string().bold());

    Ok(())
}
