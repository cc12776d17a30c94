use alloy::{primitives::Address, providers::Provider};
use colored::Colorize;
use synthpool_sdk::{lending::Market, state::Token};

// Mainnet averages roughly four blocks a minute
const BLOCKS_PER_MINUTE: u64 = 4;

pub(crate) async fn render<P: Provider + Clone>(
    provider: P,
    contract: Address,
    borrower: Address,
    keep: f64,
    minutes: u64,
) -> anyhow::Result<()> {
    let target_block = provider.get_block_number().await? + minutes * BLOCKS_PER_MINUTE;

    let market = Market::new(contract, provider.clone());
    let underlying = Token::new(market.underlying().await?, provider.clone())
        .info()
        .await?;
    let state = market.borrow_state(borrower).await?;

    let balance = underlying
        .converter()
        .from_units(state.projected_balance(target_block));

    println!(
        "Borrow balance at transaction at block #{}: {:.6} {}",
        target_block, balance, underlying.symbol,
    );
    println!("Repay: {} {}", format!("{:.6}", balance - keep).bold(), underlying.symbol);
    println!("Remaining balance: {:.6} {}", keep, underlying.symbol);

    Ok(())
}
