use alloy::{primitives::Address, providers::Provider};
use colored::Colorize;
use synthpool_sdk::{
    config::Config,
    discovery::find_synthetic_manager,
    error::ValuationError,
    explorer::Explorer,
    num,
    oracle::{self, SpotOracle},
    state::{ExitBreakdown, ExitRequest, Pool, Synthetic, Token, TokenInfo, evaluate},
};
use tabled::{Table, Tabled, settings::Style};

pub(crate) async fn render<P: Provider + Clone>(
    provider: P,
    config: &Config,
    explorer: &Explorer,
    pool_address: Address,
    user: Address,
    settlement_price: Option<f64>,
    relative: f64,
    pool_price: Option<f64>,
) -> anyhow::Result<()> {
    let pool = Pool::new(pool_address, provider.clone());
    let [first, second] = pool.tokens().await?;

    // Which of the two pool tokens is the synthetic one?
    let (synth_address, pair_address, manager) =
        match find_synthetic_manager(&provider, explorer, first).await? {
            Some(manager) => (first, second, manager),
            None => match find_synthetic_manager(&provider, explorer, second).await? {
                Some(manager) => (second, first, manager),
                None => {
                    return Err(ValuationError::UnsupportedPool(
                        "neither pool token traces back to a synthetic-asset manager".into(),
                    )
                    .into());
                },
            },
        };

    let synthetic = Synthetic::new(manager, provider.clone());
    synthetic.ensure_open().await?;

    let settlement_price = match settlement_price {
        Some(price) => price,
        None => {
            let identifier = synthetic.price_identifier().await?;
            let feed = config
                .price_feeds
                .get(&identifier)
                .ok_or_else(|| ValuationError::PriceUnavailable(identifier.clone()))?;
            SpotOracle::new(oracle::DEFAULT_API_URL)
                .price(feed)
                .await?
                .ok_or(ValuationError::PriceUnavailable(identifier))?
        },
    };

    let collateral_info = Token::new(synthetic.collateral_currency().await?, provider.clone())
        .info()
        .await?;
    let synth = Token::new(synth_address, provider.clone());
    let synth_info = synth.info().await?;
    let pair_info = Token::new(pair_address, provider.clone()).info().await?;
    let wallet_synth = num::to_f64(synth.balance_of(user).await?);

    let position = synthetic.position(user).await?;
    let observed = pool
        .state(synth_address, pair_address, synth_info.decimals, pair_info.decimals, user)
        .await?;

    let request = ExitRequest {
        relative_size: relative,
        settlement_price,
        target_pool_price: pool_price,
    };
    let breakdown = evaluate(
        &request,
        &position,
        &observed,
        wallet_synth,
        synth_info.converter(),
        collateral_info.converter(),
    );

    let exit_price = pool_price.unwrap_or_else(|| observed.current_price());
    let synth_units = synth_info.converter();
    let pair_units = pair_info.converter();
    let collateral_units = collateral_info.converter();

    println!("\n{}\n", format!("{:#^80}", " Pool Exit Valuation ").bold().purple());

    let mut table = Table::new(vec![
        AssetRow {
            asset: synth_info.symbol.clone(),
            balance: format!("{:.6}", synth_units.from_raw(observed.balance_synth())),
            withdrawal: format!("{:.6}", synth_units.from_raw(breakdown.withdrawn_synth)),
        },
        AssetRow {
            asset: pair_info.symbol.clone(),
            balance: format!("{:.6}", pair_units.from_raw(observed.balance_pair())),
            withdrawal: format!("{:.6}", pair_units.from_raw(breakdown.withdrawn_pair)),
        },
    ]);
    table.with(Style::sharp());
    println!("{table}");

    println!("Current synth price from the pool: {:.6}", observed.current_price());
    println!(
        "User holds {:.6} of pool shares; exit priced at {}",
        observed.share_fraction(),
        format!("{exit_price:.6}").bold(),
    );
    println!(
        "Position with the synthetic contract ({}):\n  {} {} debt\n  {} {} locked collateral",
        manager,
        format!("{:.6}", synth_units.from_units(position.debt())).red(),
        synth_info.symbol,
        format!("{:.6}", collateral_units.from_units(position.collateral())).green(),
        collateral_info.symbol,
    );
    println!("User wallet holds {:.6} {}", synth_units.from_raw(wallet_synth), synth_info.symbol);

    render_scenarios(&breakdown, &synth_info, &pair_info, &collateral_info, &position);

    Ok(())
}

fn render_scenarios(
    breakdown: &ExitBreakdown,
    synth: &TokenInfo,
    pair: &TokenInfo,
    collateral: &TokenInfo,
    position: &synthpool_sdk::state::Position,
) {
    let pair_units = pair.converter();
    let collateral_whole = collateral.converter().from_units(position.collateral());
    let net_pair = pair_units.from_raw(breakdown.withdrawn_pair + breakdown.swap_pair);

    let scenario_a = if breakdown.swap_pair > 0.0 {
        format!(
            "A: Sell excess {} to the pool and redeem {:.6} {} collateral; net {:.6} {} from the pair side",
            synth.symbol, collateral_whole, collateral.symbol, net_pair, pair.symbol,
        )
    } else if breakdown.swap_pair < 0.0 {
        format!(
            "A: Buy the missing {} from the pool and redeem {:.6} {} collateral; net {:.6} {} from the pair side",
            synth.symbol, collateral_whole, collateral.symbol, net_pair, pair.symbol,
        )
    } else {
        format!(
            "A: Redeem {:.6} {} collateral and keep {:.6} {} from the pair side",
            collateral_whole,
            collateral.symbol,
            pair_units.from_raw(breakdown.withdrawn_pair),
            pair.symbol,
        )
    };
    println!("{}", scenario_a.yellow());
    println!(
        "{}",
        format!(
            "B: Settle after expiry for {:.6} {} and keep {:.6} {} from the pair side",
            breakdown.redeemable,
            collateral.symbol,
            pair_units.from_raw(breakdown.withdrawn_pair),
            pair.symbol,
        )
        .cyan()
    );
}

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Pool Balance")]
    balance: String,
    #[tabled(rename = "User Withdrawal")]
    withdrawal: String,
}
