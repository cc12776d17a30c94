//! End-to-end exit valuation over constructed state: the same pipeline the
//! CLI runs after loading, without a node.

use alloy::primitives::U256;
use synthpool_sdk::{
    num::Converter,
    state::{ExitRequest, PoolState, Position, evaluate},
};

const WAD: u64 = 1_000_000_000_000_000_000;

fn wad(x: u64) -> U256 { U256::from(x) * U256::from(WAD) }

/// A sponsor holding 10% of an even 1m/2m pool, 50k synthetic debt backed by
/// 200k collateral, settling at 1.5 pair per synth.
#[test]
fn test_exit_with_excess_synths() {
    let pool = PoolState::new(
        U256::from(1_000_000u64),
        U256::from(2_000_000u64),
        U256::from(WAD / 2),
        U256::from(WAD / 2),
        U256::from(100u64),
        U256::from(10u64),
        U256::ZERO,
        0,
        0,
    );
    let position = Position::from_chain(
        U256::from(50_000u64),
        U256::ZERO,
        U256::from(200_000u64),
        U256::from(WAD),
    )
    .unwrap();
    let request =
        ExitRequest { relative_size: 1.0, settlement_price: 1.5, target_pool_price: None };

    let breakdown =
        evaluate(&request, &position, &pool, 0.0, Converter::new(0), Converter::new(0));

    assert_eq!(breakdown.withdrawn_synth, 100_000.0);
    assert_eq!(breakdown.withdrawn_pair, 200_000.0);

    // 50k excess synths sold into the residual 900k/1.8m pool
    let expected_swap = 1_800_000.0 * (1.0 - 900_000.0 / 950_000.0);
    assert!((breakdown.swap_pair - expected_swap).abs() < 1e-6);

    // 100k synths at 1.5 plus the 125k collateral surplus
    assert_eq!(breakdown.redeemable, 100_000.0 * 1.5 + (200_000.0 - 50_000.0 * 1.5));
}

/// Rebalancing the pool down before the exit shrinks the pair-side
/// withdrawal and grows the synth side, with the invariant held.
#[test]
fn test_exit_after_rebalance() {
    let pool = PoolState::new(
        U256::from(1_000_000u64),
        U256::from(2_000_000u64),
        U256::from(WAD / 2),
        U256::from(WAD / 2),
        U256::from(100u64),
        U256::from(10u64),
        U256::ZERO,
        0,
        0,
    );
    let position =
        Position::from_chain(U256::from(100_000u64), U256::ZERO, U256::ZERO, U256::from(WAD))
            .unwrap();

    let observed =
        ExitRequest { relative_size: 1.0, settlement_price: 1.0, target_pool_price: None };
    let crashed =
        ExitRequest { relative_size: 1.0, settlement_price: 1.0, target_pool_price: Some(0.5) };

    let at_market =
        evaluate(&observed, &position, &pool, 0.0, Converter::new(0), Converter::new(0));
    let at_half = evaluate(&crashed, &position, &pool, 0.0, Converter::new(0), Converter::new(0));

    assert!(at_half.withdrawn_synth > at_market.withdrawn_synth);
    assert!(at_half.withdrawn_pair < at_market.withdrawn_pair);

    let rebalanced = pool.rebalanced(Some(0.5));
    assert!((rebalanced.invariant() - pool.invariant()).abs() / pool.invariant() < 1e-9);
    assert!((rebalanced.current_price() - 0.5).abs() < 1e-9);
}

/// Pending withdrawal requests abort the computation before any math runs.
#[test]
fn test_pending_withdrawal_is_fatal() {
    let result = Position::from_chain(
        U256::from(50_000u64),
        U256::from(1u64),
        U256::from(200_000u64),
        U256::from(WAD),
    );
    assert!(result.is_err());
}

/// 18/6-decimal asset mix: scaling runs through price, swap and redemption.
#[test]
fn test_mixed_decimals() {
    // 1000 synth (18 dec) vs 2,000,000 pair units (6 dec = 2.0 whole pair),
    // even weights: price = 2.0 / 1000 = 0.002 pair per synth
    let pool = PoolState::new(
        wad(1000),
        U256::from(2_000_000u64),
        U256::from(WAD / 2),
        U256::from(WAD / 2),
        U256::from(100u64),
        U256::from(10u64),
        U256::ZERO,
        18,
        6,
    );
    assert!((pool.current_price() - 0.002).abs() < 1e-12);

    let position =
        Position::from_chain(wad(100), U256::ZERO, U256::from(500_000u64), U256::from(WAD))
            .unwrap();
    let request =
        ExitRequest { relative_size: 1.0, settlement_price: 0.002, target_pool_price: None };
    let breakdown =
        evaluate(&request, &position, &pool, 0.0, Converter::new(18), Converter::new(6));

    // 100 whole synths withdrawn, 100 owed: nothing to swap
    assert_eq!(breakdown.swap_pair, 0.0);
    // 100 synths * 0.002 + max(0, 0.5 - 100 * 0.002) = 0.2 + 0.3
    assert!((breakdown.redeemable - 0.5).abs() < 1e-9);
}
