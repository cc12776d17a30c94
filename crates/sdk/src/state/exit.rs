//! The exit valuation proper: combines the sponsor position, the (possibly
//! rebalanced) pool state and the user's wallet balance into withdrawal
//! amounts, the balancing swap and the settlement value.

use crate::num::{self, Converter};

use super::{PoolState, Position, calc_in_given_out, calc_out_given_in};

/// Parameters of a simulated pool exit.
#[derive(Clone, Copy, Debug)]
pub struct ExitRequest {
    /// Fraction of the pool assumed to remain after the user's stake is
    /// removed (`1.0` = everyone else stays put).
    pub relative_size: f64,
    /// Price the position settles at when the contract expires.
    pub settlement_price: f64,
    /// Pool price to rebalance to before the exit, if any.
    pub target_pool_price: Option<f64>,
}

/// Outcome of a simulated exit. Token amounts are raw units; `redeemable` is
/// whole collateral tokens.
#[derive(Clone, Copy, derive_more::Debug)]
pub struct ExitBreakdown {
    /// Synthetic tokens withdrawn pro rata from the pool.
    pub withdrawn_synth: f64,
    /// Pair tokens withdrawn pro rata from the pool.
    pub withdrawn_pair: f64,
    /// Pair tokens moved by the balancing swap. Positive: the user sells
    /// excess synths to the pool. Negative: pair tokens are spent buying the
    /// synths still needed to cover the debt.
    pub swap_pair: f64,
    /// Value the position settles for at expiry, collateral surplus included.
    pub redeemable: f64,
}

/// Runs the full exit computation against already-loaded state.
///
/// The pool is rebalanced first (identity when no target price is set), the
/// user's pro-rata share is carved out of the rebalanced balances, and the
/// balancing swap is priced against what remains.
pub fn evaluate(
    request: &ExitRequest,
    position: &Position,
    pool: &PoolState,
    wallet_synth: f64,
    synth_units: Converter,
    collateral_units: Converter,
) -> ExitBreakdown {
    let pool = pool.rebalanced(request.target_pool_price);
    let (withdrawn_synth, withdrawn_pair) = pool.user_share();
    let residual = pool.after_exit(request.relative_size);

    let debt = num::to_f64(position.debt());
    let holdings = withdrawn_synth + wallet_synth;
    let swap_pair = if holdings > debt {
        calc_out_given_in(
            residual.balance_synth(),
            residual.weight_synth(),
            residual.balance_pair(),
            residual.weight_pair(),
            holdings - debt,
            residual.swap_fee(),
        )
    } else if holdings < debt {
        -calc_in_given_out(
            residual.balance_pair(),
            residual.weight_pair(),
            residual.balance_synth(),
            residual.weight_synth(),
            debt - holdings,
            residual.swap_fee(),
        )
    } else {
        0.0
    };

    // Settling at expiry: synths redeem at the settlement price, and any
    // collateral left above the settlement-priced debt is returned. The
    // surplus is floored at zero; an under-collateralized position never
    // produces a negative redemption.
    let redeemable = synth_units.from_raw(holdings) * request.settlement_price
        + (collateral_units.from_units(position.collateral())
            - synth_units.from_raw(debt) * request.settlement_price)
            .max(0.0);

    ExitBreakdown { withdrawn_synth, withdrawn_pair, swap_pair, redeemable }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::U256;

    use super::*;

    const WAD: u64 = 1_000_000_000_000_000_000;

    fn units() -> Converter { Converter::new(0) }

    fn pool() -> PoolState {
        PoolState::new(
            U256::from(1_000_000u64),
            U256::from(2_000_000u64),
            U256::from(WAD / 2),
            U256::from(WAD / 2),
            U256::from(100u64),
            U256::from(10u64),
            U256::ZERO,
            0,
            0,
        )
    }

    fn position(debt: u64, collateral: u64) -> Position {
        Position::from_chain(U256::from(debt), U256::ZERO, U256::from(collateral), U256::from(WAD))
            .unwrap()
    }

    fn request(settlement_price: f64) -> ExitRequest {
        ExitRequest { relative_size: 1.0, settlement_price, target_pool_price: None }
    }

    #[test]
    fn test_pro_rata_withdrawal() {
        let breakdown =
            evaluate(&request(2.0), &position(100_000, 0), &pool(), 0.0, units(), units());
        assert_eq!(breakdown.withdrawn_synth, 100_000.0);
        assert_eq!(breakdown.withdrawn_pair, 200_000.0);
    }

    #[test]
    fn test_net_zero_skips_swap() {
        // Withdrawn synths exactly cover the debt
        let breakdown =
            evaluate(&request(2.0), &position(100_000, 0), &pool(), 0.0, units(), units());
        assert_eq!(breakdown.swap_pair, 0.0);
    }

    #[test]
    fn test_excess_synths_sold_to_pool() {
        // 100k withdrawn, 50k debt: 50k excess sold into the 900k/1.8m
        // residual pool
        let breakdown =
            evaluate(&request(2.0), &position(50_000, 0), &pool(), 0.0, units(), units());
        let expected = 1_800_000.0 * (1.0 - 900_000.0 / 950_000.0);
        assert!((breakdown.swap_pair - expected).abs() < 1e-6);
        assert!(breakdown.swap_pair > 0.0);
    }

    #[test]
    fn test_missing_synths_bought_from_pool() {
        let breakdown =
            evaluate(&request(2.0), &position(150_000, 0), &pool(), 0.0, units(), units());
        let expected = -(1_800_000.0 * ((900_000.0 / 850_000.0) - 1.0));
        assert!((breakdown.swap_pair - expected).abs() < 1e-6);
        assert!(breakdown.swap_pair < 0.0);
    }

    #[test]
    fn test_wallet_balance_counts_toward_debt() {
        // 100k from the pool plus 50k in the wallet exactly covers 150k debt
        let breakdown =
            evaluate(&request(2.0), &position(150_000, 0), &pool(), 50_000.0, units(), units());
        assert_eq!(breakdown.swap_pair, 0.0);
    }

    #[test]
    fn test_redeemable_collateral_surplus() {
        // No pool stake: redeemable = 0*1.5 + max(0, 1000 - 500*1.5) = 250
        let empty = PoolState::new(
            U256::from(1_000_000u64),
            U256::from(2_000_000u64),
            U256::from(WAD / 2),
            U256::from(WAD / 2),
            U256::from(100u64),
            U256::ZERO,
            U256::ZERO,
            0,
            0,
        );
        let breakdown = evaluate(&request(1.5), &position(500, 1000), &empty, 0.0, units(), units());
        assert_eq!(breakdown.redeemable, 250.0);
    }

    #[test]
    fn test_redeemable_floor_at_zero_surplus() {
        // Debt worth more than collateral: surplus clamps to zero, synths
        // still redeem at the settlement price
        let breakdown =
            evaluate(&request(3.0), &position(100_000, 1000), &pool(), 0.0, units(), units());
        assert_eq!(breakdown.redeemable, 100_000.0 * 3.0);
    }

    #[test]
    fn test_rebalance_to_current_price_is_noop() {
        let observed = pool();
        let plain = evaluate(&request(2.0), &position(50_000, 0), &observed, 0.0, units(), units());
        let pinned = evaluate(
            &ExitRequest {
                relative_size: 1.0,
                settlement_price: 2.0,
                target_pool_price: Some(observed.current_price()),
            },
            &position(50_000, 0),
            &observed,
            0.0,
            units(),
            units(),
        );
        assert!((plain.withdrawn_synth - pinned.withdrawn_synth).abs() <= 1.0);
        assert!((plain.withdrawn_pair - pinned.withdrawn_pair).abs() <= 1.0);
        assert!((plain.swap_pair - pinned.swap_pair).abs() < 5.0);
    }

    #[test]
    fn test_full_drain_relative_zero() {
        let breakdown = evaluate(
            &ExitRequest { relative_size: 0.0, settlement_price: 2.0, target_pool_price: None },
            &position(100_000, 0),
            &pool(),
            0.0,
            units(),
            units(),
        );
        // User still withdraws pro rata; the residual pool is empty
        assert_eq!(breakdown.withdrawn_synth, 100_000.0);
        assert_eq!(breakdown.swap_pair, 0.0);
    }
}
