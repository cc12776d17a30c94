use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};

use crate::{
    abi::WeightedPool,
    error::ValuationError,
    num::{self, safe_div},
};

/// Read adapter over a two-asset weighted AMM pool.
#[derive(Clone, Debug)]
pub struct Pool<P: Provider> {
    instance: WeightedPool::WeightedPoolInstance<P>,
}

/// Observed balances and parameters of a two-asset weighted pool.
///
/// Balances and shares are floats of raw token units: the valuation is an
/// off-chain estimate whose arithmetic must match the original float-based
/// computation, truncations included.
#[derive(Clone, Copy, derive_more::Debug)]
#[debug("PoolState {{ synth: {balance_synth} x{weight_synth}, pair: {balance_pair} x{weight_pair}, fee: {swap_fee} }}")]
pub struct PoolState {
    balance_synth: f64,
    balance_pair: f64,
    weight_synth: f64,
    weight_pair: f64,
    total_shares: f64,
    user_shares: f64,
    swap_fee: f64,
    synth_decimals: u8,
    pair_decimals: u8,
}

impl<P: Provider> Pool<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self { instance: WeightedPool::new(address, provider) }
    }

    pub fn address(&self) -> Address { *self.instance.address() }

    /// The pool's finalized token list. The weighted-product formulas below
    /// are defined only for pairs, so anything else is rejected up front.
    pub async fn tokens(&self) -> Result<[Address; 2], ValuationError> {
        if self.instance.getNumTokens().call().await? != U256::from(2u64) {
            return Err(ValuationError::UnsupportedPool(
                "only two-token weighted pools are supported".into(),
            ));
        }
        let tokens = self.instance.getFinalTokens().call().await?;
        Ok([tokens[0], tokens[1]])
    }

    /// Reads the full pool state for the given synth/pair assignment. Reads
    /// are sequential single round trips at whatever block is current.
    pub async fn state(
        &self,
        synth: Address,
        pair: Address,
        synth_decimals: u8,
        pair_decimals: u8,
        user: Address,
    ) -> Result<PoolState, ValuationError> {
        let balance_synth = self.instance.getBalance(synth).call().await?;
        let weight_synth = self.instance.getNormalizedWeight(synth).call().await?;
        let balance_pair = self.instance.getBalance(pair).call().await?;
        let weight_pair = self.instance.getNormalizedWeight(pair).call().await?;
        let total_shares = self.instance.totalSupply().call().await?;
        let user_shares = self.instance.balanceOf(user).call().await?;
        let swap_fee = self.instance.getSwapFee().call().await?;
        Ok(PoolState::new(
            balance_synth,
            balance_pair,
            weight_synth,
            weight_pair,
            total_shares,
            user_shares,
            swap_fee,
            synth_decimals,
            pair_decimals,
        ))
    }
}

impl PoolState {
    pub fn new(
        balance_synth: U256,
        balance_pair: U256,
        weight_synth: U256,
        weight_pair: U256,
        total_shares: U256,
        user_shares: U256,
        swap_fee: U256,
        synth_decimals: u8,
        pair_decimals: u8,
    ) -> Self {
        Self {
            balance_synth: num::to_f64(balance_synth),
            balance_pair: num::to_f64(balance_pair),
            weight_synth: num::normalized(weight_synth),
            weight_pair: num::normalized(weight_pair),
            total_shares: num::to_f64(total_shares),
            user_shares: num::to_f64(user_shares),
            swap_fee: num::normalized(swap_fee),
            synth_decimals,
            pair_decimals,
        }
    }

    pub fn balance_synth(&self) -> f64 { self.balance_synth }

    pub fn balance_pair(&self) -> f64 { self.balance_pair }

    pub fn weight_synth(&self) -> f64 { self.weight_synth }

    pub fn weight_pair(&self) -> f64 { self.weight_pair }

    pub fn swap_fee(&self) -> f64 { self.swap_fee }

    /// Fraction of pool shares held by the user.
    pub fn share_fraction(&self) -> f64 { safe_div(self.user_shares, self.total_shares) }

    /// Marginal price of the synthetic token quoted in pair tokens, corrected
    /// for the assets' decimal counts. A fully drained pool prices at zero.
    pub fn current_price(&self) -> f64 {
        safe_div(
            self.balance_pair / self.weight_pair / 10f64.powi(self.pair_decimals as i32),
            self.balance_synth / self.weight_synth / 10f64.powi(self.synth_decimals as i32),
        )
    }

    /// Weighted-product invariant `s^ws * p^wp`, conserved across any
    /// rebalance that moves no value in or out of the pool.
    pub fn invariant(&self) -> f64 {
        self.balance_synth.powf(self.weight_synth) * self.balance_pair.powf(self.weight_pair)
    }

    /// Balances the pool would hold if arbitrage moved its marginal price to
    /// `target_price` without adding or removing value: solves the system
    /// {invariant conserved, implied price = target} in closed form.
    /// `None` passes the observed balances through unchanged.
    pub fn rebalanced(&self, target_price: Option<f64>) -> Self {
        let Some(target_price) = target_price else {
            return *self;
        };
        let v = self.invariant();
        let scaling = 10f64.powi(self.pair_decimals as i32 - self.synth_decimals as i32);
        let k = (target_price * scaling).powf(self.weight_pair)
            * (self.weight_pair / self.weight_synth).powf(self.weight_pair);
        let balance_pair = (v / (v / k).powf(self.weight_synth)).powf(1.0 / self.weight_pair);
        let balance_synth = v / k;
        Self { balance_synth, balance_pair, ..*self }
    }

    /// User's pro-rata withdrawal of each pool asset, truncated to whole raw
    /// units the way the pool contract would round.
    pub fn user_share(&self) -> (f64, f64) {
        (
            (safe_div(self.balance_synth, self.total_shares) * self.user_shares).trunc(),
            (safe_div(self.balance_pair, self.total_shares) * self.user_shares).trunc(),
        )
    }

    /// Pool as it would stand after the user's share leaves, scaled by the
    /// hypothetical size of the remaining pool (`1.0` = everyone else stays).
    pub fn after_exit(&self, relative_size: f64) -> Self {
        let (user_synth, user_pair) = self.user_share();
        Self {
            balance_synth: ((self.balance_synth - user_synth) * relative_size).trunc(),
            balance_pair: ((self.balance_pair - user_pair) * relative_size).trunc(),
            ..*self
        }
    }
}

/// Balancer `calcOutGivenIn`: tokens returned by the pool for swapping
/// `amount_in` into it. Operator ordering matches the on-chain formula.
pub fn calc_out_given_in(
    balance_in: f64,
    weight_in: f64,
    balance_out: f64,
    weight_out: f64,
    amount_in: f64,
    swap_fee: f64,
) -> f64 {
    balance_out
        * (1.0
            - (balance_in / (balance_in + amount_in * (1.0 - swap_fee)))
                .powf(weight_in / weight_out))
}

/// Balancer `calcInGivenOut`: tokens that must be paid in for the pool to
/// release `amount_out`.
pub fn calc_in_given_out(
    balance_in: f64,
    weight_in: f64,
    balance_out: f64,
    weight_out: f64,
    amount_out: f64,
    swap_fee: f64,
) -> f64 {
    balance_in * ((balance_out / (balance_out - amount_out)).powf(weight_out / weight_in) - 1.0)
        / (1.0 - swap_fee)
}
