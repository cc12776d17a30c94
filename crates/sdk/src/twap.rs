//! Time-weighted average price from a Uniswap V2 pair.
//!
//! The pair keeps cumulative sums of its marginal price over time, updated on
//! every trade. Sampling the accumulator at two block heights and dividing by
//! the elapsed time yields the average price over the window; each sample is
//! projected forward from the pair's last on-chain update to the sampled
//! block's timestamp.

use alloy::{eips::BlockId, primitives::Address, providers::Provider};

use crate::{abi::PricePair, error::ValuationError, num};

const Q112: f64 = 5192296858534827628530496329220096.0; // 2^112

/// Read adapter over a price-accumulating pair contract.
#[derive(Clone, Debug)]
pub struct Pair<P: Provider> {
    instance: PricePair::PricePairInstance<P>,
}

/// One sample of the pair's accumulators and reserves at a block height.
#[derive(Clone, Copy, Debug)]
pub struct PairObservation {
    pub block: u64,
    pub timestamp: u64,
    pub price0_cumulative: f64,
    pub price1_cumulative: f64,
    pub reserve0: f64,
    pub reserve1: f64,
    /// Timestamp of the pair's last reserve update before this block.
    pub reserve_timestamp: u64,
}

impl<P: Provider> Pair<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self { instance: PricePair::new(address, provider) }
    }

    pub async fn token0(&self) -> Result<Address, ValuationError> {
        Ok(self.instance.token0().call().await?)
    }

    pub async fn token1(&self) -> Result<Address, ValuationError> {
        Ok(self.instance.token1().call().await?)
    }

    /// Samples accumulators and reserves at the given historical block.
    pub async fn observe(&self, block: u64, timestamp: u64) -> Result<PairObservation, ValuationError> {
        let id = BlockId::number(block);
        let price0 = self.instance.price0CumulativeLast().block(id).call().await?;
        let price1 = self.instance.price1CumulativeLast().block(id).call().await?;
        let reserves = self.instance.getReserves().block(id).call().await?;
        Ok(PairObservation {
            block,
            timestamp,
            price0_cumulative: num::to_f64(price0),
            price1_cumulative: num::to_f64(price1),
            reserve0: reserves.reserve0.to::<u128>() as f64,
            reserve1: reserves.reserve1.to::<u128>() as f64,
            reserve_timestamp: reserves.blockTimestampLast as u64,
        })
    }
}

impl PairObservation {
    /// Spot price of token0 in token1 at this observation.
    pub fn spot0(&self, decimals0: u8, decimals1: u8) -> f64 {
        self.reserve1 / self.reserve0 / 10f64.powi(decimals1 as i32 - decimals0 as i32)
    }

    /// Spot price of token1 in token0 at this observation.
    pub fn spot1(&self, decimals0: u8, decimals1: u8) -> f64 {
        self.reserve0 / self.reserve1 / 10f64.powi(decimals0 as i32 - decimals1 as i32)
    }

    fn projected0(&self) -> f64 {
        self.price0_cumulative
            + (self.reserve1 / self.reserve0
                * self.timestamp.saturating_sub(self.reserve_timestamp) as f64
                * Q112)
                .trunc()
    }

    fn projected1(&self) -> f64 {
        self.price1_cumulative
            + (self.reserve0 / self.reserve1
                * self.timestamp.saturating_sub(self.reserve_timestamp) as f64
                * Q112)
                .trunc()
    }
}

/// TWAP of token0 quoted in token1 between two observations.
pub fn twap0(first: &PairObservation, last: &PairObservation, decimals0: u8, decimals1: u8) -> f64 {
    (last.projected0() - first.projected0())
        / (last.timestamp - first.timestamp) as f64
        / Q112
        / 10f64.powi(decimals1 as i32 - decimals0 as i32)
}

/// TWAP of token1 quoted in token0 between two observations.
pub fn twap1(first: &PairObservation, last: &PairObservation, decimals0: u8, decimals1: u8) -> f64 {
    (last.projected1() - first.projected1())
        / (last.timestamp - first.timestamp) as f64
        / Q112
        / 10f64.powi(decimals0 as i32 - decimals1 as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(timestamp: u64, cumulative0: f64, cumulative1: f64) -> PairObservation {
        PairObservation {
            block: 0,
            timestamp,
            price0_cumulative: cumulative0,
            price1_cumulative: cumulative1,
            reserve0: 1_000.0,
            reserve1: 2_000.0,
            reserve_timestamp: timestamp,
        }
    }

    #[test]
    fn test_q112_constant() {
        assert_eq!(Q112, 2f64.powi(112));
    }

    #[test]
    fn test_constant_price_twap_equals_spot() {
        // Accumulator growing at a constant 2.0 price over 600 seconds
        let first = observation(1_000, 0.0, 0.0);
        let last = observation(1_600, 2.0 * 600.0 * Q112, 0.5 * 600.0 * Q112);
        assert!((twap0(&first, &last, 0, 0) - 2.0).abs() < 1e-9);
        assert!((twap1(&first, &last, 0, 0) - 0.5).abs() < 1e-9);
        assert_eq!(first.spot0(0, 0), 2.0);
    }

    #[test]
    fn test_stale_reserves_projected_forward() {
        // No trades since reserve_timestamp: the projection fills the gap at
        // the current reserve ratio
        let mut first = observation(1_000, 0.0, 0.0);
        first.reserve_timestamp = 1_000;
        let mut last = observation(1_600, 0.0, 0.0);
        last.price0_cumulative = 2.0 * 300.0 * Q112;
        last.reserve_timestamp = 1_300; // accumulator stale for 300s
        assert!((twap0(&first, &last, 0, 0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_decimal_scaling() {
        let first = observation(1_000, 0.0, 0.0);
        let last = observation(1_600, 2.0 * 600.0 * Q112, 0.0);
        // token1 has 2 more decimals: the quoted price shrinks by 100x
        assert!((twap0(&first, &last, 6, 8) - 0.02).abs() < 1e-12);
    }
}
