//! Borrow-interest projection for money-market debt.
//!
//! Interest accrues per block at the stored rate; projecting the stored
//! balance a few blocks ahead tells a borrower how much a repay transaction
//! landing at that block will actually owe.

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};

use crate::{abi::MoneyMarket, error::ValuationError, num};

/// Read adapter over a money-market (cToken-style) contract.
#[derive(Clone, Debug)]
pub struct Market<P: Provider> {
    instance: MoneyMarket::MoneyMarketInstance<P>,
}

/// Borrow state as stored by the contract at its last accrual.
#[derive(Clone, Copy, derive_more::Debug)]
pub struct BorrowState {
    #[debug("{stored_balance}")]
    pub stored_balance: U256,
    #[debug("{rate_per_block}")]
    pub rate_per_block: U256,
    pub accrual_block: u64,
}

impl<P: Provider> Market<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self { instance: MoneyMarket::new(address, provider) }
    }

    pub async fn underlying(&self) -> Result<Address, ValuationError> {
        Ok(self.instance.underlying().call().await?)
    }

    pub async fn borrow_state(&self, account: Address) -> Result<BorrowState, ValuationError> {
        let accrual_block = self.instance.accrualBlockNumber().call().await?;
        let stored_balance = self.instance.borrowBalanceStored(account).call().await?;
        let rate_per_block = self.instance.borrowRatePerBlock().call().await?;
        Ok(BorrowState {
            stored_balance,
            rate_per_block,
            accrual_block: accrual_block.to::<u64>(),
        })
    }
}

impl BorrowState {
    /// Stored balance pushed forward to `target_block` at the current rate,
    /// using the contract's 1e18-mantissa arithmetic.
    pub fn projected_balance(&self, target_block: u64) -> U256 {
        let elapsed = U256::from(target_block.saturating_sub(self.accrual_block));
        let mantissa = U256::from(10u64).pow(U256::from(num::DECIMALS));
        let interest = self.rate_per_block * elapsed * self.stored_balance / mantissa;
        self.stored_balance + interest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_accrues_linearly() {
        let state = BorrowState {
            stored_balance: U256::from(10u64).pow(U256::from(18u8)), // 1.0
            rate_per_block: U256::from(100_000_000_000_000_000u64),  // 10% per block
            accrual_block: 100,
        };
        // 10 blocks at 10%: balance doubles
        assert_eq!(
            state.projected_balance(110),
            U256::from(2u64) * U256::from(10u64).pow(U256::from(18u8))
        );
    }

    #[test]
    fn test_projection_before_accrual_is_identity() {
        let state = BorrowState {
            stored_balance: U256::from(12_345u64),
            rate_per_block: U256::from(1u64),
            accrual_block: 100,
        };
        assert_eq!(state.projected_balance(100), state.stored_balance);
        assert_eq!(state.projected_balance(50), state.stored_balance);
    }
}
