use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};

use crate::{abi::ExpiringMultiParty, error::ValuationError, num};

/// Read adapter over a synthetic-asset manager contract.
#[derive(Clone, Debug)]
pub struct Synthetic<P: Provider> {
    instance: ExpiringMultiParty::ExpiringMultiPartyInstance<P>,
}

/// Sponsor position with the fee multiplier already applied to collateral.
#[derive(Clone, Copy, derive_more::Debug)]
pub struct Position {
    #[debug("{debt}")]
    debt: U256,
    #[debug("{collateral}")]
    collateral: U256,
}

impl<P: Provider> Synthetic<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self { instance: ExpiringMultiParty::new(address, provider) }
    }

    pub fn address(&self) -> Address { *self.instance.address() }

    /// Fails unless the contract is in its open (pre-expiry, undisputed)
    /// state; settlement math is meaningless otherwise.
    pub async fn ensure_open(&self) -> Result<(), ValuationError> {
        if self.instance.contractState().call().await? != 0 {
            return Err(ValuationError::UnsupportedState(
                "synthetic contract is not open; expired or disputed positions cannot be valued"
                    .into(),
            ));
        }
        Ok(())
    }

    /// The contract's price identifier as a trimmed UTF-8 string.
    pub async fn price_identifier(&self) -> Result<String, ValuationError> {
        let raw = self.instance.priceIdentifier().call().await?;
        let bytes = raw.as_slice();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    pub async fn collateral_currency(&self) -> Result<Address, ValuationError> {
        Ok(self.instance.collateralCurrency().call().await?)
    }

    /// Loads the sponsor's position, fee-adjusted.
    pub async fn position(&self, sponsor: Address) -> Result<Position, ValuationError> {
        let fee_multiplier = self.instance.cumulativeFeeMultiplier().call().await?;
        let position = self.instance.positions(sponsor).call().await?;
        Position::from_chain(
            position.tokensOutstanding.rawValue,
            position.withdrawalRequestPassTimestamp,
            position.rawCollateral.rawValue,
            fee_multiplier,
        )
    }
}

impl Position {
    /// Builds a position from raw contract state.
    ///
    /// Effective collateral is `raw_collateral * fee_multiplier / 10^18` with
    /// truncating integer division, matching the contract's fixed-point
    /// arithmetic exactly.
    pub fn from_chain(
        tokens_outstanding: U256,
        withdrawal_request_pass_timestamp: U256,
        raw_collateral: U256,
        fee_multiplier: U256,
    ) -> Result<Self, ValuationError> {
        if !withdrawal_request_pass_timestamp.is_zero() {
            return Err(ValuationError::UnsupportedState(
                "sponsor has a pending withdrawal request".into(),
            ));
        }
        let scale = U256::from(10u64).pow(U256::from(num::DECIMALS));
        Ok(Self { debt: tokens_outstanding, collateral: raw_collateral * fee_multiplier / scale })
    }

    /// Synthetic tokens owed, raw units.
    pub fn debt(&self) -> U256 { self.debt }

    /// Fee-adjusted collateral, raw units.
    pub fn collateral(&self) -> U256 { self.collateral }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wad(x: u64) -> U256 { U256::from(x) * U256::from(10u64).pow(U256::from(18u8)) }

    #[test]
    fn test_fee_multiplier_applied() {
        // 1.05x multiplier on 1000 raw collateral units
        let multiplier = U256::from(1_050_000_000_000_000_000u64);
        let position =
            Position::from_chain(U256::from(500u64), U256::ZERO, U256::from(1000u64), multiplier)
                .unwrap();
        assert_eq!(position.debt(), U256::from(500u64));
        assert_eq!(position.collateral(), U256::from(1050u64));
    }

    #[test]
    fn test_fee_multiplier_truncates() {
        // 3 * 1.0...01 / 1e18 truncates back down to 3
        let multiplier = wad(1) + U256::from(1u64);
        let position =
            Position::from_chain(U256::ZERO, U256::ZERO, U256::from(3u64), multiplier).unwrap();
        assert_eq!(position.collateral(), U256::from(3u64));
    }

    #[test]
    fn test_pending_withdrawal_rejected() {
        let err = Position::from_chain(
            U256::from(500u64),
            U256::from(1_700_000_000u64),
            U256::from(1000u64),
            wad(1),
        )
        .unwrap_err();
        assert!(matches!(err, ValuationError::UnsupportedState(_)));
    }
}
