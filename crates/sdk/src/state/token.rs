use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};

use crate::{abi::Erc20, error::ValuationError, num};

/// Read adapter over a fungible token.
#[derive(Clone, Debug)]
pub struct Token<P: Provider> {
    instance: Erc20::Erc20Instance<P>,
}

/// Token identity needed for reporting and unit scaling.
#[derive(Clone, derive_more::Debug)]
#[debug("{symbol} ({address}, {decimals} decimals)")]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn converter(&self) -> num::Converter { num::Converter::new(self.decimals) }
}

impl<P: Provider> Token<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self { instance: Erc20::new(address, provider) }
    }

    pub fn address(&self) -> Address { *self.instance.address() }

    /// Symbol and decimal count, fetched once per run.
    pub async fn info(&self) -> Result<TokenInfo, ValuationError> {
        let symbol = self.instance.symbol().call().await?;
        let decimals = self.instance.decimals().call().await?;
        Ok(TokenInfo { address: self.address(), symbol, decimals })
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256, ValuationError> {
        Ok(self.instance.balanceOf(owner).call().await?)
    }
}
