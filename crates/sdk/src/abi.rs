//! Static contract bindings.
//!
//! The original tooling fetched contract ABIs from the block explorer at
//! runtime and dispatched calls by name. Every call the valuation needs is a
//! plain `view` with a stable signature, so the bindings are compiled in and
//! each contract kind gets an explicit interface instead.

use alloy::sol;

sol! {
    /// Minimal ERC-20 surface; enough for any token the tools touch.
    #[sol(rpc)]
    contract Erc20 {
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
    }
}

sol! {
    /// Balancer V1 weighted pool. The pool contract doubles as the ERC-20
    /// for its own liquidity shares.
    #[sol(rpc)]
    contract WeightedPool {
        function getNumTokens() external view returns (uint256);
        function getFinalTokens() external view returns (address[] memory);
        function getBalance(address token) external view returns (uint256);
        function getNormalizedWeight(address token) external view returns (uint256);
        function getSwapFee() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
    }
}

sol! {
    /// UMA ExpiringMultiParty synthetic-asset manager.
    #[sol(rpc)]
    contract ExpiringMultiParty {
        struct Unsigned { uint256 rawValue; }

        function contractState() external view returns (uint8);
        function priceIdentifier() external view returns (bytes32);
        function collateralCurrency() external view returns (address);
        function cumulativeFeeMultiplier() external view returns (uint256);
        function positions(address sponsor) external view returns (
            Unsigned tokensOutstanding,
            uint256 withdrawalRequestPassTimestamp,
            Unsigned withdrawalRequestAmount,
            Unsigned rawCollateral,
            uint256 transferPositionRequestPassTimestamp
        );
    }
}

sol! {
    /// Uniswap V2 pair exposing the cumulative price accumulators.
    #[sol(rpc)]
    contract PricePair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
        function price0CumulativeLast() external view returns (uint256);
        function price1CumulativeLast() external view returns (uint256);
    }
}

sol! {
    /// Compound money-market token, used for borrow-interest projection.
    #[sol(rpc)]
    contract MoneyMarket {
        function underlying() external view returns (address);
        function accrualBlockNumber() external view returns (uint256);
        function borrowBalanceStored(address account) external view returns (uint256);
        function borrowRatePerBlock() external view returns (uint256);
    }
}

sol! {
    /// Emitted by the UMA factory when a synthetic-asset manager is deployed.
    /// Its presence in a token's creation receipt marks the token as synthetic.
    event CreatedExpiringMultiParty(address indexed expiringMultiPartyAddress, address indexed deployerAddress);
}
