//! Valuation state loaded from the chain.
//!
//! Adapter structs (`Synthetic`, `Pool`, `Token`) wrap the generated contract
//! bindings and produce plain state values; all math on those values is pure
//! and runs without a provider.

mod exit;
mod pool;
mod position;
mod token;

pub use exit::{ExitBreakdown, ExitRequest, evaluate};
pub use pool::{Pool, PoolState, calc_in_given_out, calc_out_given_in};
pub use position::{Position, Synthetic};
pub use token::{Token, TokenInfo};
