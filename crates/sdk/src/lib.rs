//! Valuation toolkit for on-chain synthetic-asset and AMM-pool positions.
//!
//! # Overview
//!
//! Read-only financial metrics over an Ethereum-compatible chain: what a
//! liquidity provider with an open synthetic-asset position would walk away
//! with if they exited a weighted pool today, plus supporting utilities
//! (TWAP from pair accumulators, borrow-interest projection, block/timestamp
//! lookup).
//!
//! Components are layered strictly top to bottom: the [`state::Synthetic`]
//! and [`state::Pool`] adapters load a [`state::Position`] and
//! [`state::PoolState`], the pool is optionally rebalanced to a target price,
//! and [`state::evaluate`] turns the lot into an [`state::ExitBreakdown`].
//! Every entity is recomputed fresh per invocation from live chain reads;
//! nothing persists across runs.
//!
//! External collaborators are pluggable at construction: an RPC provider for
//! contract reads, an Etherscan-compatible [`explorer::Explorer`] for
//! deployment tracing and block-by-time lookup, and a
//! [`oracle::SpotOracle`] for settlement prices.
//!
//! # Limitations/follow-ups
//!
//! * Single-shot and sequential by design: one blocking round trip per chain
//!   read, no batching, no retry. A failed collaborator call fails the run.
//!
//! * All reads happen at whatever block the node considers current; there is
//!   no explicit reorg or staleness handling.

pub mod abi;
pub mod config;
pub mod discovery;
pub mod error;
pub mod explorer;
pub mod lending;
pub mod num;
pub mod oracle;
pub mod state;
pub mod twap;
