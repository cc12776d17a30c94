//! Synthetic-token identification.
//!
//! A weighted pool does not know which of its tokens is the synthetic one.
//! The token's deployment transaction does: a synthetic token is created in
//! the same transaction that emits `CreatedExpiringMultiParty` from the
//! factory, so tracing the creation receipt both classifies the token and
//! yields its manager contract.

use alloy::{primitives::Address, providers::Provider, sol_types::SolEvent};

use crate::{abi::CreatedExpiringMultiParty, error::ValuationError, explorer::Explorer};

/// Returns the synthetic-asset manager that deployed `token`, or `None` when
/// the token cannot be traced back to one.
pub async fn find_synthetic_manager<P: Provider>(
    provider: P,
    explorer: &Explorer,
    token: Address,
) -> Result<Option<Address>, ValuationError> {
    let Some(tx_hash) = explorer.creation_tx(token).await? else {
        return Ok(None);
    };
    let Some(receipt) = provider.get_transaction_receipt(tx_hash).await? else {
        return Ok(None);
    };
    for log in receipt.inner.logs() {
        if log.topic0() == Some(&CreatedExpiringMultiParty::SIGNATURE_HASH) {
            let event = CreatedExpiringMultiParty::decode_log(&log.inner)?;
            return Ok(Some(event.data.expiringMultiPartyAddress));
        }
    }
    Ok(None)
}
