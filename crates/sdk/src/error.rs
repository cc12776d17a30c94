use thiserror::Error;

/// Errors produced while valuing a position.
///
/// Every variant is terminal for the invocation: the tool either produces a
/// complete, consistent result or none. There is no retry and no degraded
/// mode; a wrong upstream value would invalidate the whole computation.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Pool shape the valuation math does not cover.
    #[error("unsupported pool: {0}")]
    UnsupportedPool(String),

    /// Synthetic-asset contract or sponsor position in a state the engine
    /// does not model.
    #[error("unsupported state: {0}")]
    UnsupportedState(String),

    /// No settlement price could be resolved for the identifier.
    #[error("no spot-price source for '{0}'; pass an explicit --settlement-price")]
    PriceUnavailable(String),

    #[error("RPC transport error: {0}")]
    Transport(#[from] alloy::transports::TransportError),

    #[error("contract call error: {0}")]
    Contract(#[from] alloy::contract::Error),

    #[error("event decode error: {0}")]
    Abi(#[from] alloy::sol_types::Error),

    #[error("explorer/oracle request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Collaborator answered, but not with anything usable.
    #[error("malformed collaborator response: {0}")]
    MalformedResponse(String),

    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
