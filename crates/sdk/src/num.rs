//! Conversions between on-chain fixed-point integers and host floats.
//!
//! The valuation math deliberately runs in `f64`: this is an off-chain
//! estimation tool and its outputs are compared against the original
//! float-based computation, so the same floating-point semantics are kept
//! instead of arbitrary-precision decimals.

use alloy::primitives::U256;

/// Decimal count shared by normalized pool weights, the cumulative fee
/// multiplier and most ERC-20 tokens.
pub const DECIMALS: u8 = 18;

/// Converts raw token amounts of a particular asset into whole-token floats.
#[derive(Clone, Copy, Debug)]
pub struct Converter {
    decimals: u8,
}

impl Converter {
    pub fn new(decimals: u8) -> Self { Self { decimals } }

    pub fn decimals(&self) -> u8 { self.decimals }

    /// Raw integer units scaled down to whole tokens.
    pub fn from_units(&self, raw: U256) -> f64 { self.from_raw(to_f64(raw)) }

    /// Same scaling for amounts already carried as floats of raw units.
    pub fn from_raw(&self, raw: f64) -> f64 { raw / 10f64.powi(self.decimals as i32) }
}

/// Lossy conversion of a 256-bit integer to the nearest float.
pub fn to_f64(x: U256) -> f64 {
    x.into_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * 2f64.powi(64) + limb as f64)
}

/// An 18-decimal fixed-point value as a plain float ratio.
pub fn normalized(x: U256) -> f64 { to_f64(x) / 1e18 }

/// Division with the `0/0 == 0` convention used throughout the pool math.
/// A drained pool prices at zero instead of erroring out.
pub fn safe_div(x: f64, y: f64) -> f64 {
    if x == 0.0 && y == 0.0 { 0.0 } else { x / y }
}
