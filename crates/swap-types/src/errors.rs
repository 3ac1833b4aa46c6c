//! Error types for the swap quoter.

use thiserror::Error;

use crate::U256;

pub type Result<T> = std::result::Result<T, SwapQuoterError>;

#[derive(Error, Debug)]
pub enum SwapQuoterError {
	/// Rejected before any computation starts; not recoverable by retrying.
	#[error("Invalid input: {0}")]
	InvalidInput(String),

	/// The available liquidity cannot cover the requested amount. Carries the
	/// amount that could be filled so callers can offer a reduced quote.
	#[error("Insufficient liquidity: only {amount_available} available")]
	InsufficientLiquidity { amount_available: U256 },

	#[error("Order state error: {0}")]
	OrderState(String),

	#[error("Oracle error: {0}")]
	Oracle(String),

	#[error("Network error: {0}")]
	Network(String),

	#[error("Configuration error: {0}")]
	Config(String),
}

impl SwapQuoterError {
	/// Returns the fillable amount when this is an insufficient liquidity error.
	pub fn amount_available(&self) -> Option<U256> {
		match self {
			Self::InsufficientLiquidity { amount_available } => Some(*amount_available),
			_ => None,
		}
	}
}
