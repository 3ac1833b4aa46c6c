//! Common types used throughout the swap quoter.

// Re-export commonly used ethereum types
pub use alloy_primitives::{Address, Bytes, U256, U512};

/// Opaque encoded asset identifier (token address plus proxy id).
pub type AssetData = Bytes;

/// Timestamp (Unix seconds)
pub type Timestamp = u64;

/// Number of wei in one gwei.
pub const GWEI: u64 = 1_000_000_000;

/// Current wall-clock time in Unix milliseconds.
pub fn now_millis() -> u64 {
	chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Converts a gwei amount into wei.
pub fn gwei_to_wei(gwei: u64) -> U256 {
	U256::from(gwei).saturating_mul(U256::from(GWEI))
}
