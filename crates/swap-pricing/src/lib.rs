//! Market data collaborators for the swap quoter.
//!
//! This crate defines the interfaces through which the quoter obtains
//! everything it does not compute itself: the current gas price, the
//! exchange's protocol fee multiplier, and the fill plan produced by a
//! liquidity sampler. None of them hold global state; each is injected into
//! the quoter as a trait object.

use async_trait::async_trait;
use std::sync::Arc;
use swap_types::{
	ConfigSchema, FillableOrder, LiquiditySource, MarketOperation, PlannedOrder, SwapQuoterError,
	U256,
};
use thiserror::Error;
use tracing::debug;

/// Re-export implementations
pub mod implementations {
	pub mod gas {
		pub mod cached;
		pub mod fixed;
		pub mod http;
	}
	pub mod protocol_fee {
		pub mod fixed;
	}
	pub mod sampler {
		pub mod native;
	}
}

/// Errors that can occur while fetching market data.
#[derive(Debug, Error)]
pub enum PricingError {
	/// Error that occurs when the remote service cannot be reached.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the remote service answers with unusable data.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
	/// Error that occurs when no fill plan can be produced.
	#[error("Sampling failed: {0}")]
	Sampling(String),
	/// Error that occurs when an implementation is misconfigured.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

impl From<PricingError> for SwapQuoterError {
	fn from(err: PricingError) -> Self {
		match err {
			PricingError::Network(msg) => SwapQuoterError::Network(msg),
			PricingError::InvalidResponse(msg) => SwapQuoterError::Oracle(msg),
			PricingError::Sampling(msg) => SwapQuoterError::Oracle(msg),
			PricingError::Configuration(msg) => SwapQuoterError::Config(msg),
		}
	}
}

/// Trait defining the interface for gas price sources.
#[async_trait]
pub trait GasPriceOracleInterface: Send + Sync {
	/// Returns the configuration schema for this oracle.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Returns the current gas price in wei.
	async fn gas_price(&self) -> Result<U256, PricingError>;
}

/// Trait defining the interface for protocol fee sources.
#[async_trait]
pub trait ProtocolFeeOracleInterface: Send + Sync {
	/// Returns the configuration schema for this oracle.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Returns the exchange's protocol fee multiplier.
	///
	/// The protocol fee of one fill is `gas_price * multiplier` wei.
	async fn protocol_fee_multiplier(&self) -> Result<U256, PricingError>;
}

/// Options forwarded to a liquidity sampler.
#[derive(Debug, Clone, Default)]
pub struct SamplerOpts {
	/// Sources the sampler must not route through.
	pub excluded_sources: Vec<LiquiditySource>,
}

/// Trait defining the interface for liquidity samplers.
///
/// A sampler decides which sources to use and how to split the requested
/// amount across them. The quoter treats the returned plan as trusted.
#[async_trait]
pub trait LiquiditySamplerInterface: Send + Sync {
	/// Returns the configuration schema for this sampler.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Builds an ordered fill plan for `fill_amount` from the sorted orders.
	async fn sample(
		&self,
		orders: &[FillableOrder],
		fill_amount: U256,
		operation: MarketOperation,
		opts: &SamplerOpts,
	) -> Result<Vec<PlannedOrder>, PricingError>;
}

/// Protocol fee charged for a single fill at the given gas price.
pub fn protocol_fee_per_fill(gas_price: U256, protocol_fee_multiplier: U256) -> U256 {
	gas_price.saturating_mul(protocol_fee_multiplier)
}

/// Gas price and protocol fee multiplier resolved for one quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeInputs {
	pub gas_price: U256,
	pub protocol_fee_multiplier: U256,
}

impl FeeInputs {
	pub fn protocol_fee_per_fill(&self) -> U256 {
		protocol_fee_per_fill(self.gas_price, self.protocol_fee_multiplier)
	}
}

/// Service combining the gas price and protocol fee oracles.
pub struct PricingService {
	gas_price_oracle: Arc<dyn GasPriceOracleInterface>,
	protocol_fee_oracle: Arc<dyn ProtocolFeeOracleInterface>,
}

impl PricingService {
	pub fn new(
		gas_price_oracle: Arc<dyn GasPriceOracleInterface>,
		protocol_fee_oracle: Arc<dyn ProtocolFeeOracleInterface>,
	) -> Self {
		Self {
			gas_price_oracle,
			protocol_fee_oracle,
		}
	}

	/// Resolves the fee inputs, querying the gas oracle only when no
	/// override is supplied. Both lookups run concurrently.
	pub async fn fee_inputs(&self, gas_price_override: Option<U256>) -> Result<FeeInputs, PricingError> {
		let gas_price = async {
			match gas_price_override {
				Some(gas_price) => Ok(gas_price),
				None => self.gas_price_oracle.gas_price().await,
			}
		};
		let multiplier = self.protocol_fee_oracle.protocol_fee_multiplier();

		let (gas_price, protocol_fee_multiplier) = tokio::try_join!(gas_price, multiplier)?;
		debug!(%gas_price, %protocol_fee_multiplier, "Resolved fee inputs");

		Ok(FeeInputs {
			gas_price,
			protocol_fee_multiplier,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::implementations::gas::fixed::FixedGasPrice;
	use super::implementations::protocol_fee::fixed::FixedProtocolFee;
	use super::*;
	use swap_types::Schema;

	struct FailingGasOracle;

	#[async_trait]
	impl GasPriceOracleInterface for FailingGasOracle {
		fn config_schema(&self) -> Box<dyn ConfigSchema> {
			Box::new(Schema::default())
		}

		async fn gas_price(&self) -> Result<U256, PricingError> {
			Err(PricingError::Network("unreachable".into()))
		}
	}

	#[tokio::test]
	async fn test_fee_inputs_from_oracles() {
		let service = PricingService::new(
			Arc::new(FixedGasPrice::new(U256::from(10))),
			Arc::new(FixedProtocolFee::new(U256::from(150_000))),
		);
		let inputs = service.fee_inputs(None).await.unwrap();
		assert_eq!(inputs.gas_price, U256::from(10));
		assert_eq!(inputs.protocol_fee_per_fill(), U256::from(1_500_000));
	}

	#[tokio::test]
	async fn test_override_skips_gas_oracle() {
		let service = PricingService::new(
			Arc::new(FailingGasOracle),
			Arc::new(FixedProtocolFee::new(U256::from(2))),
		);
		let inputs = service.fee_inputs(Some(U256::from(7))).await.unwrap();
		assert_eq!(inputs.protocol_fee_per_fill(), U256::from(14));

		let err = service.fee_inputs(None).await.unwrap_err();
		assert!(matches!(err, PricingError::Network(_)));
	}
}
