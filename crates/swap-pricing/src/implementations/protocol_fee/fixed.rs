//! Static protocol fee multiplier.

use async_trait::async_trait;
use swap_types::{ConfigSchema, Field, FieldType, Schema, U256};

use crate::{PricingError, ProtocolFeeOracleInterface};

/// Multiplier the exchange has charged since protocol fees were introduced.
pub const DEFAULT_PROTOCOL_FEE_MULTIPLIER: u64 = 150_000;

pub struct FixedProtocolFee {
	multiplier: U256,
}

impl FixedProtocolFee {
	pub fn new(multiplier: U256) -> Self {
		Self { multiplier }
	}
}

impl Default for FixedProtocolFee {
	fn default() -> Self {
		Self::new(U256::from(DEFAULT_PROTOCOL_FEE_MULTIPLIER))
	}
}

/// Configuration schema for FixedProtocolFee.
pub struct FixedProtocolFeeSchema;

impl ConfigSchema for FixedProtocolFeeSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), swap_types::ValidationError> {
		let schema = Schema::new(
			vec![],
			vec![Field::new(
				"multiplier",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			)],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl ProtocolFeeOracleInterface for FixedProtocolFee {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FixedProtocolFeeSchema)
	}

	async fn protocol_fee_multiplier(&self) -> Result<U256, PricingError> {
		Ok(self.multiplier)
	}
}

/// Factory function to create a fixed protocol fee oracle from configuration.
///
/// Configuration parameters:
/// - `multiplier`: protocol fee multiplier (default: 150000)
pub fn create_protocol_fee_oracle(config: &toml::Value) -> Box<dyn ProtocolFeeOracleInterface> {
	let multiplier = config
		.get("multiplier")
		.and_then(|v| v.as_integer())
		.map(|m| m.max(0) as u64)
		.unwrap_or(DEFAULT_PROTOCOL_FEE_MULTIPLIER);

	Box::new(FixedProtocolFee::new(U256::from(multiplier)))
}
