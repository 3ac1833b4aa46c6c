//! Static gas price.

use async_trait::async_trait;
use swap_types::{gwei_to_wei, ConfigSchema, Field, FieldType, Schema, U256};

use crate::{GasPriceOracleInterface, PricingError};

/// Gas price oracle that always answers with the same value.
pub struct FixedGasPrice {
	gas_price: U256,
}

impl FixedGasPrice {
	pub fn new(gas_price: U256) -> Self {
		Self { gas_price }
	}
}

/// Configuration schema for FixedGasPrice.
pub struct FixedGasPriceSchema;

impl ConfigSchema for FixedGasPriceSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), swap_types::ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![],
			// Optional fields
			vec![Field::new(
				"gwei",
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
impl GasPriceOracleInterface for FixedGasPrice {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FixedGasPriceSchema)
	}

	async fn gas_price(&self) -> Result<U256, PricingError> {
		Ok(self.gas_price)
	}
}

/// Factory function to create a fixed gas price oracle from configuration.
///
/// Configuration parameters:
/// - `gwei`: gas price in gwei (default: 40)
pub fn create_gas_price_oracle(config: &toml::Value) -> Box<dyn GasPriceOracleInterface> {
	let gwei = config
		.get("gwei")
		.and_then(|v| v.as_integer())
		.unwrap_or(40)
		.max(0) as u64;

	Box::new(FixedGasPrice::new(gwei_to_wei(gwei)))
}
