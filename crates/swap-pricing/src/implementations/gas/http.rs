//! Gas station backed gas price oracle.
//!
//! Queries a gas station endpoint answering with JSON of the shape
//! `{"result": {"fast": 42.5, "standard": 30, ...}}`, where each level is a
//! price in gwei given either as a number or a decimal string.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use swap_types::{ConfigSchema, Field, FieldType, Schema, GWEI, U256};
use tracing::debug;

use super::cached::CachedGasPriceOracle;
use crate::{GasPriceOracleInterface, PricingError};

const LEVELS: &[&str] = &["instant", "fast", "standard", "low"];

/// Gas price oracle fetching a speed level from a gas station over HTTP.
pub struct HttpGasPriceOracle {
	client: reqwest::Client,
	url: String,
	level: String,
}

impl HttpGasPriceOracle {
	pub fn new(url: String, level: String, timeout: Duration) -> Result<Self, PricingError> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| PricingError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

		Ok(Self { client, url, level })
	}

	fn parse_gas_price(&self, body: &Value) -> Result<U256, PricingError> {
		let value = body
			.get("result")
			.and_then(|result| result.get(&self.level))
			.ok_or_else(|| {
				PricingError::InvalidResponse(format!("Missing result.{} in response", self.level))
			})?;

		let gwei = match value {
			Value::Number(n) => n.as_f64(),
			Value::String(s) => s.trim().parse::<f64>().ok(),
			_ => None,
		}
		.filter(|gwei| gwei.is_finite() && *gwei >= 0.0)
		.ok_or_else(|| {
			PricingError::InvalidResponse(format!("Unusable gas price value: {}", value))
		})?;

		Ok(U256::from((gwei * GWEI as f64).round() as u128))
	}
}

/// Configuration schema for HttpGasPriceOracle.
pub struct HttpGasPriceOracleSchema;

impl ConfigSchema for HttpGasPriceOracleSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), swap_types::ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![Field::new("url", FieldType::String).with_validator(|value| {
				let url = value.as_str().unwrap_or_default();
				if url.starts_with("http://") || url.starts_with("https://") {
					Ok(())
				} else {
					Err("URL must start with http:// or https://".to_string())
				}
			})],
			// Optional fields
			vec![
				Field::new("level", FieldType::OneOf(LEVELS)),
				Field::new(
					"timeout_ms",
					FieldType::Integer {
						min: Some(1),
						max: None,
					},
				),
				Field::new(
					"cache_ttl_ms",
					FieldType::Integer {
						min: Some(0),
						max: None,
					},
				),
			],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl GasPriceOracleInterface for HttpGasPriceOracle {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(HttpGasPriceOracleSchema)
	}

	async fn gas_price(&self) -> Result<U256, PricingError> {
		let response = self
			.client
			.get(&self.url)
			.send()
			.await
			.map_err(|e| PricingError::Network(format!("Gas station request failed: {}", e)))?;

		if !response.status().is_success() {
			return Err(PricingError::Network(format!(
				"Gas station returned {}",
				response.status()
			)));
		}

		let body: Value = response
			.json()
			.await
			.map_err(|e| PricingError::InvalidResponse(e.to_string()))?;

		let gas_price = self.parse_gas_price(&body)?;
		debug!(%gas_price, level = %self.level, "Fetched gas price");
		Ok(gas_price)
	}
}

/// Factory function to create an HTTP gas price oracle from configuration.
///
/// Configuration parameters:
/// - `url`: gas station endpoint
/// - `level`: speed level to read (default: "fast")
/// - `timeout_ms`: request timeout (default: 5000)
/// - `cache_ttl_ms`: cache answers for this long; 0 disables (default: 0)
pub fn create_gas_price_oracle(
	config: &toml::Value,
) -> Result<Box<dyn GasPriceOracleInterface>, PricingError> {
	let url = config
		.get("url")
		.and_then(|v| v.as_str())
		.ok_or_else(|| PricingError::Configuration("url is required".to_string()))?
		.to_string();

	let level = config
		.get("level")
		.and_then(|v| v.as_str())
		.unwrap_or("fast")
		.to_string();

	let timeout_ms = config
		.get("timeout_ms")
		.and_then(|v| v.as_integer())
		.unwrap_or(5000)
		.max(1) as u64;

	let cache_ttl_ms = config
		.get("cache_ttl_ms")
		.and_then(|v| v.as_integer())
		.unwrap_or(0)
		.max(0) as u64;

	let oracle = HttpGasPriceOracle::new(url, level, Duration::from_millis(timeout_ms))?;
	if cache_ttl_ms == 0 {
		return Ok(Box::new(oracle));
	}

	Ok(Box::new(CachedGasPriceOracle::new(
		Arc::new(oracle),
		Duration::from_millis(cache_ttl_ms),
	)))
}
