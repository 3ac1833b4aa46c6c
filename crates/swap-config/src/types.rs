//! Configuration types for the swap quoter.

use serde::{Deserialize, Serialize};
use swap_types::FeeDenomination;

/// Complete quoter configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Quoting behaviour
	pub quoter: QuoterSettings,
	/// Where orders come from
	#[serde(default = "default_orders")]
	pub orders: ImplementationConfig,
	/// How fillable amounts are resolved
	#[serde(default = "default_order_state")]
	pub order_state: ImplementationConfig,
	/// Gas price source
	#[serde(default = "default_gas_price")]
	pub gas_price: ImplementationConfig,
	/// Protocol fee multiplier source
	#[serde(default = "default_protocol_fee")]
	pub protocol_fee: ImplementationConfig,
	/// Fill plan construction
	#[serde(default = "default_sampler")]
	pub sampler: ImplementationConfig,
}

/// Settings applied to every quote.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoterSettings {
	/// Chain the orders are signed for
	pub chain_id: u64,
	/// Orders expiring within this window are ignored
	#[serde(default = "default_expiry_buffer_ms")]
	pub expiry_buffer_ms: u64,
	/// Fee types an order may carry to be considered
	#[serde(default = "default_permitted_order_fee_types")]
	pub permitted_order_fee_types: Vec<FeeDenomination>,
}

/// A pluggable component: which implementation to use and its parameters.
///
/// Every key other than `implementation` is handed to the implementation's
/// factory and validated by its schema.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ImplementationConfig {
	pub implementation: String,
	#[serde(flatten)]
	pub config: toml::Table,
}

impl ImplementationConfig {
	pub fn new(implementation: impl Into<String>) -> Self {
		Self {
			implementation: implementation.into(),
			config: toml::Table::new(),
		}
	}

	pub fn with(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
		self.config.insert(key.to_string(), value.into());
		self
	}

	/// Parameters as a TOML value, as expected by factories and schemas.
	pub fn params(&self) -> toml::Value {
		toml::Value::Table(self.config.clone())
	}
}

fn default_expiry_buffer_ms() -> u64 {
	120_000
}

fn default_permitted_order_fee_types() -> Vec<FeeDenomination> {
	vec![
		FeeDenomination::NoFee,
		FeeDenomination::TakerDenominated,
		FeeDenomination::MakerDenominated,
	]
}

fn default_orders() -> ImplementationConfig {
	ImplementationConfig::new("file")
}

fn default_order_state() -> ImplementationConfig {
	ImplementationConfig::new("assume_fillable")
}

fn default_gas_price() -> ImplementationConfig {
	ImplementationConfig::new("fixed")
}

fn default_protocol_fee() -> ImplementationConfig {
	ImplementationConfig::new("fixed")
}

fn default_sampler() -> ImplementationConfig {
	ImplementationConfig::new("native")
}
