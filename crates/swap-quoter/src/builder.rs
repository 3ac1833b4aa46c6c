//! Builds a [`SwapQuoter`] from configuration.
//!
//! Every pluggable section names an implementation; the builder looks up a
//! factory registered under that name and hands it the section's parameters.

use std::collections::HashMap;
use std::sync::Arc;
use swap_config::{Config, ImplementationConfig, Section};
use swap_orders::implementations::{providers, resolvers};
use swap_orders::{OrderProviderInterface, OrderService, OrderStateResolverInterface};
use swap_pricing::implementations::{gas, protocol_fee, sampler};
use swap_pricing::{
	GasPriceOracleInterface, LiquiditySamplerInterface, PricingError, PricingService,
	ProtocolFeeOracleInterface,
};
use swap_types::SwapQuoterError;
use tracing::info;

use crate::SwapQuoter;

type OrderProviderFactory = Box<dyn Fn(&toml::Value) -> Box<dyn OrderProviderInterface> + Send>;
type OrderStateFactory = Box<dyn Fn(&toml::Value) -> Box<dyn OrderStateResolverInterface> + Send>;
type GasPriceFactory = Box<
	dyn Fn(&toml::Value) -> Result<Box<dyn GasPriceOracleInterface>, PricingError> + Send,
>;
type ProtocolFeeFactory =
	Box<dyn Fn(&toml::Value) -> Box<dyn ProtocolFeeOracleInterface> + Send>;
type SamplerFactory = Box<dyn Fn(&toml::Value) -> Box<dyn LiquiditySamplerInterface> + Send>;

// Factory pattern for creating services from config
pub struct SwapQuoterBuilder {
	config: Config,
	order_provider_factories: HashMap<String, OrderProviderFactory>,
	order_state_factories: HashMap<String, OrderStateFactory>,
	gas_price_factories: HashMap<String, GasPriceFactory>,
	protocol_fee_factories: HashMap<String, ProtocolFeeFactory>,
	sampler_factories: HashMap<String, SamplerFactory>,
}

impl SwapQuoterBuilder {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			order_provider_factories: HashMap::new(),
			order_state_factories: HashMap::new(),
			gas_price_factories: HashMap::new(),
			protocol_fee_factories: HashMap::new(),
			sampler_factories: HashMap::new(),
		}
	}

	/// Registers every implementation shipped with the workspace.
	pub fn with_default_factories(self) -> Self {
		self.with_order_provider_factory("file", providers::file::create_order_provider)
			.with_order_state_factory("assume_fillable", resolvers::assume_fillable::create_resolver)
			.with_gas_price_factory("fixed", |config| {
				Ok(gas::fixed::create_gas_price_oracle(config))
			})
			.with_gas_price_factory("http", gas::http::create_gas_price_oracle)
			.with_protocol_fee_factory("fixed", protocol_fee::fixed::create_protocol_fee_oracle)
			.with_sampler_factory("native", sampler::native::create_sampler)
	}

	pub fn with_order_provider_factory<F>(mut self, name: &str, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Box<dyn OrderProviderInterface> + Send + 'static,
	{
		self.order_provider_factories
			.insert(name.to_string(), Box::new(factory));
		self
	}

	pub fn with_order_state_factory<F>(mut self, name: &str, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Box<dyn OrderStateResolverInterface> + Send + 'static,
	{
		self.order_state_factories
			.insert(name.to_string(), Box::new(factory));
		self
	}

	pub fn with_gas_price_factory<F>(mut self, name: &str, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<Box<dyn GasPriceOracleInterface>, PricingError>
			+ Send
			+ 'static,
	{
		self.gas_price_factories
			.insert(name.to_string(), Box::new(factory));
		self
	}

	pub fn with_protocol_fee_factory<F>(mut self, name: &str, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Box<dyn ProtocolFeeOracleInterface> + Send + 'static,
	{
		self.protocol_fee_factories
			.insert(name.to_string(), Box::new(factory));
		self
	}

	pub fn with_sampler_factory<F>(mut self, name: &str, factory: F) -> Self
	where
		F: Fn(&toml::Value) -> Box<dyn LiquiditySamplerInterface> + Send + 'static,
	{
		self.sampler_factories
			.insert(name.to_string(), Box::new(factory));
		self
	}

	pub fn build(self) -> Result<SwapQuoter, SwapQuoterError> {
		let provider = lookup(&self.order_provider_factories, Section::Orders, &self.config.orders)?(
			&self.config.orders.params(),
		);
		let resolver = lookup(
			&self.order_state_factories,
			Section::OrderState,
			&self.config.order_state,
		)?(&self.config.order_state.params());

		let orders = OrderService::new(
			Arc::from(provider),
			Arc::from(resolver),
			self.config.quoter.permitted_order_fee_types.iter().copied().collect(),
			self.config.quoter.expiry_buffer_ms,
		);

		let gas_price_oracle = lookup(
			&self.gas_price_factories,
			Section::GasPrice,
			&self.config.gas_price,
		)?(&self.config.gas_price.params())?;
		let protocol_fee_oracle = lookup(
			&self.protocol_fee_factories,
			Section::ProtocolFee,
			&self.config.protocol_fee,
		)?(&self.config.protocol_fee.params());
		let pricing = PricingService::new(Arc::from(gas_price_oracle), Arc::from(protocol_fee_oracle));

		let sampler = lookup(&self.sampler_factories, Section::Sampler, &self.config.sampler)?(
			&self.config.sampler.params(),
		);

		info!(
			chain_id = self.config.quoter.chain_id,
			orders = %self.config.orders.implementation,
			gas_price = %self.config.gas_price.implementation,
			sampler = %self.config.sampler.implementation,
			"Built swap quoter"
		);

		Ok(SwapQuoter::new(
			Arc::new(orders),
			Arc::from(sampler),
			Arc::new(pricing),
			self.config.quoter.chain_id,
		))
	}
}

fn lookup<'a, T>(
	factories: &'a HashMap<String, T>,
	section: Section,
	implementation: &ImplementationConfig,
) -> Result<&'a T, SwapQuoterError> {
	factories.get(&implementation.implementation).ok_or_else(|| {
		SwapQuoterError::Config(format!(
			"No {} factory registered for '{}'",
			section, implementation.implementation
		))
	})
}
