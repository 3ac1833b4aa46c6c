//! Order state resolver that assumes no prior fills.

use async_trait::async_trait;
use swap_types::{ConfigSchema, FillableOrder, Schema, SignedOrder};

use crate::{OrderError, OrderStateResolverInterface};

/// Treats every order as entirely unfilled.
///
/// Suitable for freshly signed orders or when on-chain state is checked
/// later by the execution layer.
pub struct AssumeFullyFillableResolver;

#[async_trait]
impl OrderStateResolverInterface for AssumeFullyFillableResolver {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(Schema::default())
	}

	async fn get_fillable_orders(
		&self,
		orders: &[SignedOrder],
	) -> Result<Vec<FillableOrder>, OrderError> {
		Ok(orders
			.iter()
			.cloned()
			.map(FillableOrder::fully_fillable)
			.collect())
	}
}

/// Factory function to create the resolver from configuration.
pub fn create_resolver(_config: &toml::Value) -> Box<dyn OrderStateResolverInterface> {
	Box::new(AssumeFullyFillableResolver)
}
