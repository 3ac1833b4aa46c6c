//! Sampler that routes the whole amount through native orders.

use async_trait::async_trait;
use swap_orders::fillable::{adjusted_fillable_maker_amount, adjusted_fillable_taker_amount};
use swap_types::{
	ConfigSchema, FillableOrder, LiquiditySource, MarketOperation, PlannedOrder, Schema, U256,
};
use tracing::debug;

use crate::{LiquiditySamplerInterface, PricingError, SamplerOpts};

/// Builds a native-only fill plan from the sorted orders.
///
/// Every usable order becomes a native entry, in the order given. The
/// calculator stops walking once the amount is covered, and the worst case
/// charges a protocol fee for each entry. A thin book surfaces later as
/// insufficient liquidity.
pub struct NativeOnlySampler;

#[async_trait]
impl LiquiditySamplerInterface for NativeOnlySampler {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(Schema::default())
	}

	async fn sample(
		&self,
		orders: &[FillableOrder],
		fill_amount: U256,
		operation: MarketOperation,
		opts: &SamplerOpts,
	) -> Result<Vec<PlannedOrder>, PricingError> {
		if opts.excluded_sources.contains(&LiquiditySource::Native) {
			debug!("Native liquidity excluded, returning empty plan");
			return Ok(Vec::new());
		}

		let available = orders
			.iter()
			.map(|order| match operation {
				MarketOperation::Sell => adjusted_fillable_taker_amount(order),
				MarketOperation::Buy => adjusted_fillable_maker_amount(order),
			})
			.fold(U256::ZERO, |total, amount| total.saturating_add(amount));
		let plan: Vec<PlannedOrder> = orders.iter().cloned().map(PlannedOrder::native).collect();

		debug!(
			%operation,
			planned = plan.len(),
			%available,
			covered = available >= fill_amount,
			"Sampled native fill plan"
		);
		Ok(plan)
	}
}

/// Factory function to create a native-only sampler. It takes no parameters.
pub fn create_sampler(_config: &toml::Value) -> Box<dyn LiquiditySamplerInterface> {
	Box::new(NativeOnlySampler)
}
