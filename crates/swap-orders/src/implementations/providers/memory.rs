//! In-memory order source.

use async_trait::async_trait;
use swap_types::{AssetData, ConfigSchema, Schema, SignedOrder};

use crate::{OrderError, OrderProviderInterface};

/// Order provider backed by a fixed list of orders.
///
/// Useful when orders are pushed to the quoter by another component rather
/// than pulled from an order book.
pub struct InMemoryOrderProvider {
	orders: Vec<SignedOrder>,
}

impl InMemoryOrderProvider {
	pub fn new(orders: Vec<SignedOrder>) -> Self {
		Self { orders }
	}
}

#[async_trait]
impl OrderProviderInterface for InMemoryOrderProvider {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(Schema::default())
	}

	async fn get_orders(
		&self,
		maker_asset_data: &AssetData,
		taker_asset_data: &AssetData,
	) -> Result<Vec<SignedOrder>, OrderError> {
		Ok(self
			.orders
			.iter()
			.filter(|o| o.order.trades(maker_asset_data, taker_asset_data))
			.cloned()
			.collect())
	}
}
