//! Order handling for the swap quoter.
//!
//! This crate turns raw orders from an order source into the sorted set of
//! usable, fillable orders a liquidity sampler consumes. Retrieval and
//! on-chain state resolution are pluggable; pruning and sorting are pure.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use swap_types::{
	AssetData, ConfigSchema, FeeDenomination, FillableOrder, SignedOrder, SwapQuoterError,
};
use thiserror::Error;
use tracing::debug;

pub mod fillable;
pub mod pruner;
pub mod sorter;

/// Re-export implementations
pub mod implementations {
	pub mod providers {
		pub mod file;
		pub mod memory;
	}
	pub mod resolvers {
		pub mod assume_fillable;
	}
}

pub use pruner::{prune_orders, prune_orders_at};
pub use sorter::sort_orders;

/// Errors that can occur while fetching or resolving orders.
#[derive(Debug, Error)]
pub enum OrderError {
	/// The order source could not be reached or returned garbage.
	#[error("Order source error: {0}")]
	Source(String),
	/// Fillable amounts could not be resolved.
	#[error("Order state resolution failed: {0}")]
	StateResolution(String),
	/// An order failed local validation.
	#[error("Invalid order: {0}")]
	InvalidOrder(String),
}

impl From<OrderError> for SwapQuoterError {
	fn from(err: OrderError) -> Self {
		match err {
			OrderError::Source(msg) => SwapQuoterError::Network(msg),
			OrderError::StateResolution(msg) => SwapQuoterError::OrderState(msg),
			OrderError::InvalidOrder(msg) => SwapQuoterError::InvalidInput(msg),
		}
	}
}

/// Trait defining the interface for order sources (order books, relayers).
#[async_trait]
pub trait OrderProviderInterface: Send + Sync {
	/// Returns the configuration schema for this provider.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Returns all known orders trading `maker_asset_data` for `taker_asset_data`.
	async fn get_orders(
		&self,
		maker_asset_data: &AssetData,
		taker_asset_data: &AssetData,
	) -> Result<Vec<SignedOrder>, OrderError>;
}

/// Trait defining the interface for resolving on-chain order state.
#[async_trait]
pub trait OrderStateResolverInterface: Send + Sync {
	/// Returns the configuration schema for this resolver.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Annotates orders with the amounts that remain fillable after prior fills.
	///
	/// The result is positional: one entry per input order.
	async fn get_fillable_orders(
		&self,
		orders: &[SignedOrder],
	) -> Result<Vec<FillableOrder>, OrderError>;
}

/// Service that produces the usable, rate-sorted orders for an asset pair.
pub struct OrderService {
	provider: Arc<dyn OrderProviderInterface>,
	resolver: Arc<dyn OrderStateResolverInterface>,
	permitted_fee_types: HashSet<FeeDenomination>,
	expiry_buffer_ms: u64,
}

impl OrderService {
	pub fn new(
		provider: Arc<dyn OrderProviderInterface>,
		resolver: Arc<dyn OrderStateResolverInterface>,
		permitted_fee_types: HashSet<FeeDenomination>,
		expiry_buffer_ms: u64,
	) -> Self {
		Self {
			provider,
			resolver,
			permitted_fee_types,
			expiry_buffer_ms,
		}
	}

	/// Fetches, prunes, resolves and sorts the orders for a pair.
	///
	/// Orders with nothing left to fill are dropped after resolution.
	pub async fn get_usable_orders(
		&self,
		maker_asset_data: &AssetData,
		taker_asset_data: &AssetData,
	) -> Result<Vec<FillableOrder>, OrderError> {
		let orders = self
			.provider
			.get_orders(maker_asset_data, taker_asset_data)
			.await?;

		let pruned = prune_orders(&orders, &self.permitted_fee_types, self.expiry_buffer_ms);

		let resolved = self.resolver.get_fillable_orders(&pruned).await?;
		if resolved.len() != pruned.len() {
			return Err(OrderError::StateResolution(format!(
				"Resolver returned {} results for {} orders",
				resolved.len(),
				pruned.len()
			)));
		}

		let fillable: Vec<FillableOrder> = resolved
			.into_iter()
			.filter(|order| !order.fillable_taker_asset_amount.is_zero())
			.collect();

		debug!(
			fetched = orders.len(),
			usable = pruned.len(),
			fillable = fillable.len(),
			"Resolved orders for pair"
		);

		Ok(sort_orders(&fillable))
	}
}
