//! Swap quoting service.
//!
//! [`SwapQuoter`] ties the pieces of the workspace together. For every
//! request it fetches orders for the pair, prunes, resolves and sorts them,
//! asks the liquidity sampler for a fill plan while the gas price and protocol
//! fee multiplier are looked up, prices the plan and finally checks that the
//! plan covers the requested amount.

use futures::future::join_all;
use std::sync::Arc;
use swap_calculator::{BatchQuoteTarget, SwapQuoteCalculator, SwapQuoteRequest};
use swap_orders::OrderService;
use swap_pricing::{LiquiditySamplerInterface, PricingService, SamplerOpts};
use swap_types::{
	AssetData, FillableOrder, LiquiditySource, MarketOperation, PlannedOrder, SignedOrder,
	SwapQuote, SwapQuoterError, U256,
};
use tracing::{debug, info, warn};

pub mod builder;
pub mod utils;

pub use builder::SwapQuoterBuilder;

use utils::truncate_hex;

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct SwapQuoteRequestOpts {
	/// Gas price in wei; the configured oracle is asked when absent.
	pub gas_price: Option<U256>,
	/// Sources the sampler must not route through.
	pub excluded_sources: Vec<LiquiditySource>,
}

impl SwapQuoteRequestOpts {
	fn sampler_opts(&self) -> SamplerOpts {
		SamplerOpts {
			excluded_sources: self.excluded_sources.clone(),
		}
	}
}

/// Produces swap quotes from live order and market data.
pub struct SwapQuoter {
	orders: Arc<OrderService>,
	sampler: Arc<dyn LiquiditySamplerInterface>,
	pricing: Arc<PricingService>,
	chain_id: u64,
}

impl SwapQuoter {
	pub fn new(
		orders: Arc<OrderService>,
		sampler: Arc<dyn LiquiditySamplerInterface>,
		pricing: Arc<PricingService>,
		chain_id: u64,
	) -> Self {
		Self {
			orders,
			sampler,
			pricing,
			chain_id,
		}
	}

	/// Quotes selling exactly `taker_asset_sell_amount` of the taker asset.
	pub async fn get_market_sell_swap_quote(
		&self,
		maker_asset_data: &AssetData,
		taker_asset_data: &AssetData,
		taker_asset_sell_amount: U256,
		opts: &SwapQuoteRequestOpts,
	) -> Result<SwapQuote, SwapQuoterError> {
		self.get_swap_quote(
			maker_asset_data,
			taker_asset_data,
			taker_asset_sell_amount,
			MarketOperation::Sell,
			opts,
		)
		.await
	}

	/// Quotes buying exactly `maker_asset_buy_amount` of the maker asset.
	pub async fn get_market_buy_swap_quote(
		&self,
		maker_asset_data: &AssetData,
		taker_asset_data: &AssetData,
		maker_asset_buy_amount: U256,
		opts: &SwapQuoteRequestOpts,
	) -> Result<SwapQuote, SwapQuoterError> {
		self.get_swap_quote(
			maker_asset_data,
			taker_asset_data,
			maker_asset_buy_amount,
			MarketOperation::Buy,
			opts,
		)
		.await
	}

	/// Quotes buying several maker assets with one taker asset.
	///
	/// Targets are planned concurrently and priced at a single gas price.
	/// Results are positional; a failing target does not affect the others.
	pub async fn get_batch_market_buy_swap_quote(
		&self,
		maker_asset_datas: &[AssetData],
		taker_asset_data: &AssetData,
		maker_asset_buy_amounts: &[U256],
		opts: &SwapQuoteRequestOpts,
	) -> Result<Vec<Result<SwapQuote, SwapQuoterError>>, SwapQuoterError> {
		if maker_asset_datas.len() != maker_asset_buy_amounts.len() {
			return Err(SwapQuoterError::InvalidInput(format!(
				"Got {} maker assets but {} buy amounts",
				maker_asset_datas.len(),
				maker_asset_buy_amounts.len()
			)));
		}

		let sampler_opts = opts.sampler_opts();
		let plans = join_all(maker_asset_datas.iter().zip(maker_asset_buy_amounts).map(
			|(maker_asset_data, amount)| {
				self.fill_plan(
					maker_asset_data,
					taker_asset_data,
					*amount,
					MarketOperation::Buy,
					&sampler_opts,
				)
			},
		));
		let (plans, fee_inputs) = tokio::join!(plans, self.pricing.fee_inputs(opts.gas_price));
		let fee_inputs = fee_inputs?;

		// Price every target that produced a plan, keeping track of where
		// each one goes in the result.
		let mut results: Vec<Option<Result<SwapQuote, SwapQuoterError>>> = Vec::new();
		let mut targets = Vec::new();
		let mut positions = Vec::new();
		for (index, plan) in plans.into_iter().enumerate() {
			match plan {
				Ok(plan) => {
					targets.push(BatchQuoteTarget {
						maker_asset_data: maker_asset_datas[index].clone(),
						asset_fill_amount: maker_asset_buy_amounts[index],
						plan,
					});
					positions.push(index);
					results.push(None);
				}
				Err(e) => results.push(Some(Err(e))),
			}
		}

		let calculator = SwapQuoteCalculator::new(fee_inputs.protocol_fee_multiplier);
		let quotes = calculator.calculate_batch_swap_quotes(
			taker_asset_data,
			MarketOperation::Buy,
			fee_inputs.gas_price,
			&targets,
		);
		for (index, quote) in positions.into_iter().zip(quotes) {
			results[index] = Some(quote.and_then(ensure_fillable));
		}

		let results: Vec<Result<SwapQuote, SwapQuoterError>> =
			results.into_iter().flatten().collect();
		info!(
			targets = results.len(),
			quoted = results.iter().filter(|r| r.is_ok()).count(),
			"Calculated batch buy quotes"
		);
		Ok(results)
	}

	async fn get_swap_quote(
		&self,
		maker_asset_data: &AssetData,
		taker_asset_data: &AssetData,
		asset_fill_amount: U256,
		operation: MarketOperation,
		opts: &SwapQuoteRequestOpts,
	) -> Result<SwapQuote, SwapQuoterError> {
		let sampler_opts = opts.sampler_opts();
		let (plan, fee_inputs) = tokio::try_join!(
			self.fill_plan(
				maker_asset_data,
				taker_asset_data,
				asset_fill_amount,
				operation,
				&sampler_opts
			),
			async {
				self.pricing
					.fee_inputs(opts.gas_price)
					.await
					.map_err(SwapQuoterError::from)
			}
		)?;

		let request = SwapQuoteRequest {
			maker_asset_data: maker_asset_data.clone(),
			taker_asset_data: taker_asset_data.clone(),
			operation,
			asset_fill_amount,
			gas_price: fee_inputs.gas_price,
		};
		let quote = SwapQuoteCalculator::new(fee_inputs.protocol_fee_multiplier)
			.calculate_swap_quote(&request, &plan)?;
		let quote = ensure_fillable(quote)?;

		info!(
			%operation,
			maker_asset = %truncate_hex(maker_asset_data),
			taker_asset = %truncate_hex(taker_asset_data),
			amount = %asset_fill_amount,
			maker_amount = %quote.best_case_quote_info.maker_asset_amount,
			taker_amount = %quote.best_case_quote_info.total_taker_asset_amount,
			"Calculated swap quote"
		);
		Ok(quote)
	}

	/// Builds the fill plan for one pair.
	///
	/// When the pair has no usable orders, a zero-amount placeholder order is
	/// sampled instead so that bridge-only routes can still be found.
	async fn fill_plan(
		&self,
		maker_asset_data: &AssetData,
		taker_asset_data: &AssetData,
		asset_fill_amount: U256,
		operation: MarketOperation,
		opts: &SamplerOpts,
	) -> Result<Vec<PlannedOrder>, SwapQuoterError> {
		if asset_fill_amount.is_zero() {
			return Err(SwapQuoterError::InvalidInput(
				"Fill amount must be greater than zero".to_string(),
			));
		}

		let mut orders = self
			.orders
			.get_usable_orders(maker_asset_data, taker_asset_data)
			.await?;

		if orders.is_empty() {
			debug!(
				maker_asset = %truncate_hex(maker_asset_data),
				taker_asset = %truncate_hex(taker_asset_data),
				"No usable orders, sampling with placeholder"
			);
			orders.push(FillableOrder::fully_fillable(SignedOrder::placeholder(
				maker_asset_data.clone(),
				taker_asset_data.clone(),
				self.chain_id,
			)));
		}

		let plan = self
			.sampler
			.sample(&orders, asset_fill_amount, operation, opts)
			.await?;
		Ok(plan)
	}
}

/// Fails with the achievable amount when the quote falls short of the request.
fn ensure_fillable(quote: SwapQuote) -> Result<SwapQuote, SwapQuoterError> {
	let achieved = quote.achieved_fill_amount();
	if achieved < quote.asset_fill_amount {
		warn!(
			operation = %quote.operation,
			requested = %quote.asset_fill_amount,
			available = %achieved,
			"Insufficient liquidity"
		);
		return Err(SwapQuoterError::InsufficientLiquidity {
			amount_available: achieved,
		});
	}
	Ok(quote)
}
