//! Swap quote calculation.
//!
//! This crate prices a fill plan produced by a liquidity sampler. Given the
//! requested amount it computes a best case and a pessimistic worst case
//! [`QuoteInfo`], and packages both into a [`SwapQuote`] together with the
//! share of volume each liquidity source supplied.
//!
//! Everything here is pure and synchronous. Gas prices and fill plans are
//! fetched by the caller beforehand.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use swap_types::math::get_partial_amount_floor;
use swap_types::{
	AssetData, Fill, LiquiditySource, MarketOperation, PlannedOrder, SourcesBreakdown,
	SwapQuote, SwapQuoterError, U256,
};
use tracing::debug;

pub mod quote_info;

pub use quote_info::{calculate_quote_info, walk_fill_plan, FillAmounts, QuoteCase, QuoteWalk};

/// Decimal places kept in source breakdown fractions.
const BREAKDOWN_SCALE: u32 = 18;
const BREAKDOWN_ONE: u64 = 1_000_000_000_000_000_000;

/// Parameters of a single quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuoteRequest {
	pub maker_asset_data: AssetData,
	pub taker_asset_data: AssetData,
	pub operation: MarketOperation,
	/// Maker amount for buys, taker amount for sells.
	pub asset_fill_amount: U256,
	pub gas_price: U256,
}

/// One maker asset of a batch request and the plan sampled for it.
#[derive(Debug, Clone)]
pub struct BatchQuoteTarget {
	pub maker_asset_data: AssetData,
	pub asset_fill_amount: U256,
	pub plan: Vec<PlannedOrder>,
}

/// Assembles swap quotes from fill plans.
#[derive(Debug, Clone, Copy)]
pub struct SwapQuoteCalculator {
	protocol_fee_multiplier: U256,
}

impl SwapQuoteCalculator {
	pub fn new(protocol_fee_multiplier: U256) -> Self {
		Self {
			protocol_fee_multiplier,
		}
	}

	/// Protocol fee of one native fill at `gas_price`.
	pub fn protocol_fee_per_fill(&self, gas_price: U256) -> U256 {
		gas_price.saturating_mul(self.protocol_fee_multiplier)
	}

	/// Prices `plan` for the request.
	///
	/// The returned quote may cover less than the requested amount; comparing
	/// [`SwapQuote::achieved_fill_amount`] against the request is up to the
	/// caller.
	pub fn calculate_swap_quote(
		&self,
		request: &SwapQuoteRequest,
		plan: &[PlannedOrder],
	) -> Result<SwapQuote, SwapQuoterError> {
		validate_request(request, plan)?;

		let per_fill = self.protocol_fee_per_fill(request.gas_price);
		let best = walk_fill_plan(
			plan,
			request.asset_fill_amount,
			request.operation,
			QuoteCase::Best,
			per_fill,
		);
		let worst = calculate_quote_info(
			plan,
			request.asset_fill_amount,
			request.operation,
			QuoteCase::Worst,
			per_fill,
		);
		let sources_breakdown = sources_breakdown(&best.fills, request.operation);

		debug!(
			operation = %request.operation,
			fill_amount = %request.asset_fill_amount,
			entries = plan.len(),
			best_maker = %best.info.maker_asset_amount,
			best_taker = %best.info.total_taker_asset_amount,
			worst_maker = %worst.maker_asset_amount,
			worst_taker = %worst.total_taker_asset_amount,
			"Calculated swap quote"
		);

		Ok(SwapQuote {
			maker_asset_data: request.maker_asset_data.clone(),
			taker_asset_data: request.taker_asset_data.clone(),
			operation: request.operation,
			asset_fill_amount: request.asset_fill_amount,
			orders: plan.to_vec(),
			best_case_quote_info: best.info,
			worst_case_quote_info: worst,
			gas_price: request.gas_price,
			sources_breakdown,
		})
	}

	/// Prices several maker assets against one taker asset.
	///
	/// Each target is quoted independently; results are positional, so one
	/// invalid target does not fail the others.
	pub fn calculate_batch_swap_quotes(
		&self,
		taker_asset_data: &AssetData,
		operation: MarketOperation,
		gas_price: U256,
		targets: &[BatchQuoteTarget],
	) -> Vec<Result<SwapQuote, SwapQuoterError>> {
		targets
			.iter()
			.map(|target| {
				let request = SwapQuoteRequest {
					maker_asset_data: target.maker_asset_data.clone(),
					taker_asset_data: taker_asset_data.clone(),
					operation,
					asset_fill_amount: target.asset_fill_amount,
					gas_price,
				};
				self.calculate_swap_quote(&request, &target.plan)
			})
			.collect()
	}
}

/// Rejects requests that cannot be priced.
fn validate_request(
	request: &SwapQuoteRequest,
	plan: &[PlannedOrder],
) -> Result<(), SwapQuoterError> {
	if request.asset_fill_amount.is_zero() {
		return Err(SwapQuoterError::InvalidInput(
			"Fill amount must be greater than zero".to_string(),
		));
	}

	for (index, entry) in plan.iter().enumerate() {
		let order = entry.order.order();
		if order.maker_asset_data != request.maker_asset_data
			|| order.taker_asset_data != request.taker_asset_data
		{
			return Err(SwapQuoterError::InvalidInput(format!(
				"Order {} of the fill plan trades a different asset pair",
				index
			)));
		}

		if let Fill::Bridge(bridge) = &entry.fill {
			if bridge.total_maker_asset_amount.is_zero()
				|| bridge.total_taker_asset_amount.is_zero()
			{
				return Err(SwapQuoterError::InvalidInput(format!(
					"Bridge order {} has no sampled liquidity",
					index
				)));
			}
			// The signed order may only tighten what was sampled.
			if order.taker_asset_amount < bridge.total_taker_asset_amount
				|| order.maker_asset_amount > bridge.total_maker_asset_amount
			{
				return Err(SwapQuoterError::InvalidInput(format!(
					"Bridge order {} is looser than its sampled route",
					index
				)));
			}
		}
	}

	Ok(())
}

/// Computes the fraction of consumed volume supplied by each source.
///
/// Volume is maker asset for buys and taker asset (fees included) for sells.
/// Fractions are truncated to a fixed scale and any rounding dust is given
/// to the largest source, so non-empty breakdowns sum to exactly one.
pub fn sources_breakdown(
	fills: &[(LiquiditySource, FillAmounts)],
	operation: MarketOperation,
) -> SourcesBreakdown {
	let mut volumes: BTreeMap<LiquiditySource, U256> = BTreeMap::new();
	for (source, amounts) in fills {
		let volume = amounts.volume(operation);
		if volume.is_zero() {
			continue;
		}
		let entry = volumes.entry(*source).or_insert(U256::ZERO);
		*entry = entry.saturating_add(volume);
	}

	let total = volumes
		.values()
		.fold(U256::ZERO, |acc, volume| acc.saturating_add(*volume));
	if total.is_zero() {
		return SourcesBreakdown::new();
	}

	let one = U256::from(BREAKDOWN_ONE);
	let mut allocated = U256::ZERO;
	let mut units: BTreeMap<LiquiditySource, U256> = BTreeMap::new();
	for (source, volume) in &volumes {
		let share = get_partial_amount_floor(*volume, total, one);
		allocated += share;
		units.insert(*source, share);
	}

	if let Some((largest, _)) = volumes.iter().max_by_key(|(_, volume)| **volume) {
		if let Some(share) = units.get_mut(largest) {
			*share += one - allocated;
		}
	}

	units
		.into_iter()
		.map(|(source, share)| {
			let units = share.saturating_to::<u128>() as i128;
			let fraction = Decimal::from_i128_with_scale(units, BREAKDOWN_SCALE).normalize();
			(source, fraction)
		})
		.collect()
}
