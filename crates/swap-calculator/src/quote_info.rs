//! Best and worst case pricing of a fill plan.
//!
//! Both cases share one walk over the plan. The best case consumes entries in
//! plan order; the worst case consumes them in reverse, assuming the least
//! favourable liquidity fills first. Bridge entries additionally have their
//! sampled amounts scaled down to what the signed order guarantees.
//!
//! Rounding always favours the counterparty: taker amounts round up and maker
//! amounts round down.

use swap_orders::fillable::{adjusted_fillable_maker_amount, adjusted_fillable_taker_amount};
use swap_types::math::{get_partial_amount_ceil, get_partial_amount_floor};
use swap_types::{
	BridgeFill, FeeDenomination, Fill, FillableOrder, LiquiditySource, MarketOperation,
	PlannedOrder, QuoteInfo, SubFill, U256,
};

/// Which bound of the quote to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteCase {
	/// Plan order, sampled bridge amounts.
	Best,
	/// Reverse plan order, bridge amounts scaled to the signed order.
	Worst,
}

impl QuoteCase {
	fn iter<'a, T>(self, items: &'a [T]) -> Box<dyn Iterator<Item = &'a T> + 'a> {
		match self {
			QuoteCase::Best => Box::new(items.iter()),
			QuoteCase::Worst => Box::new(items.iter().rev()),
		}
	}
}

/// Amounts moved by a single plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillAmounts {
	pub fee_taker_asset_amount: U256,
	pub taker_asset_amount: U256,
	pub maker_asset_amount: U256,
}

impl FillAmounts {
	pub fn total_taker_asset_amount(&self) -> U256 {
		self.fee_taker_asset_amount
			.saturating_add(self.taker_asset_amount)
	}

	pub fn is_empty(&self) -> bool {
		self.total_taker_asset_amount().is_zero() && self.maker_asset_amount.is_zero()
	}

	fn add(&mut self, other: &FillAmounts) {
		self.fee_taker_asset_amount = self
			.fee_taker_asset_amount
			.saturating_add(other.fee_taker_asset_amount);
		self.taker_asset_amount = self
			.taker_asset_amount
			.saturating_add(other.taker_asset_amount);
		self.maker_asset_amount = self
			.maker_asset_amount
			.saturating_add(other.maker_asset_amount);
	}

	/// Volume in the asset whose amount is fixed by the operation.
	pub fn volume(&self, operation: MarketOperation) -> U256 {
		match operation {
			MarketOperation::Buy => self.maker_asset_amount,
			MarketOperation::Sell => self.total_taker_asset_amount(),
		}
	}
}

/// Outcome of one walk: the aggregate quote plus what each touched entry
/// contributed, in walk order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteWalk {
	pub info: QuoteInfo,
	pub fills: Vec<(LiquiditySource, FillAmounts)>,
}

/// Computes the quote info of a fill plan for one case.
pub fn calculate_quote_info(
	plan: &[PlannedOrder],
	fill_amount: U256,
	operation: MarketOperation,
	case: QuoteCase,
	protocol_fee_per_fill: U256,
) -> QuoteInfo {
	walk_fill_plan(plan, fill_amount, operation, case, protocol_fee_per_fill).info
}

/// Walks the plan in the direction given by `case`, stopping as soon as the
/// requested amount is covered.
pub fn walk_fill_plan(
	plan: &[PlannedOrder],
	fill_amount: U256,
	operation: MarketOperation,
	case: QuoteCase,
	protocol_fee_per_fill: U256,
) -> QuoteWalk {
	let mut remaining = fill_amount;
	let mut totals = FillAmounts::default();
	let mut fills = Vec::new();
	let mut native_fills = 0u64;

	for entry in case.iter(plan) {
		if remaining.is_zero() {
			break;
		}

		let amounts = match &entry.fill {
			Fill::Native => fill_native(&entry.order, remaining, operation),
			Fill::Bridge(bridge) => fill_bridge(&entry.order, bridge, remaining, operation, case),
		};

		let consumed = amounts.volume(operation);
		remaining = remaining.saturating_sub(consumed);
		totals.add(&amounts);

		if entry.is_native() && !amounts.is_empty() {
			native_fills += 1;
		}
		fills.push((entry.fill.source(), amounts));
	}

	// Worst case charges every native entry of the plan, whether or not the
	// walk above reached it.
	let charged_fills = match case {
		QuoteCase::Best => native_fills,
		QuoteCase::Worst => plan.iter().filter(|entry| entry.is_native()).count() as u64,
	};

	QuoteWalk {
		info: QuoteInfo {
			fee_taker_asset_amount: totals.fee_taker_asset_amount,
			taker_asset_amount: totals.taker_asset_amount,
			total_taker_asset_amount: totals.total_taker_asset_amount(),
			maker_asset_amount: totals.maker_asset_amount,
			protocol_fee_in_wei_amount: protocol_fee_per_fill
				.saturating_mul(U256::from(charged_fills)),
		},
		fills,
	}
}

fn fill_native(order: &FillableOrder, remaining: U256, operation: MarketOperation) -> FillAmounts {
	let adjusted_taker = adjusted_fillable_taker_amount(order);

	let (taker_with_fees, maker) = match operation {
		MarketOperation::Sell => {
			let taker_with_fees = remaining.min(adjusted_taker);
			let maker = get_partial_amount_floor(
				taker_with_fees,
				adjusted_taker,
				order.fillable_maker_asset_amount,
			);
			(taker_with_fees, maker)
		}
		MarketOperation::Buy => {
			let adjusted_maker = adjusted_fillable_maker_amount(order);
			let maker = remaining.min(adjusted_maker);
			let taker_with_fees = get_partial_amount_ceil(maker, adjusted_maker, adjusted_taker);
			(taker_with_fees, maker)
		}
	};

	let (taker, fee) = split_taker_amount(order, taker_with_fees);
	FillAmounts {
		fee_taker_asset_amount: fee,
		taker_asset_amount: taker,
		maker_asset_amount: maker,
	}
}

/// Splits a fee-inclusive taker amount into `(non_fee, fee)` using the
/// order's nominal amounts.
///
/// For a maker-denominated fee the non-fee part is the fee's share of the
/// maker fill applied to the taker amount, rounded up.
pub fn split_taker_amount(order: &FillableOrder, taker_with_fees: U256) -> (U256, U256) {
	let nominal = order.order();
	match nominal.taker_fee_denomination() {
		FeeDenomination::NoFee => (taker_with_fees, U256::ZERO),
		FeeDenomination::TakerDenominated => {
			let adjusted_taker = nominal
				.taker_asset_amount
				.saturating_add(nominal.taker_fee);
			let taker =
				get_partial_amount_ceil(taker_with_fees, adjusted_taker, nominal.taker_asset_amount)
					.min(taker_with_fees);
			(taker, taker_with_fees - taker)
		}
		FeeDenomination::MakerDenominated => {
			if taker_with_fees.is_zero() {
				return (U256::ZERO, U256::ZERO);
			}
			let fee_in_maker = get_partial_amount_floor(
				taker_with_fees,
				nominal.taker_asset_amount,
				nominal.taker_fee,
			);
			let maker_fill = get_partial_amount_floor(
				taker_with_fees,
				nominal.taker_asset_amount,
				nominal.maker_asset_amount,
			);
			if maker_fill.is_zero() {
				return (taker_with_fees, U256::ZERO);
			}
			let taker = get_partial_amount_ceil(fee_in_maker, maker_fill, taker_with_fees)
				.min(taker_with_fees);
			(taker, taker_with_fees - taker)
		}
	}
}

fn fill_bridge(
	order: &FillableOrder,
	bridge: &BridgeFill,
	remaining: U256,
	operation: MarketOperation,
	case: QuoteCase,
) -> FillAmounts {
	let nominal = order.order();
	let mut amounts = FillAmounts::default();

	for sub_fill in case.iter(&bridge.sub_fills) {
		let left = remaining.saturating_sub(amounts.volume(operation));
		if left.is_zero() {
			break;
		}

		let SubFill {
			maker_asset_amount: maker,
			taker_asset_amount: taker,
		} = match case {
			QuoteCase::Best => *sub_fill,
			QuoteCase::Worst => SubFill::new(
				get_partial_amount_floor(
					nominal.maker_asset_amount,
					bridge.total_maker_asset_amount,
					sub_fill.maker_asset_amount,
				),
				get_partial_amount_ceil(
					nominal.taker_asset_amount,
					bridge.total_taker_asset_amount,
					sub_fill.taker_asset_amount,
				),
			),
		};

		let (part_maker, part_taker) = match operation {
			MarketOperation::Sell => {
				if taker.is_zero() {
					continue;
				}
				let part_taker = left.min(taker);
				(get_partial_amount_floor(part_taker, taker, maker), part_taker)
			}
			MarketOperation::Buy => {
				if maker.is_zero() {
					continue;
				}
				let part_maker = left.min(maker);
				(part_maker, get_partial_amount_ceil(part_maker, maker, taker))
			}
		};

		amounts.maker_asset_amount = amounts.maker_asset_amount.saturating_add(part_maker);
		amounts.taker_asset_amount = amounts.taker_asset_amount.saturating_add(part_taker);
	}

	amounts
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::*;

	const PER_FILL: u64 = 1_000;

	fn quote(
		plan: &[PlannedOrder],
		amount: u64,
		operation: MarketOperation,
		case: QuoteCase,
	) -> QuoteInfo {
		calculate_quote_info(plan, U256::from(amount), operation, case, U256::from(PER_FILL))
	}

	#[test]
	fn test_full_native_fill_without_fee() {
		let plan = vec![native(100, 50, 0, FeeDenomination::NoFee)];
		let info = quote(&plan, 50, MarketOperation::Sell, QuoteCase::Best);

		assert_eq!(info.fee_taker_asset_amount, U256::ZERO);
		assert_eq!(info.taker_asset_amount, U256::from(50));
		assert_eq!(info.total_taker_asset_amount, U256::from(50));
		assert_eq!(info.maker_asset_amount, U256::from(100));
		assert_eq!(info.protocol_fee_in_wei_amount, U256::from(PER_FILL));
	}

	#[test]
	fn test_fill_draws_from_cheapest_order_only() {
		// taker-per-maker 1.5 then 2.0
		let cheap = native(100, 150, 0, FeeDenomination::NoFee);
		let expensive = native(100, 200, 0, FeeDenomination::NoFee);
		let plan = vec![cheap, expensive];

		let walk = walk_fill_plan(
			&plan,
			U256::from(90),
			MarketOperation::Sell,
			QuoteCase::Best,
			U256::ZERO,
		);
		assert_eq!(walk.fills.len(), 1);
		assert_eq!(walk.info.total_taker_asset_amount, U256::from(90));
		assert_eq!(walk.info.maker_asset_amount, U256::from(60));
	}

	#[test]
	fn test_taker_fee_split() {
		let plan = vec![native(200, 100, 10, FeeDenomination::TakerDenominated)];
		let info = quote(&plan, 110, MarketOperation::Sell, QuoteCase::Best);

		assert_eq!(info.taker_asset_amount, U256::from(100));
		assert_eq!(info.fee_taker_asset_amount, U256::from(10));
		assert_eq!(info.total_taker_asset_amount, U256::from(110));
		assert_eq!(info.maker_asset_amount, U256::from(200));
	}

	#[test]
	fn test_taker_fee_split_rounds_non_fee_up() {
		let plan = vec![native(200, 100, 10, FeeDenomination::TakerDenominated)];
		// 57 * 100 / 110 = 51.8, so 52 non-fee and 5 fee
		let info = quote(&plan, 57, MarketOperation::Sell, QuoteCase::Best);

		assert_eq!(info.taker_asset_amount, U256::from(52));
		assert_eq!(info.fee_taker_asset_amount, U256::from(5));
		assert_eq!(info.total_taker_asset_amount, U256::from(57));
		// 57 * 200 / 110 = 103.6
		assert_eq!(info.maker_asset_amount, U256::from(103));
	}

	#[test]
	fn test_maker_fee_split() {
		// 100 maker for 50 taker, 10 maker asset withheld as fee
		let plan = vec![native(100, 50, 10, FeeDenomination::MakerDenominated)];
		let info = quote(&plan, 50, MarketOperation::Sell, QuoteCase::Best);

		// fee in maker = 10, maker fill = 100, non-fee = ceil(10 * 50 / 100)
		assert_eq!(info.taker_asset_amount, U256::from(5));
		assert_eq!(info.fee_taker_asset_amount, U256::from(45));
		assert_eq!(info.total_taker_asset_amount, U256::from(50));
		// sells price against the gross fillable maker amount
		assert_eq!(info.maker_asset_amount, U256::from(100));
	}

	#[test]
	fn test_maker_fee_split_rounds_non_fee_up() {
		let order = native(100, 70, 10, FeeDenomination::MakerDenominated).order;
		// fee in maker = floor(7.14) = 7, maker fill = floor(71.4) = 71,
		// non-fee = ceil(7 * 50 / 71) = ceil(4.93)
		assert_eq!(
			split_taker_amount(&order, U256::from(50)),
			(U256::from(5), U256::from(45))
		);
		assert_eq!(
			split_taker_amount(&order, U256::ZERO),
			(U256::ZERO, U256::ZERO)
		);
	}

	#[test]
	fn test_buy_with_maker_fee() {
		// adjusted maker 90 against 70 taker
		let plan = vec![native(100, 70, 10, FeeDenomination::MakerDenominated)];
		let info = quote(&plan, 40, MarketOperation::Buy, QuoteCase::Best);

		assert_eq!(info.maker_asset_amount, U256::from(40));
		// 40 * 70 / 90 = 31.1
		assert_eq!(info.total_taker_asset_amount, U256::from(32));
		// fee in maker = floor(4.57) = 4, maker fill = floor(45.7) = 45,
		// non-fee = ceil(4 * 32 / 45) = ceil(2.84)
		assert_eq!(info.taker_asset_amount, U256::from(3));
		assert_eq!(info.fee_taker_asset_amount, U256::from(29));
	}

	#[test]
	fn test_buy_rounds_taker_up() {
		let plan = vec![native(300, 100, 0, FeeDenomination::NoFee)];
		let info = quote(&plan, 10, MarketOperation::Buy, QuoteCase::Best);

		assert_eq!(info.maker_asset_amount, U256::from(10));
		// 10 * 100 / 300 = 3.33
		assert_eq!(info.total_taker_asset_amount, U256::from(4));
	}

	#[test]
	fn test_buy_with_taker_fee() {
		let plan = vec![native(100, 50, 10, FeeDenomination::TakerDenominated)];
		let info = quote(&plan, 100, MarketOperation::Buy, QuoteCase::Best);

		assert_eq!(info.maker_asset_amount, U256::from(100));
		assert_eq!(info.taker_asset_amount, U256::from(50));
		assert_eq!(info.fee_taker_asset_amount, U256::from(10));
	}

	#[test]
	fn test_worst_case_walks_in_reverse() {
		let plan = vec![
			native(100, 150, 0, FeeDenomination::NoFee),
			native(100, 200, 0, FeeDenomination::NoFee),
		];
		let best = quote(&plan, 100, MarketOperation::Buy, QuoteCase::Best);
		let worst = quote(&plan, 100, MarketOperation::Buy, QuoteCase::Worst);

		assert_eq!(best.total_taker_asset_amount, U256::from(150));
		assert_eq!(worst.total_taker_asset_amount, U256::from(200));
		assert_eq!(best.maker_asset_amount, worst.maker_asset_amount);
	}

	#[test]
	fn test_pessimism_monotonicity() {
		// rate sorted: 1.1, 1.22, 1.36, bridge slices 1.4 and 1.6, then 2.5
		let plan = vec![
			native(100, 110, 0, FeeDenomination::NoFee),
			native(90, 105, 5, FeeDenomination::TakerDenominated),
			native(120, 150, 10, FeeDenomination::MakerDenominated),
			bridge((180, 300), (200, 300), &[(100, 140), (100, 160)]),
			native(100, 250, 0, FeeDenomination::NoFee),
		];

		for operation in [MarketOperation::Sell, MarketOperation::Buy] {
			for amount in [1u64, 7, 50, 99, 100, 101, 250, 333, 500, 590, 600, 1_000, 5_000] {
				let best = quote(&plan, amount, operation, QuoteCase::Best);
				let worst = quote(&plan, amount, operation, QuoteCase::Worst);
				assert!(
					worst.total_taker_asset_amount >= best.total_taker_asset_amount,
					"{operation} {amount}: worst {:?} best {:?}",
					worst,
					best
				);
				assert!(
					worst.maker_asset_amount <= best.maker_asset_amount,
					"{operation} {amount}: worst {:?} best {:?}",
					worst,
					best
				);
				if operation == MarketOperation::Sell {
					// a sell spends the same taker amount either way
					assert_eq!(worst.total_taker_asset_amount, best.total_taker_asset_amount);
				}
			}
		}
	}

	#[test]
	fn test_protocol_fee_counts() {
		let plan: Vec<PlannedOrder> = (0..5)
			.map(|i| native(100, 100 + i * 10, 0, FeeDenomination::NoFee))
			.collect();

		// 150 taker covers the first order and half of the second
		let best = quote(&plan, 150, MarketOperation::Sell, QuoteCase::Best);
		let worst = quote(&plan, 150, MarketOperation::Sell, QuoteCase::Worst);

		assert_eq!(best.protocol_fee_in_wei_amount, U256::from(2 * PER_FILL));
		assert_eq!(worst.protocol_fee_in_wei_amount, U256::from(5 * PER_FILL));
	}

	#[test]
	fn test_bridge_entries_pay_no_protocol_fee() {
		let plan = vec![bridge((100, 100), (100, 100), &[(100, 100)])];
		let best = quote(&plan, 50, MarketOperation::Sell, QuoteCase::Best);
		let worst = quote(&plan, 50, MarketOperation::Sell, QuoteCase::Worst);
		assert_eq!(best.protocol_fee_in_wei_amount, U256::ZERO);
		assert_eq!(worst.protocol_fee_in_wei_amount, U256::ZERO);
	}

	#[test]
	fn test_bridge_slippage_scaling() {
		// signed for 90 maker against a route sampled at 100
		let plan = vec![bridge((90, 100), (100, 100), &[(100, 100)])];
		let best = quote(&plan, 100, MarketOperation::Sell, QuoteCase::Best);
		let worst = quote(&plan, 100, MarketOperation::Sell, QuoteCase::Worst);

		assert_eq!(best.total_taker_asset_amount, U256::from(100));
		assert_eq!(worst.total_taker_asset_amount, U256::from(100));
		assert_eq!(best.maker_asset_amount, U256::from(100));
		assert_eq!(worst.maker_asset_amount, U256::from(90));

		let best = quote(&plan, 40, MarketOperation::Sell, QuoteCase::Best);
		let worst = quote(&plan, 40, MarketOperation::Sell, QuoteCase::Worst);
		assert_eq!(best.maker_asset_amount, U256::from(40));
		assert_eq!(worst.maker_asset_amount, U256::from(36));
	}

	#[test]
	fn test_bridge_sub_fills_walk_in_case_direction() {
		// the second slice is more expensive than the first
		let plan = vec![bridge((100, 150), (100, 150), &[(60, 60), (40, 90)])];
		let best = quote(&plan, 60, MarketOperation::Sell, QuoteCase::Best);
		let worst = quote(&plan, 60, MarketOperation::Sell, QuoteCase::Worst);

		assert_eq!(best.maker_asset_amount, U256::from(60));
		// 60 taker: the whole 90-taker slice is not reached, 60 * 40 / 90 = 26.6
		assert_eq!(worst.maker_asset_amount, U256::from(26));
	}

	#[test]
	fn test_bridge_buy_splits_last_sub_fill() {
		let plan = vec![bridge((100, 200), (100, 200), &[(50, 100), (50, 100)])];
		let info = quote(&plan, 75, MarketOperation::Buy, QuoteCase::Best);
		assert_eq!(info.maker_asset_amount, U256::from(75));
		assert_eq!(info.total_taker_asset_amount, U256::from(150));
	}

	#[test]
	fn test_walk_stops_when_liquidity_runs_out() {
		let plan = vec![native(100, 50, 0, FeeDenomination::NoFee)];
		let info = quote(&plan, 80, MarketOperation::Sell, QuoteCase::Best);
		assert_eq!(info.total_taker_asset_amount, U256::from(50));
		assert_eq!(info.maker_asset_amount, U256::from(100));
	}

	#[test]
	fn test_placeholder_contributes_nothing() {
		let plan = vec![placeholder()];
		let best = quote(&plan, 80, MarketOperation::Sell, QuoteCase::Best);
		let worst = quote(&plan, 80, MarketOperation::Sell, QuoteCase::Worst);
		assert_eq!(best, QuoteInfo::default());
		// still a native entry, so the worst case charges it
		assert_eq!(
			worst,
			QuoteInfo {
				protocol_fee_in_wei_amount: U256::from(PER_FILL),
				..QuoteInfo::default()
			}
		);
	}

	#[test]
	fn test_placeholder_with_bridge_charges_worst_case_fee() {
		let plan = vec![placeholder(), bridge((100, 100), (100, 100), &[(100, 100)])];
		let best = quote(&plan, 50, MarketOperation::Sell, QuoteCase::Best);
		let worst = quote(&plan, 50, MarketOperation::Sell, QuoteCase::Worst);

		assert_eq!(best.maker_asset_amount, U256::from(50));
		assert_eq!(best.protocol_fee_in_wei_amount, U256::ZERO);
		assert_eq!(worst.maker_asset_amount, U256::from(50));
		assert_eq!(worst.protocol_fee_in_wei_amount, U256::from(PER_FILL));
	}

	#[test]
	fn test_large_amounts_do_not_overflow() {
		let plan = vec![native_u256(U256::MAX, U256::MAX - U256::from(1))];
		let info = calculate_quote_info(
			&plan,
			U256::MAX,
			MarketOperation::Sell,
			QuoteCase::Best,
			U256::MAX,
		);
		assert_eq!(info.total_taker_asset_amount, U256::MAX - U256::from(1));
		assert_eq!(info.maker_asset_amount, U256::MAX);
		assert_eq!(info.protocol_fee_in_wei_amount, U256::MAX);
	}
}
