//! Orders liquidity so the cheapest orders are consumed first.

use std::cmp::Ordering;
use swap_types::{math::compare_ratios, FeeDenomination, Order, U256};

/// Returns the `(maker, taker)` amounts of an order after folding in its fee.
///
/// A taker-denominated fee is paid on top of the taker amount; a
/// maker-denominated fee comes out of the maker amount.
pub fn fee_adjusted_amounts(order: &Order) -> (U256, U256) {
	match order.taker_fee_denomination() {
		FeeDenomination::TakerDenominated => (
			order.maker_asset_amount,
			order.taker_asset_amount.saturating_add(order.taker_fee),
		),
		FeeDenomination::MakerDenominated => (
			order.maker_asset_amount.saturating_sub(order.taker_fee),
			order.taker_asset_amount,
		),
		FeeDenomination::NoFee => (order.maker_asset_amount, order.taker_asset_amount),
	}
}

/// Compares two orders by fee-adjusted taker-per-maker rate.
pub fn compare_fee_adjusted_rates(a: &Order, b: &Order) -> Ordering {
	let (a_maker, a_taker) = fee_adjusted_amounts(a);
	let (b_maker, b_taker) = fee_adjusted_amounts(b);
	compare_ratios(a_taker, a_maker, b_taker, b_maker)
}

/// Returns the orders sorted ascending by fee-adjusted rate.
///
/// The sort is stable, so equally priced orders keep their input order.
/// Orders left with no maker amount after fees sort last.
pub fn sort_orders<T: AsRef<Order> + Clone>(orders: &[T]) -> Vec<T> {
	let mut sorted = orders.to_vec();
	sorted.sort_by(|a, b| compare_fee_adjusted_rates(a.as_ref(), b.as_ref()));
	sorted
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::*;

	#[test]
	fn test_cheapest_rate_first() {
		// taker-per-maker rates 2.0 and 1.5
		let rate_2 = order(100, 200, 0, FeeDenomination::NoFee);
		let rate_1_5 = order(100, 150, 0, FeeDenomination::NoFee);
		let input = vec![rate_2.clone(), rate_1_5.clone()];

		let sorted = sort_orders(&input);
		assert_eq!(sorted, vec![rate_1_5, rate_2.clone()]);
		// input untouched
		assert_eq!(input[0], rate_2);
	}

	#[test]
	fn test_fees_are_folded_into_rate() {
		// 100 for 100 with a 50 taker fee is effectively 1.5
		let taker_fee = order(100, 100, 50, FeeDenomination::TakerDenominated);
		// 100 for 100 with a 40 maker fee is effectively 100/60 ~ 1.67
		let maker_fee = order(100, 100, 40, FeeDenomination::MakerDenominated);
		// plain 1.2
		let plain = order(100, 120, 0, FeeDenomination::NoFee);

		let sorted = sort_orders(&[maker_fee.clone(), taker_fee.clone(), plain.clone()]);
		assert_eq!(sorted, vec![plain, taker_fee, maker_fee]);
	}

	#[test]
	fn test_ties_keep_input_order() {
		let first = order(100, 150, 0, FeeDenomination::NoFee);
		let second = order(200, 300, 0, FeeDenomination::NoFee);
		let third = order(10, 15, 0, FeeDenomination::NoFee);

		let sorted = sort_orders(&[first.clone(), second.clone(), third.clone()]);
		assert_eq!(sorted, vec![first, second, third]);
	}

	#[test]
	fn test_zero_maker_after_fees_sorts_last() {
		let drained = order(50, 10, 50, FeeDenomination::MakerDenominated);
		let normal = order(100, 400, 0, FeeDenomination::NoFee);

		let sorted = sort_orders(&[drained.clone(), normal.clone()]);
		assert_eq!(sorted, vec![normal, drained]);
	}
}
