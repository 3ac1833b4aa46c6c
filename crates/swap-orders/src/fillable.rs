//! Fee-adjusted fillable amounts of partially filled orders.

use swap_types::{FeeDenomination, FillableOrder, U256};

/// Taker asset the taker spends to consume the whole fillable remainder,
/// including a taker-denominated fee.
pub fn adjusted_fillable_taker_amount(order: &FillableOrder) -> U256 {
	match order.order().taker_fee_denomination() {
		FeeDenomination::TakerDenominated => order
			.fillable_taker_asset_amount
			.saturating_add(order.fillable_taker_fee_amount),
		_ => order.fillable_taker_asset_amount,
	}
}

/// Maker asset the taker receives for the whole fillable remainder, net of a
/// maker-denominated fee.
pub fn adjusted_fillable_maker_amount(order: &FillableOrder) -> U256 {
	match order.order().taker_fee_denomination() {
		FeeDenomination::MakerDenominated => order
			.fillable_maker_asset_amount
			.saturating_sub(order.fillable_taker_fee_amount),
		_ => order.fillable_maker_asset_amount,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::*;

	#[test]
	fn test_adjusted_amounts() {
		let no_fee = FillableOrder::fully_fillable(order(100, 50, 0, FeeDenomination::NoFee));
		assert_eq!(adjusted_fillable_taker_amount(&no_fee), U256::from(50));
		assert_eq!(adjusted_fillable_maker_amount(&no_fee), U256::from(100));

		let taker_fee =
			FillableOrder::fully_fillable(order(100, 50, 10, FeeDenomination::TakerDenominated));
		assert_eq!(adjusted_fillable_taker_amount(&taker_fee), U256::from(60));
		assert_eq!(adjusted_fillable_maker_amount(&taker_fee), U256::from(100));

		let maker_fee =
			FillableOrder::fully_fillable(order(100, 50, 10, FeeDenomination::MakerDenominated));
		assert_eq!(adjusted_fillable_taker_amount(&maker_fee), U256::from(50));
		assert_eq!(adjusted_fillable_maker_amount(&maker_fee), U256::from(90));
	}

	#[test]
	fn test_partially_filled_order() {
		let partial = FillableOrder::new(
			order(100, 50, 10, FeeDenomination::TakerDenominated),
			U256::from(40),
			U256::from(20),
			U256::from(4),
		)
		.unwrap();
		assert_eq!(adjusted_fillable_taker_amount(&partial), U256::from(24));
		assert_eq!(adjusted_fillable_maker_amount(&partial), U256::from(40));
	}
}
