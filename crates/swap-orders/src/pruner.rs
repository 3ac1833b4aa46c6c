//! Filters orders down to the ones that can currently be filled.

use std::collections::HashSet;
use swap_types::{now_millis, FeeDenomination, Order};
use tracing::debug;

/// Keeps the orders that are open, not expiring within `expiry_buffer_ms`,
/// and whose fee type is permitted. Order is preserved.
pub fn prune_orders<T: AsRef<Order> + Clone>(
	orders: &[T],
	permitted_fee_types: &HashSet<FeeDenomination>,
	expiry_buffer_ms: u64,
) -> Vec<T> {
	prune_orders_at(orders, permitted_fee_types, expiry_buffer_ms, now_millis())
}

/// Same as [`prune_orders`] against an explicit clock reading.
pub fn prune_orders_at<T: AsRef<Order> + Clone>(
	orders: &[T],
	permitted_fee_types: &HashSet<FeeDenomination>,
	expiry_buffer_ms: u64,
	now_ms: u64,
) -> Vec<T> {
	let pruned: Vec<T> = orders
		.iter()
		.filter(|order| {
			let order = order.as_ref();
			order.is_open()
				&& !order.expires_within(expiry_buffer_ms, now_ms)
				&& is_fee_type_permitted(order, permitted_fee_types)
		})
		.cloned()
		.collect();

	if pruned.len() != orders.len() {
		debug!(
			kept = pruned.len(),
			dropped = orders.len() - pruned.len(),
			"Pruned unusable orders"
		);
	}

	pruned
}

fn is_fee_type_permitted(order: &Order, permitted: &HashSet<FeeDenomination>) -> bool {
	// A zero fee satisfies "no fees" whatever asset the fee is declared in.
	(permitted.contains(&FeeDenomination::NoFee) && order.taker_fee.is_zero())
		|| permitted.contains(&order.taker_fee_denomination())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::*;
	use swap_types::{Address, SignedOrder};

	const NOW_MS: u64 = 1_700_000_000_000;

	fn permitted(types: &[FeeDenomination]) -> HashSet<FeeDenomination> {
		types.iter().copied().collect()
	}

	#[test]
	fn test_empty_input() {
		let orders: Vec<SignedOrder> = vec![];
		assert!(prune_orders_at(&orders, &permitted(&[]), 0, NOW_MS).is_empty());
	}

	#[test]
	fn test_prunes_orders_for_specific_takers() {
		let open = order(100, 50, 0, FeeDenomination::NoFee);
		let private = with_taker(open.clone(), Address::repeat_byte(0x22));
		let result = prune_orders_at(
			&[private, open.clone()],
			&permitted(&[FeeDenomination::NoFee]),
			0,
			NOW_MS,
		);
		assert_eq!(result, vec![open]);
	}

	#[test]
	fn test_prunes_orders_expiring_within_buffer() {
		let buffer_ms = 60_000;
		let boundary = (NOW_MS + buffer_ms) / 1000;
		let at_boundary = with_expiration(order(100, 50, 0, FeeDenomination::NoFee), boundary);
		let after_boundary =
			with_expiration(order(100, 60, 0, FeeDenomination::NoFee), boundary + 1);
		let expired = with_expiration(order(100, 70, 0, FeeDenomination::NoFee), 1);

		let result = prune_orders_at(
			&[at_boundary, after_boundary.clone(), expired],
			&permitted(&[FeeDenomination::NoFee]),
			buffer_ms,
			NOW_MS,
		);
		assert_eq!(result, vec![after_boundary]);
	}

	#[test]
	fn test_fee_type_filtering() {
		let no_fee = order(100, 50, 0, FeeDenomination::NoFee);
		let taker_fee = order(100, 50, 5, FeeDenomination::TakerDenominated);
		let maker_fee = order(100, 50, 5, FeeDenomination::MakerDenominated);
		// Declared in the taker asset but zero, so it passes "no fees".
		let zero_taker_fee = order(100, 55, 0, FeeDenomination::TakerDenominated);
		let orders = vec![no_fee.clone(), taker_fee.clone(), maker_fee, zero_taker_fee.clone()];

		let result = prune_orders_at(&orders, &permitted(&[FeeDenomination::NoFee]), 0, NOW_MS);
		assert_eq!(result, vec![no_fee.clone(), zero_taker_fee.clone()]);

		let result = prune_orders_at(
			&orders,
			&permitted(&[FeeDenomination::TakerDenominated]),
			0,
			NOW_MS,
		);
		assert_eq!(result, vec![taker_fee, zero_taker_fee]);

		let result = prune_orders_at(&orders, &permitted(&[]), 0, NOW_MS);
		assert!(result.is_empty());
	}

	#[test]
	fn test_pruning_is_idempotent() {
		let orders = vec![
			order(100, 50, 0, FeeDenomination::NoFee),
			with_expiration(order(100, 60, 0, FeeDenomination::NoFee), 10),
			order(100, 50, 5, FeeDenomination::TakerDenominated),
			order(100, 50, 5, FeeDenomination::MakerDenominated),
			with_taker(
				order(100, 40, 0, FeeDenomination::NoFee),
				Address::repeat_byte(0x33),
			),
		];
		let fee_sets = [
			permitted(&[]),
			permitted(&[FeeDenomination::NoFee]),
			permitted(&[FeeDenomination::NoFee, FeeDenomination::MakerDenominated]),
			permitted(&[
				FeeDenomination::NoFee,
				FeeDenomination::TakerDenominated,
				FeeDenomination::MakerDenominated,
			]),
		];

		for fee_types in &fee_sets {
			for buffer_ms in [0, 1_000, 10_000_000] {
				let once = prune_orders_at(&orders, fee_types, buffer_ms, NOW_MS);
				let twice = prune_orders_at(&once, fee_types, buffer_ms, NOW_MS);
				assert_eq!(once, twice);
			}
		}
	}
}
