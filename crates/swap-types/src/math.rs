//! Fixed-direction rounding helpers mirroring the exchange's on-chain math.
//!
//! All intermediate products are computed in 512 bits so that no
//! combination of 256-bit inputs can overflow. Division by zero yields zero
//! rather than panicking: callers treat a zero denominator as "no liquidity".

use crate::{U256, U512};

/// Calculates `numerator * target / denominator`, rounded down.
pub fn get_partial_amount_floor(numerator: U256, denominator: U256, target: U256) -> U256 {
	if denominator.is_zero() {
		return U256::ZERO;
	}
	let product = U512::from(numerator) * U512::from(target);
	(product / U512::from(denominator)).saturating_to::<U256>()
}

/// Calculates `numerator * target / denominator`, rounded up.
pub fn get_partial_amount_ceil(numerator: U256, denominator: U256, target: U256) -> U256 {
	if denominator.is_zero() {
		return U256::ZERO;
	}
	let product = U512::from(numerator) * U512::from(target);
	let (quotient, remainder) = product.div_rem(U512::from(denominator));
	let quotient = if remainder.is_zero() {
		quotient
	} else {
		quotient + U512::from(1u8)
	};
	quotient.saturating_to::<U256>()
}

/// Compares `a_num / a_den` against `b_num / b_den` by cross-multiplication.
///
/// A zero denominator is treated as an infinite ratio; two infinite ratios
/// compare equal.
pub fn compare_ratios(a_num: U256, a_den: U256, b_num: U256, b_den: U256) -> std::cmp::Ordering {
	use std::cmp::Ordering;

	match (a_den.is_zero(), b_den.is_zero()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => {
			let lhs = U512::from(a_num) * U512::from(b_den);
			let rhs = U512::from(b_num) * U512::from(a_den);
			lhs.cmp(&rhs)
		}
	}
}
