//! Order types for the swap quoter.
//!
//! Orders arrive from an external order source in their wire form
//! ([`OrderData`]) and are converted once into an [`Order`], at which point
//! the taker fee denomination is resolved into a closed variant. Nothing
//! downstream re-derives it from asset data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::{Address, AssetData, Bytes, SwapQuoterError, Timestamp, U256};

/// Asset in which an order's taker fee is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeDenomination {
	/// The order carries no taker fee.
	NoFee,
	/// The fee is paid in the taker asset, on top of the taker amount.
	TakerDenominated,
	/// The fee is paid in the maker asset, out of the maker amount.
	MakerDenominated,
}

impl fmt::Display for FeeDenomination {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoFee => write!(f, "no_fee"),
			Self::TakerDenominated => write!(f, "taker_denominated"),
			Self::MakerDenominated => write!(f, "maker_denominated"),
		}
	}
}

impl FromStr for FeeDenomination {
	type Err = SwapQuoterError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"no_fee" => Ok(Self::NoFee),
			"taker_denominated" => Ok(Self::TakerDenominated),
			"maker_denominated" => Ok(Self::MakerDenominated),
			other => Err(SwapQuoterError::InvalidInput(format!(
				"Unknown fee denomination: {}",
				other
			))),
		}
	}
}

/// Wire representation of an order, as produced by an order source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
	pub maker_address: Address,
	/// Counterparty restriction; the zero address means anyone may fill.
	pub taker_address: Address,
	pub fee_recipient_address: Address,
	pub sender_address: Address,
	pub maker_asset_amount: U256,
	pub taker_asset_amount: U256,
	pub taker_fee: U256,
	pub expiration_time_seconds: Timestamp,
	pub salt: U256,
	pub maker_asset_data: AssetData,
	pub taker_asset_data: AssetData,
	pub taker_fee_asset_data: AssetData,
	pub exchange_address: Address,
	pub chain_id: u64,
}

/// An immutable order with its fee denomination resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderData", into = "OrderData")]
pub struct Order {
	data: OrderData,
	taker_fee_denomination: FeeDenomination,
}

impl Order {
	/// Returns the asset the taker fee is paid in.
	pub fn taker_fee_denomination(&self) -> FeeDenomination {
		self.taker_fee_denomination
	}

	/// Returns the wire representation of this order.
	pub fn data(&self) -> &OrderData {
		&self.data
	}

	/// Whether anyone may fill this order.
	pub fn is_open(&self) -> bool {
		self.data.taker_address == Address::ZERO
	}

	/// Whether the order has expired or will expire within `buffer_ms` of `now_ms`.
	///
	/// An order expiring exactly at the buffer boundary counts as expiring.
	pub fn expires_within(&self, buffer_ms: u64, now_ms: u64) -> bool {
		let expiration_ms = self.data.expiration_time_seconds.saturating_mul(1000);
		expiration_ms <= now_ms.saturating_add(buffer_ms)
	}

	/// Whether this order's assets match the given maker/taker pair.
	pub fn trades(&self, maker_asset_data: &AssetData, taker_asset_data: &AssetData) -> bool {
		&self.data.maker_asset_data == maker_asset_data
			&& &self.data.taker_asset_data == taker_asset_data
	}
}

impl Deref for Order {
	type Target = OrderData;

	fn deref(&self) -> &Self::Target {
		&self.data
	}
}

impl TryFrom<OrderData> for Order {
	type Error = SwapQuoterError;

	fn try_from(data: OrderData) -> Result<Self, Self::Error> {
		let taker_fee_denomination = resolve_fee_denomination(&data)?;
		Ok(Self {
			data,
			taker_fee_denomination,
		})
	}
}

impl From<Order> for OrderData {
	fn from(order: Order) -> Self {
		order.data
	}
}

fn resolve_fee_denomination(data: &OrderData) -> Result<FeeDenomination, SwapQuoterError> {
	let fee_asset = &data.taker_fee_asset_data;

	if fee_asset.is_empty() {
		if data.taker_fee.is_zero() {
			return Ok(FeeDenomination::NoFee);
		}
		return Err(SwapQuoterError::InvalidInput(
			"Order has a taker fee but no fee asset".to_string(),
		));
	}

	if fee_asset == &data.taker_asset_data {
		Ok(FeeDenomination::TakerDenominated)
	} else if fee_asset == &data.maker_asset_data {
		Ok(FeeDenomination::MakerDenominated)
	} else if data.taker_fee.is_zero() {
		Ok(FeeDenomination::NoFee)
	} else {
		Err(SwapQuoterError::InvalidInput(format!(
			"Taker fee asset {:?} is neither the maker nor the taker asset",
			fee_asset
		)))
	}
}

/// An order together with its maker signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedOrder {
	#[serde(flatten)]
	pub order: Order,
	pub signature: Bytes,
}

impl SignedOrder {
	pub fn new(order: Order, signature: Bytes) -> Self {
		Self { order, signature }
	}

	/// Zero-amount stand-in used when a pair has no usable native orders.
	///
	/// Addresses and amounts are zeroed so the order contributes nothing when
	/// priced, but it still carries the pair's asset data so bridge routes
	/// can be sampled against it.
	pub fn placeholder(
		maker_asset_data: AssetData,
		taker_asset_data: AssetData,
		chain_id: u64,
	) -> Self {
		let data = OrderData {
			maker_address: Address::ZERO,
			taker_address: Address::ZERO,
			fee_recipient_address: Address::ZERO,
			sender_address: Address::ZERO,
			maker_asset_amount: U256::ZERO,
			taker_asset_amount: U256::ZERO,
			taker_fee: U256::ZERO,
			expiration_time_seconds: 0,
			salt: U256::ZERO,
			maker_asset_data,
			taker_asset_data,
			taker_fee_asset_data: AssetData::new(),
			exchange_address: Address::ZERO,
			chain_id,
		};
		Self {
			order: Order {
				data,
				taker_fee_denomination: FeeDenomination::NoFee,
			},
			signature: Bytes::new(),
		}
	}

	/// Whether this is a zero-amount placeholder.
	pub fn is_placeholder(&self) -> bool {
		self.order.maker_asset_amount.is_zero() && self.order.taker_asset_amount.is_zero()
	}
}

/// A signed order annotated with the amounts still fillable on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillableOrder {
	#[serde(flatten)]
	pub signed_order: SignedOrder,
	pub fillable_maker_asset_amount: U256,
	pub fillable_taker_asset_amount: U256,
	pub fillable_taker_fee_amount: U256,
}

impl FillableOrder {
	/// Creates a fillable order, rejecting fillable amounts above the nominal ones.
	pub fn new(
		signed_order: SignedOrder,
		fillable_maker_asset_amount: U256,
		fillable_taker_asset_amount: U256,
		fillable_taker_fee_amount: U256,
	) -> Result<Self, SwapQuoterError> {
		let order = &signed_order.order;
		if fillable_maker_asset_amount > order.maker_asset_amount
			|| fillable_taker_asset_amount > order.taker_asset_amount
			|| fillable_taker_fee_amount > order.taker_fee
		{
			return Err(SwapQuoterError::OrderState(
				"Fillable amounts exceed the order's nominal amounts".to_string(),
			));
		}

		Ok(Self {
			signed_order,
			fillable_maker_asset_amount,
			fillable_taker_asset_amount,
			fillable_taker_fee_amount,
		})
	}

	/// Treats the whole nominal order as still fillable.
	pub fn fully_fillable(signed_order: SignedOrder) -> Self {
		let order = &signed_order.order;
		let (maker, taker, fee) = (
			order.maker_asset_amount,
			order.taker_asset_amount,
			order.taker_fee,
		);
		Self {
			signed_order,
			fillable_maker_asset_amount: maker,
			fillable_taker_asset_amount: taker,
			fillable_taker_fee_amount: fee,
		}
	}

	pub fn order(&self) -> &Order {
		&self.signed_order.order
	}
}

impl AsRef<Order> for Order {
	fn as_ref(&self) -> &Order {
		self
	}
}

impl AsRef<Order> for SignedOrder {
	fn as_ref(&self) -> &Order {
		&self.order
	}
}

impl AsRef<Order> for FillableOrder {
	fn as_ref(&self) -> &Order {
		&self.signed_order.order
	}
}
