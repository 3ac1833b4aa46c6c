//! Quote result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{AssetData, LiquiditySource, PlannedOrder, U256};

/// Which side of the trade has a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketOperation {
	/// Buy a fixed maker asset amount.
	Buy,
	/// Sell a fixed taker asset amount.
	Sell,
}

impl fmt::Display for MarketOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Buy => write!(f, "buy"),
			Self::Sell => write!(f, "sell"),
		}
	}
}

/// Aggregate amounts of one pass over a fill plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInfo {
	/// Taker asset spent on fees.
	pub fee_taker_asset_amount: U256,
	/// Taker asset spent on the swap itself.
	pub taker_asset_amount: U256,
	/// `fee_taker_asset_amount + taker_asset_amount`.
	pub total_taker_asset_amount: U256,
	/// Maker asset received.
	pub maker_asset_amount: U256,
	/// Estimated protocol fee, paid in wei of the native currency.
	pub protocol_fee_in_wei_amount: U256,
}

/// Fraction of consumed volume supplied by each liquidity source.
pub type SourcesBreakdown = BTreeMap<LiquiditySource, Decimal>;

/// A priced fill plan with best and worst case bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
	pub maker_asset_data: AssetData,
	pub taker_asset_data: AssetData,
	pub operation: MarketOperation,
	/// Maker amount for buys, taker amount for sells.
	pub asset_fill_amount: U256,
	pub orders: Vec<PlannedOrder>,
	pub best_case_quote_info: QuoteInfo,
	pub worst_case_quote_info: QuoteInfo,
	pub gas_price: U256,
	pub sources_breakdown: SourcesBreakdown,
}

impl SwapQuote {
	/// The amount the best case actually achieves in the fixed asset.
	pub fn achieved_fill_amount(&self) -> U256 {
		match self.operation {
			MarketOperation::Buy => self.best_case_quote_info.maker_asset_amount,
			MarketOperation::Sell => self.best_case_quote_info.total_taker_asset_amount,
		}
	}
}
