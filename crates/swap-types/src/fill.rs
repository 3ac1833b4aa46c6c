//! Fill plan types.
//!
//! A fill plan is an ordered list of [`PlannedOrder`]s produced by a
//! liquidity sampler. Each entry is either a native order filled atomically
//! or a bridge route broken into sampled sub-fills.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{FillableOrder, U256};

/// Where a slice of liquidity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquiditySource {
	Native,
	Uniswap,
	UniswapV2,
	Eth2Dai,
	Kyber,
	Curve,
	LiquidityProvider,
	MultiBridge,
}

impl fmt::Display for LiquiditySource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Native => "native",
			Self::Uniswap => "uniswap",
			Self::UniswapV2 => "uniswap_v2",
			Self::Eth2Dai => "eth2dai",
			Self::Kyber => "kyber",
			Self::Curve => "curve",
			Self::LiquidityProvider => "liquidity_provider",
			Self::MultiBridge => "multi_bridge",
		};
		write!(f, "{}", name)
	}
}

/// One sampled slice of a bridge route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubFill {
	pub maker_asset_amount: U256,
	pub taker_asset_amount: U256,
}

impl SubFill {
	pub fn new(maker_asset_amount: U256, taker_asset_amount: U256) -> Self {
		Self {
			maker_asset_amount,
			taker_asset_amount,
		}
	}
}

/// A bridge route decomposed into ordered sub-fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeFill {
	pub source: LiquiditySource,
	/// Total maker amount the route was sampled against.
	pub total_maker_asset_amount: U256,
	/// Total taker amount the route was sampled against.
	pub total_taker_asset_amount: U256,
	pub sub_fills: Vec<SubFill>,
}

/// How an order in a fill plan contributes liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
	/// Filled atomically up to the order's fillable amount.
	Native,
	/// Filled through an AMM route with slippage.
	Bridge(BridgeFill),
}

impl Fill {
	pub fn source(&self) -> LiquiditySource {
		match self {
			Self::Native => LiquiditySource::Native,
			Self::Bridge(bridge) => bridge.source,
		}
	}
}

/// An entry of a fill plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedOrder {
	pub order: FillableOrder,
	pub fill: Fill,
}

impl PlannedOrder {
	pub fn native(order: FillableOrder) -> Self {
		Self {
			order,
			fill: Fill::Native,
		}
	}

	pub fn bridge(order: FillableOrder, fill: BridgeFill) -> Self {
		Self {
			order,
			fill: Fill::Bridge(fill),
		}
	}

	pub fn is_native(&self) -> bool {
		matches!(self.fill, Fill::Native)
	}
}
