//! Known implementations per configuration section.

use std::fmt;
use swap_orders::implementations::providers::file::FileOrderProviderSchema;
use swap_pricing::implementations::gas::fixed::FixedGasPriceSchema;
use swap_pricing::implementations::gas::http::HttpGasPriceOracleSchema;
use swap_pricing::implementations::protocol_fee::fixed::FixedProtocolFeeSchema;
use swap_types::{ConfigSchema, Schema};

/// A configuration section holding a pluggable implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
	Orders,
	OrderState,
	GasPrice,
	ProtocolFee,
	Sampler,
}

impl Section {
	pub const ALL: [Section; 5] = [
		Section::Orders,
		Section::OrderState,
		Section::GasPrice,
		Section::ProtocolFee,
		Section::Sampler,
	];

	/// Implementation names accepted in this section.
	pub fn implementations(&self) -> &'static [&'static str] {
		match self {
			Section::Orders => &["file"],
			Section::OrderState => &["assume_fillable"],
			Section::GasPrice => &["fixed", "http"],
			Section::ProtocolFee => &["fixed"],
			Section::Sampler => &["native"],
		}
	}
}

impl fmt::Display for Section {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Section::Orders => "orders",
			Section::OrderState => "order_state",
			Section::GasPrice => "gas_price",
			Section::ProtocolFee => "protocol_fee",
			Section::Sampler => "sampler",
		};
		write!(f, "{}", name)
	}
}

/// Returns the schema of `implementation` in `section`, or `None` when the
/// implementation is unknown.
pub fn implementation_schema(
	section: Section,
	implementation: &str,
) -> Option<Box<dyn ConfigSchema>> {
	let schema: Box<dyn ConfigSchema> = match (section, implementation) {
		(Section::Orders, "file") => Box::new(FileOrderProviderSchema),
		(Section::OrderState, "assume_fillable") => Box::new(Schema::default()),
		(Section::GasPrice, "fixed") => Box::new(FixedGasPriceSchema),
		(Section::GasPrice, "http") => Box::new(HttpGasPriceOracleSchema),
		(Section::ProtocolFee, "fixed") => Box::new(FixedProtocolFeeSchema),
		(Section::Sampler, "native") => Box::new(Schema::default()),
		_ => return None,
	};
	Some(schema)
}
