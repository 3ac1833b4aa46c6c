//! Formatting helpers for log output.

use swap_types::AssetData;

/// Hex-encodes asset data and shortens it for display.
///
/// Asset data longer than 12 hex characters is shown as the first 6 and last
/// 4 characters, e.g. `0xf47261b0...4c7d`.
pub fn truncate_hex(asset_data: &AssetData) -> String {
	let encoded = format!("0x{}", hex::encode(asset_data));
	if encoded.len() <= 12 {
		encoded
	} else {
		format!("{}...{}", &encoded[..10], &encoded[encoded.len() - 4..])
	}
}

/// Parses `0x`-prefixed (or bare) hex into asset data.
pub fn parse_asset_data(value: &str) -> Result<AssetData, hex::FromHexError> {
	let bytes = hex::decode(value.trim_start_matches("0x"))?;
	Ok(AssetData::from(bytes))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_truncate_hex() {
		let long = parse_asset_data(
			"0xf47261b0000000000000000000000000c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
		)
		.unwrap();
		assert_eq!(truncate_hex(&long), "0xf47261b0...6cc2");

		let short = AssetData::from(vec![0x12, 0x34]);
		assert_eq!(truncate_hex(&short), "0x1234");

		// exactly 12 characters
		let exact = AssetData::from(vec![0x12, 0x34, 0x56, 0x78, 0x90]);
		assert_eq!(truncate_hex(&exact), "0x1234567890");
	}

	#[test]
	fn test_parse_asset_data() {
		assert_eq!(
			parse_asset_data("0xabcd").unwrap(),
			AssetData::from(vec![0xab, 0xcd])
		);
		assert_eq!(parse_asset_data("abcd").unwrap(), AssetData::from(vec![0xab, 0xcd]));
		assert!(parse_asset_data("0xzz").is_err());
	}
}
