//! File-backed order source.

use async_trait::async_trait;
use std::path::PathBuf;
use swap_types::{AssetData, ConfigSchema, Field, FieldType, Schema, SignedOrder};
use tokio::fs;
use tracing::debug;

use crate::{OrderError, OrderProviderInterface};

/// Order provider reading a JSON array of signed orders from disk.
///
/// The file is re-read on every request so that an external process can
/// refresh it without restarting the quoter.
pub struct FileOrderProvider {
	path: PathBuf,
}

impl FileOrderProvider {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	async fn load(&self) -> Result<Vec<SignedOrder>, OrderError> {
		let contents = match fs::read(&self.path).await {
			Ok(data) => data,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(OrderError::Source(format!(
					"Order file not found: {}",
					self.path.display()
				)))
			}
			Err(e) => return Err(OrderError::Source(e.to_string())),
		};

		// Fee denominations are resolved while deserializing, so an order with
		// an unrecognized fee asset fails the whole file.
		serde_json::from_slice(&contents).map_err(|e| OrderError::InvalidOrder(e.to_string()))
	}
}

/// Configuration schema for FileOrderProvider.
pub struct FileOrderProviderSchema;

impl ConfigSchema for FileOrderProviderSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), swap_types::ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![],
			// Optional fields
			vec![Field::new("path", FieldType::String)],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl OrderProviderInterface for FileOrderProvider {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(FileOrderProviderSchema)
	}

	async fn get_orders(
		&self,
		maker_asset_data: &AssetData,
		taker_asset_data: &AssetData,
	) -> Result<Vec<SignedOrder>, OrderError> {
		let orders = self.load().await?;
		let total = orders.len();

		let matching: Vec<SignedOrder> = orders
			.into_iter()
			.filter(|o| o.order.trades(maker_asset_data, taker_asset_data))
			.collect();

		debug!(total, matching = matching.len(), path = %self.path.display(), "Loaded orders");
		Ok(matching)
	}
}

/// Factory function to create a file order provider from configuration.
///
/// Configuration parameters:
/// - `path`: JSON file of signed orders (default: "./data/orders.json")
pub fn create_order_provider(config: &toml::Value) -> Box<dyn OrderProviderInterface> {
	let path = config
		.get("path")
		.and_then(|v| v.as_str())
		.unwrap_or("./data/orders.json")
		.to_string();

	Box::new(FileOrderProvider::new(PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_utils::*;
	use swap_types::FeeDenomination;

	#[tokio::test]
	async fn test_reads_orders_for_pair() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("orders.json");

		let wanted = order(100, 50, 0, FeeDenomination::NoFee);
		let mut reversed_data = order(10, 5, 0, FeeDenomination::NoFee).order.data().clone();
		std::mem::swap(
			&mut reversed_data.maker_asset_data,
			&mut reversed_data.taker_asset_data,
		);
		let other_pair = swap_types::SignedOrder::new(
			swap_types::Order::try_from(reversed_data).unwrap(),
			Default::default(),
		);
		let json = serde_json::to_vec(&vec![wanted.clone(), other_pair]).unwrap();
		std::fs::write(&path, json).unwrap();

		let provider = FileOrderProvider::new(path);
		let orders = provider
			.get_orders(&maker_asset(), &taker_asset())
			.await
			.unwrap();
		assert_eq!(orders, vec![wanted]);
	}

	#[tokio::test]
	async fn test_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let provider = FileOrderProvider::new(dir.path().join("missing.json"));
		let result = provider.get_orders(&maker_asset(), &taker_asset()).await;
		assert!(matches!(result, Err(OrderError::Source(_))));
	}

	#[tokio::test]
	async fn test_malformed_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("orders.json");
		std::fs::write(&path, b"{not json").unwrap();

		let provider = FileOrderProvider::new(path);
		let result = provider.get_orders(&maker_asset(), &taker_asset()).await;
		assert!(matches!(result, Err(OrderError::InvalidOrder(_))));
	}

	#[test]
	fn test_factory_default_path() {
		let config = toml::Value::Table(toml::Table::new());
		let provider = create_order_provider(&config);
		assert!(provider.config_schema().validate(&config).is_ok());
	}
}
