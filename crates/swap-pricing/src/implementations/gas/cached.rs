//! Time-bounded caching of another gas price oracle.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use swap_types::{ConfigSchema, U256};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{GasPriceOracleInterface, PricingError};

/// Wraps an oracle and reuses its answer until `ttl` has elapsed.
///
/// Failed lookups are not cached.
pub struct CachedGasPriceOracle {
	inner: Arc<dyn GasPriceOracleInterface>,
	ttl: Duration,
	cached: RwLock<Option<(Instant, U256)>>,
}

impl CachedGasPriceOracle {
	pub fn new(inner: Arc<dyn GasPriceOracleInterface>, ttl: Duration) -> Self {
		Self {
			inner,
			ttl,
			cached: RwLock::new(None),
		}
	}

	async fn fresh(&self) -> Option<U256> {
		let cached = *self.cached.read().await;
		cached
			.filter(|(fetched_at, _)| fetched_at.elapsed() < self.ttl)
			.map(|(_, gas_price)| gas_price)
	}
}

#[async_trait]
impl GasPriceOracleInterface for CachedGasPriceOracle {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		self.inner.config_schema()
	}

	async fn gas_price(&self) -> Result<U256, PricingError> {
		if let Some(gas_price) = self.fresh().await {
			return Ok(gas_price);
		}

		let gas_price = self.inner.gas_price().await?;
		*self.cached.write().await = Some((Instant::now(), gas_price));
		debug!(%gas_price, ttl_ms = self.ttl.as_millis() as u64, "Cached gas price");
		Ok(gas_price)
	}
}
