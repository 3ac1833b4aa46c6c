//! Configuration loading for the swap quoter.
//!
//! Configuration is read from a TOML file. `${VAR}` references are replaced
//! with environment variables before parsing, a few settings can be
//! overridden through `SWAP_QUOTER_*` variables, and every pluggable section
//! is checked against the schema of the implementation it names.

use std::env;
use std::path::Path;
use swap_types::{FeeDenomination, SwapQuoterError};
use thiserror::Error;
use tracing::{debug, info};

pub mod registry;
pub mod types;

pub use registry::{implementation_schema, Section};
pub use types::{Config, ImplementationConfig, QuoterSettings};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

impl From<ConfigError> for SwapQuoterError {
	fn from(err: ConfigError) -> Self {
		SwapQuoterError::Config(err.to_string())
	}
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "SWAP_QUOTER_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<Config, ConfigError> {
		let file_path = self.file_path.as_ref().ok_or_else(|| {
			ConfigError::FileNotFound("No configuration file specified".to_string())
		})?;

		info!("Loading configuration from {}", file_path);
		let content = match tokio::fs::read_to_string(file_path).await {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(ConfigError::FileNotFound(file_path.clone()))
			}
			Err(e) => return Err(e.into()),
		};

		self.load_from_str(&content)
	}

	/// Parses, overrides and validates configuration held in memory.
	pub fn load_from_str(&self, content: &str) -> Result<Config, ConfigError> {
		let substituted = self.substitute_env_vars(content)?;

		let mut config: Config =
			toml::from_str(&substituted).map_err(|e| ConfigError::ParseError(e.to_string()))?;

		self.apply_env_overrides(&mut config)?;
		validate_config(&config)?;

		Ok(config)
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = regex::Regex::new(r"\$\{([^}]+)\}")
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut Config) -> Result<(), ConfigError> {
		if let Ok(buffer) = env::var(format!("{}EXPIRY_BUFFER_MS", self.env_prefix)) {
			debug!("Overriding expiry buffer from environment");
			config.quoter.expiry_buffer_ms = buffer.parse().map_err(|e| {
				ConfigError::ValidationError(format!("Invalid expiry buffer: {}", e))
			})?;
		}

		// A fixed gas price from the environment replaces whatever oracle the
		// file configures.
		if let Ok(gwei) = env::var(format!("{}GAS_PRICE_GWEI", self.env_prefix)) {
			debug!("Overriding gas price from environment");
			let gwei: i64 = gwei
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid gas price: {}", e)))?;
			config.gas_price = ImplementationConfig::new("fixed").with("gwei", gwei);
		}

		Ok(())
	}
}

/// Validates settings and the parameters of every configured implementation.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
	if config.quoter.chain_id == 0 {
		return Err(ConfigError::ValidationError(
			"quoter.chain_id must be greater than zero".to_string(),
		));
	}

	if config.quoter.permitted_order_fee_types.is_empty() {
		return Err(ConfigError::ValidationError(
			"quoter.permitted_order_fee_types must not be empty".to_string(),
		));
	}

	for section in Section::ALL {
		let implementation = section_config(config, section);
		let schema = implementation_schema(section, &implementation.implementation)
			.ok_or_else(|| {
				ConfigError::ValidationError(format!(
					"Unknown {} implementation '{}' (expected one of {:?})",
					section,
					implementation.implementation,
					section.implementations()
				))
			})?;

		schema
			.validate(&implementation.params())
			.map_err(|e| ConfigError::ValidationError(format!("[{}] {}", section, e)))?;
	}

	Ok(())
}

/// Returns the implementation configured for `section`.
pub fn section_config(config: &Config, section: Section) -> &ImplementationConfig {
	match section {
		Section::Orders => &config.orders,
		Section::OrderState => &config.order_state,
		Section::GasPrice => &config.gas_price,
		Section::ProtocolFee => &config.protocol_fee,
		Section::Sampler => &config.sampler,
	}
}

impl Config {
	pub fn permits(&self, fee_type: FeeDenomination) -> bool {
		self.quoter.permitted_order_fee_types.contains(&fee_type)
	}
}
