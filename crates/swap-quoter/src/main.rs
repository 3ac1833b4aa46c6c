use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use swap_config::{section_config, ConfigLoader, Section};
use swap_quoter::utils::parse_asset_data;
use swap_quoter::{SwapQuoteRequestOpts, SwapQuoterBuilder};
use swap_types::{LiquiditySource, U256};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "swap-quoter")]
#[command(about = "Swap quote calculator", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(short, long, value_name = "FILE", default_value = "config/quoter.toml")]
	config: PathBuf,

	#[arg(long, env = "SWAP_QUOTER_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Quote a market sell or buy and print it as JSON
	Quote {
		#[arg(value_enum)]
		side: Side,
		/// Maker asset data (hex)
		#[arg(long)]
		maker_asset: String,
		/// Taker asset data (hex)
		#[arg(long)]
		taker_asset: String,
		/// Amount to sell (taker asset) or buy (maker asset), in base units
		#[arg(long)]
		amount: String,
		/// Gas price in wei; the configured oracle is used when omitted
		#[arg(long)]
		gas_price: Option<String>,
		/// Sources to exclude from the fill plan
		#[arg(long, value_delimiter = ',')]
		exclude: Vec<String>,
	},
	/// Validate the configuration file
	Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
	Sell,
	Buy,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level)?;

	match cli.command {
		Commands::Validate => validate_config(&cli.config).await,
		Commands::Quote {
			side,
			ref maker_asset,
			ref taker_asset,
			ref amount,
			ref gas_price,
			ref exclude,
		} => {
			let opts = SwapQuoteRequestOpts {
				gas_price: gas_price.as_deref().map(parse_amount).transpose()?,
				excluded_sources: exclude
					.iter()
					.map(|s| parse_source(s))
					.collect::<Result<_>>()?,
			};
			quote(
				&cli.config,
				side,
				maker_asset,
				taker_asset,
				parse_amount(amount)?,
				opts,
			)
			.await
		}
	}
}

async fn quote(
	config_path: &Path,
	side: Side,
	maker_asset: &str,
	taker_asset: &str,
	amount: U256,
	opts: SwapQuoteRequestOpts,
) -> Result<()> {
	let config = ConfigLoader::new()
		.with_file(config_path)
		.load()
		.await
		.context("Failed to load configuration")?;

	let quoter = SwapQuoterBuilder::new(config)
		.with_default_factories()
		.build()
		.context("Failed to build quoter")?;

	let maker_asset = parse_asset_data(maker_asset).context("Invalid maker asset data")?;
	let taker_asset = parse_asset_data(taker_asset).context("Invalid taker asset data")?;

	let quote = match side {
		Side::Sell => {
			quoter
				.get_market_sell_swap_quote(&maker_asset, &taker_asset, amount, &opts)
				.await
		}
		Side::Buy => {
			quoter
				.get_market_buy_swap_quote(&maker_asset, &taker_asset, amount, &opts)
				.await
		}
	}
	.context("Failed to calculate quote")?;

	println!("{}", serde_json::to_string_pretty(&quote)?);
	Ok(())
}

async fn validate_config(config_path: &Path) -> Result<()> {
	info!("Validating configuration file: {:?}", config_path);

	let config = ConfigLoader::new()
		.with_file(config_path)
		.load()
		.await
		.context("Failed to load configuration")?;

	info!("Configuration is valid");
	info!("Chain ID: {}", config.quoter.chain_id);
	for section in Section::ALL {
		info!(
			"  {}: {}",
			section,
			section_config(&config, section).implementation
		);
	}

	Ok(())
}

fn parse_amount(value: &str) -> Result<U256> {
	U256::from_str_radix(value, 10).with_context(|| format!("Invalid amount '{}'", value))
}

fn parse_source(value: &str) -> Result<LiquiditySource> {
	serde_json::from_value(serde_json::Value::String(value.trim().to_string()))
		.with_context(|| format!("Unknown liquidity source '{}'", value))
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	Ok(())
}
