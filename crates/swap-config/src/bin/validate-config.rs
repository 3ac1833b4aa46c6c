//! Configuration validation utility
//!
//! Usage: cargo run --bin validate-config config/quoter.toml

use std::env;
use std::process;

use swap_config::{section_config, ConfigLoader, Section};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(env_filter).init();

	let args: Vec<String> = env::args().collect();

	if args.len() != 2 {
		eprintln!("Usage: {} <config-file>", args[0]);
		process::exit(1);
	}

	let config_path = &args[1];

	println!("Validating configuration file: {}", config_path);

	match ConfigLoader::new().with_file(config_path).load().await {
		Ok(config) => {
			println!("✅ Configuration is valid!");
			println!("Chain ID: {}", config.quoter.chain_id);
			println!("Expiry buffer: {} ms", config.quoter.expiry_buffer_ms);
			println!(
				"Permitted fee types: {:?}",
				config
					.quoter
					.permitted_order_fee_types
					.iter()
					.map(|t| t.to_string())
					.collect::<Vec<_>>()
			);
			for section in Section::ALL {
				println!(
					"{}: {}",
					section,
					section_config(&config, section).implementation
				);
			}
		}
		Err(e) => {
			eprintln!("❌ Configuration validation failed:");
			eprintln!("{}", e);
			process::exit(1);
		}
	}
}
