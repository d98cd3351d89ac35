//! Serves the Sumsub bridge using configuration from the environment (and `.env`).

// crates.io
use color_eyre::Result;
// self
use sumsub_bridge::{config::BridgeConfig, obs, server};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	obs::init_tracing();

	// Credentials are validated before anything binds, so a misconfigured process never serves.
	let config = BridgeConfig::from_env()?;

	server::serve(config).await?;

	Ok(())
}
