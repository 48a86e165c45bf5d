//! One-shot bell refresh: fetch all alert sources and print the feed as JSON.

use premierlux_lib::api::ApiClient;
use premierlux_lib::config;
use premierlux_lib::core_state::DashboardState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    premierlux_lib::init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let client = ApiClient::from_env()?;
    tracing::info!(base_url = %client.config().base_url, "Using inventory backend");
    let state = DashboardState::new(client);

    let report = state.refresh_all().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
