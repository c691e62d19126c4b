use anyhow::Result;
use flightlookup::{FlightLookupConfig, VERSION, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = FlightLookupConfig::load()?;
    let _telemetry = telemetry::init(&config.logging)?;

    tracing::info!("FlightLookup {} starting", VERSION);

    web::run(config).await
}
