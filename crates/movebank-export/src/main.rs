use anyhow::Result;
use movebank_client::{MovebankClient, MovebankCredentials, ReqwestTransport};
use movebank_domain::{EntityService, ExportPlan, ExportService, OUTPUT_FILE_NAME};
use movebank_export::{init_telemetry, JsonFileWriter, ServiceConfig, TelemetryConfig};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(&TelemetryConfig {
        log_level: config.log_level.clone(),
    }) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!(direct_read_url = %config.direct_read_url, "Starting movebank export");

    if let Err(e) = run(config).await {
        error!(error = %e, "Export failed");
        std::process::exit(1);
    }
}

async fn run(config: ServiceConfig) -> Result<()> {
    let credentials = MovebankCredentials::from_env()?;
    let transport = ReqwestTransport::new(&config.direct_read_url, credentials)?;
    let client = MovebankClient::new(Arc::new(transport));

    let service = ExportService::new(
        EntityService::new(Arc::new(client)),
        Arc::new(JsonFileWriter::new(OUTPUT_FILE_NAME)),
        ExportPlan::default(),
    );
    service.run().await?;

    info!(path = OUTPUT_FILE_NAME, "Data has been saved to {}", OUTPUT_FILE_NAME);
    Ok(())
}
