use booking_service::{config::get_configuration, services::init_metrics, Application};
use dotenvy::dotenv;
use service_core::observability::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "booking-service",
        &settings.observability.log_level,
        settings.observability.otlp_endpoint.as_deref(),
    );

    init_metrics()?;

    let application = Application::build(settings).await?;
    application.run_until_stopped().await?;

    Ok(())
}
