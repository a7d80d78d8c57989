use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static BOOKING_PAYMENTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static BOOKING_PAYMENT_AMOUNT_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Install the Prometheus recorder and register booking counters. Call once
/// per process.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics handle already initialized"))?;

    let registry = Registry::new();

    let payments_counter = IntCounterVec::new(
        Opts::new(
            "booking_payments_total",
            "Booking payment attempts by final status",
        ),
        &["status"],
    )?;

    // Whole currency units, labelled by ISO currency code
    let amount_counter = IntCounterVec::new(
        Opts::new(
            "booking_payment_amount_total",
            "Total amount collected for bookings by currency",
        ),
        &["currency"],
    )?;

    registry.register(Box::new(payments_counter.clone()))?;
    registry.register(Box::new(amount_counter.clone()))?;

    PROMETHEUS_REGISTRY
        .set(registry)
        .map_err(|_| anyhow::anyhow!("prometheus registry already initialized"))?;
    BOOKING_PAYMENTS_TOTAL
        .set(payments_counter)
        .map_err(|_| anyhow::anyhow!("booking_payments_total already initialized"))?;
    BOOKING_PAYMENT_AMOUNT_TOTAL
        .set(amount_counter)
        .map_err(|_| anyhow::anyhow!("booking_payment_amount_total already initialized"))?;

    Ok(())
}

pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

pub fn record_payment(status: &str) {
    if let Some(counter) = BOOKING_PAYMENTS_TOTAL.get() {
        counter.with_label_values(&[status]).inc();
    }
}

pub fn record_amount(currency: &str, amount: i64) {
    if let Some(counter) = BOOKING_PAYMENT_AMOUNT_TOTAL.get() {
        counter
            .with_label_values(&[currency])
            .inc_by(amount.max(0) as u64);
    }
}
