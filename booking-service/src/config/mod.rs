use serde::Deserialize;
use service_core::config::{configuration_directory, load_configuration};
use service_core::error::AppError;
use validator::Validate;

use crate::models::{FeePolicy, ServiceOffering};
use crate::services::FlowSettings;

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct Settings {
    pub server: ServerSettings,
    #[validate(nested)]
    pub pricing: PricingSettings,
    #[validate(nested)]
    pub payment: PaymentSettings,
    #[serde(default)]
    pub observability: ObservabilitySettings,
    #[serde(default)]
    pub catalog: Vec<ServiceOffering>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct PricingSettings {
    #[validate(range(min = 0.0, max = 100.0, message = "Advance percentage must be within 0-100"))]
    #[serde(default = "default_advance_percentage")]
    pub advance_payment_percentage: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Platform fee must be within 0-100"))]
    #[serde(default = "default_platform_fee_percentage")]
    pub platform_fee_percentage: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Service fee must be within 0-100"))]
    #[serde(default = "default_review_service_fee_percentage")]
    pub review_service_fee_percentage: f64,
}

fn default_advance_percentage() -> f64 {
    30.0
}

fn default_platform_fee_percentage() -> f64 {
    8.5
}

fn default_review_service_fee_percentage() -> f64 {
    10.0
}

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct PaymentSettings {
    #[validate(range(max = 3_600_000, message = "Settle delay must be at most one hour"))]
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "default_country")]
    pub default_country: String,
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_country() -> String {
    "IN".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct ObservabilitySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint, e.g. `http://tempo:4317`. Spans are not
    /// exported when unset.
    pub otlp_endpoint: Option<String>,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info,booking_service=debug".to_string()
}

impl PricingSettings {
    pub fn fee_policy(&self) -> FeePolicy {
        FeePolicy {
            advance_payment_percentage: self.advance_payment_percentage,
            platform_fee_percentage: self.platform_fee_percentage,
        }
    }
}

impl Settings {
    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            policy: self.pricing.fee_policy(),
            settle_delay: chrono::Duration::milliseconds(
                i64::try_from(self.payment.settle_delay_ms).unwrap_or(i64::MAX),
            ),
        }
    }

    pub fn settle_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.payment.settle_delay_ms)
    }
}

/// Read `booking-service/config/base.yaml` with `APP_` environment overrides.
pub fn get_configuration() -> Result<Settings, AppError> {
    let directory = configuration_directory("booking-service")?;
    let settings: Settings = load_configuration(&directory)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(advance: f64) -> Settings {
        Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            pricing: PricingSettings {
                advance_payment_percentage: advance,
                platform_fee_percentage: 8.5,
                review_service_fee_percentage: 10.0,
            },
            payment: PaymentSettings {
                settle_delay_ms: 1500,
                default_country: "IN".to_string(),
            },
            observability: ObservabilitySettings::default(),
            catalog: Vec::new(),
        }
    }

    #[test]
    fn test_percentages_are_validated() {
        assert!(settings(30.0).validate().is_ok());
        assert!(settings(130.0).validate().is_err());
        assert!(settings(-1.0).validate().is_err());
    }

    #[test]
    fn test_settle_delay_is_bounded() {
        let mut config = settings(30.0);
        config.payment.settle_delay_ms = 3_600_000;
        assert!(config.validate().is_ok());

        config.payment.settle_delay_ms = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flow_settings_from_config() {
        let flow = settings(25.0).flow_settings();
        assert_eq!(flow.policy.advance_payment_percentage, 25.0);
        assert_eq!(flow.settle_delay, chrono::Duration::milliseconds(1500));
    }

    #[test]
    fn test_base_yaml_parses() {
        let directory = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        let settings: Settings = load_configuration(&directory).unwrap();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.pricing.platform_fee_percentage, 8.5);
        assert!(!settings.catalog.is_empty());
    }
}
