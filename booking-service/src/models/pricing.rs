//! Amount types produced by the fee calculators. All amounts are whole
//! currency units.

use serde::{Deserialize, Serialize};

use crate::error::UnavailableReason;
use crate::models::PaymentMethod;

/// Percentages applied to a booking's base price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeePolicy {
    pub advance_payment_percentage: f64,
    pub platform_fee_percentage: f64,
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            advance_payment_percentage: 30.0,
            platform_fee_percentage: 8.5,
        }
    }
}

/// Advance, fees and totals for a booking payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base_amount: i64,
    pub advance_amount: i64,
    pub platform_fee: i64,
    pub total_advance_payable: i64,
    pub remaining_amount: i64,
    pub method_fee: i64,
    pub grand_total: i64,
}

/// Fee for paying a raw amount with one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodQuote {
    pub method_id: String,
    pub amount: i64,
    pub fee: i64,
    pub total: i64,
}

/// Price shown on the wizard's review step: hourly price times duration
/// plus a service fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEstimate {
    pub unit_price: i64,
    pub duration_hours: u8,
    pub subtotal: i64,
    pub service_fee: i64,
    pub total: i64,
}

/// A catalog method as offered for one amount: either quoted, or greyed out
/// with the reason it cannot be chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodOption {
    pub method: PaymentMethod,
    pub selectable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<MethodQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<UnavailableReason>,
}
