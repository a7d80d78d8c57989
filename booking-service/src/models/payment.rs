//! Payment attempt lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// Processing was cancelled before it settled.
    Cancelled,
    /// The payment rail refused the charge.
    Declined { message: String },
}

/// Where a single payment attempt currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentState {
    Summary,
    MethodSelection,
    Processing {
        submitted_at: DateTime<Utc>,
        amount: i64,
    },
    Success {
        transaction_id: String,
    },
    Failed {
        reason: FailureReason,
    },
    Cancelled,
}

impl PaymentState {
    pub fn name(&self) -> &'static str {
        match self {
            PaymentState::Summary => "summary",
            PaymentState::MethodSelection => "method_selection",
            PaymentState::Processing { .. } => "processing",
            PaymentState::Success { .. } => "success",
            PaymentState::Failed { .. } => "failed",
            PaymentState::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentState::Success { .. } | PaymentState::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
}

/// Record handed to the booking owner once a payment settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub transaction_id: String,
    pub service_id: String,
    pub method_id: String,
    pub method_name: String,
    pub currency_code: String,
    /// Charged now: advance, platform fee and processing fee.
    pub amount: i64,
    /// Processing fee included in `amount`.
    pub fee: i64,
    /// Everything the customer pays for the booking: `amount` plus the
    /// balance still due.
    pub total_amount: i64,
    pub status: PaymentStatus,
    pub timestamp: DateTime<Utc>,
}
