//! Completion sink used by the HTTP service: keeps settled payments so they
//! can be looked up by transaction id.

use dashmap::DashMap;

use crate::models::{FailureReason, PaymentResult};
use crate::services::listener::FlowListener;
use crate::services::metrics::{record_amount, record_payment};

#[derive(Debug, Default)]
pub struct ConfirmationLedger {
    results: DashMap<String, PaymentResult>,
}

impl ConfirmationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, transaction_id: &str) -> Option<PaymentResult> {
        self.results.get(transaction_id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl FlowListener for ConfirmationLedger {
    fn on_complete(&self, result: &PaymentResult) {
        tracing::info!(
            transaction_id = %result.transaction_id,
            service_id = %result.service_id,
            method_id = %result.method_id,
            amount = result.amount,
            currency = %result.currency_code,
            "Booking payment confirmed"
        );
        record_payment("success");
        record_amount(&result.currency_code, result.amount);
        self.results
            .insert(result.transaction_id.clone(), result.clone());
    }

    fn on_cancel(&self) {
        tracing::info!("Booking payment cancelled from summary");
        record_payment("cancelled");
    }

    fn on_failure(&self, reason: &FailureReason) {
        tracing::warn!(reason = ?reason, "Booking payment failed");
        record_payment("failed");
    }

    fn on_exit(&self) {
        tracing::info!("Booking wizard closed before completion");
    }
}
