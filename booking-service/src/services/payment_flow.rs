//! Payment state machine for a single booking payment attempt.
//!
//! ```text
//! Summary --proceed--> MethodSelection --submit--> Processing --settle--> Success
//!    |                        ^                        |
//!  cancel                   retry                    abort
//!    v                        |                        v
//! Cancelled                   +-------------------- Failed
//! ```
//!
//! Rejected actions return an error and leave the attempt untouched.

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{BookingError, UnavailableReason};
use crate::models::{
    BookingDraft, CountryConfig, FailureReason, FeePolicy, MethodOption, PaymentDetails,
    PaymentMethod, PaymentResult, PaymentState, PaymentStatus, PricingBreakdown,
    ServiceOffering,
};
use crate::services::clock::Clock;
use crate::services::listener::FlowListener;
use crate::services::pricing::{booking_method_options, compute_breakdown};

/// Pricing and timing applied to every attempt.
#[derive(Debug, Clone, Copy)]
pub struct FlowSettings {
    pub policy: FeePolicy,
    /// How long `Processing` lasts before the attempt settles.
    pub settle_delay: Duration,
}

pub struct PaymentFlow {
    booking: BookingDraft,
    service: ServiceOffering,
    country: CountryConfig,
    methods: Vec<PaymentMethod>,
    settings: FlowSettings,
    state: PaymentState,
    selected: Option<PaymentMethod>,
    details: Option<PaymentDetails>,
    breakdown: PricingBreakdown,
    result: Option<PaymentResult>,
    clock: Arc<dyn Clock>,
    listener: Arc<dyn FlowListener>,
}

impl PaymentFlow {
    /// Open an attempt in `Summary` for a completed draft. `methods` is the
    /// catalog offered in `country`.
    pub fn start(
        booking: BookingDraft,
        service: ServiceOffering,
        country: CountryConfig,
        methods: Vec<PaymentMethod>,
        settings: FlowSettings,
        clock: Arc<dyn Clock>,
        listener: Arc<dyn FlowListener>,
    ) -> Result<Self, BookingError> {
        if let Some(step) = booking.first_incomplete_step() {
            return Err(BookingError::IncompleteDraft { step });
        }
        if booking.service_id.as_deref() != Some(service.id.as_str()) {
            return Err(BookingError::UnknownService(service.id));
        }

        let breakdown = compute_breakdown(service.price, &settings.policy, None)?;

        tracing::info!(
            service_id = %service.id,
            country = country.code,
            base_amount = breakdown.base_amount,
            advance = breakdown.total_advance_payable,
            "Payment attempt opened"
        );

        Ok(Self {
            booking,
            service,
            country,
            methods,
            settings,
            state: PaymentState::Summary,
            selected: None,
            details: None,
            breakdown,
            result: None,
            clock,
            listener,
        })
    }

    pub fn state(&self) -> &PaymentState {
        &self.state
    }

    pub fn breakdown(&self) -> &PricingBreakdown {
        &self.breakdown
    }

    pub fn booking(&self) -> &BookingDraft {
        &self.booking
    }

    pub fn service(&self) -> &ServiceOffering {
        &self.service
    }

    pub fn country(&self) -> &CountryConfig {
        &self.country
    }

    pub fn selected_method(&self) -> Option<&PaymentMethod> {
        self.selected.as_ref()
    }

    pub fn details(&self) -> Option<&PaymentDetails> {
        self.details.as_ref()
    }

    pub fn result(&self) -> Option<&PaymentResult> {
        self.result.as_ref()
    }

    /// Catalog methods with their quotes; unusable ones are marked unselectable.
    pub fn method_options(&self) -> Vec<MethodOption> {
        // The base price was validated in `start`, so only per-method
        // rejections can occur here.
        booking_method_options(self.service.price, &self.settings.policy, &self.methods)
            .unwrap_or_default()
    }

    fn rejected(&self, action: &'static str) -> BookingError {
        tracing::warn!(state = self.state.name(), action, "Payment action rejected");
        BookingError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }

    fn transition(&mut self, next: PaymentState) {
        tracing::info!(
            from = self.state.name(),
            to = next.name(),
            service_id = %self.service.id,
            "Payment state changed"
        );
        self.state = next;
    }

    pub fn proceed_to_payment(&mut self) -> Result<(), BookingError> {
        if self.state != PaymentState::Summary {
            return Err(self.rejected("proceed to payment"));
        }
        self.transition(PaymentState::MethodSelection);
        Ok(())
    }

    /// Leave the flow from the summary. Not available once method selection
    /// has started.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        if self.state != PaymentState::Summary {
            return Err(self.rejected("cancel"));
        }
        self.transition(PaymentState::Cancelled);
        self.listener.on_cancel();
        Ok(())
    }

    /// Choose a method by id and reprice. On error the previous selection,
    /// form and breakdown stay in place.
    pub fn select_method(&mut self, method_id: &str) -> Result<&PricingBreakdown, BookingError> {
        if self.state != PaymentState::MethodSelection {
            return Err(self.rejected("select a payment method"));
        }

        let method = self
            .methods
            .iter()
            .find(|m| m.id == method_id)
            .cloned()
            .ok_or_else(|| BookingError::UnavailableMethod {
                method_id: method_id.to_string(),
                reason: UnavailableReason::NotOffered,
            })?;

        let breakdown = compute_breakdown(self.service.price, &self.settings.policy, Some(&method))
            .inspect_err(|e| tracing::warn!(method_id, error = %e, "Payment method refused"))?;

        tracing::debug!(
            method_id,
            method_fee = breakdown.method_fee,
            grand_total = breakdown.grand_total,
            "Breakdown recomputed"
        );

        self.details = Some(PaymentDetails::blank(method.kind));
        self.selected = Some(method);
        self.breakdown = breakdown;
        Ok(&self.breakdown)
    }

    /// Fill the form for the selected method.
    pub fn enter_details(&mut self, details: PaymentDetails) -> Result<(), BookingError> {
        if self.state != PaymentState::MethodSelection {
            return Err(self.rejected("enter payment details"));
        }
        let method = self.selected.as_ref().ok_or(BookingError::NoMethodSelected)?;
        if details.kind() != method.kind {
            return Err(BookingError::DetailsMismatch {
                expected: method.kind,
                provided: details.kind(),
            });
        }

        self.details = Some(details);
        Ok(())
    }

    /// Submit the payment for the current grand total.
    pub fn submit(&mut self) -> Result<(), BookingError> {
        if self.state != PaymentState::MethodSelection {
            return Err(self.rejected("submit payment"));
        }
        let Some(method) = self.selected.as_ref() else {
            tracing::warn!("Payment submitted without a method");
            return Err(BookingError::NoMethodSelected);
        };

        tracing::info!(
            method_id = %method.id,
            amount = self.breakdown.grand_total,
            currency = self.country.currency_code,
            "Payment submitted"
        );

        self.transition(PaymentState::Processing {
            submitted_at: self.clock.now(),
            amount: self.breakdown.grand_total,
        });
        Ok(())
    }

    /// Settle the attempt if it has been processing for at least the settle
    /// delay. Safe to call in any state.
    pub fn poll(&mut self) -> &PaymentState {
        if let PaymentState::Processing {
            submitted_at,
            amount,
        } = self.state
        {
            let due = submitted_at.checked_add_signed(self.settings.settle_delay);
            if due.is_some_and(|due| self.clock.now() >= due) {
                self.complete(amount);
            }
        }
        &self.state
    }

    fn complete(&mut self, amount: i64) {
        let Some(method) = self.selected.as_ref() else {
            return;
        };

        let transaction_id = format!("TXN{}", Uuid::new_v4().simple()).to_uppercase();
        let result = PaymentResult {
            transaction_id: transaction_id.clone(),
            service_id: self.service.id.clone(),
            method_id: method.id.clone(),
            method_name: method.name.clone(),
            currency_code: self.country.currency_code.to_string(),
            amount,
            fee: self.breakdown.method_fee,
            total_amount: amount + self.breakdown.remaining_amount,
            status: PaymentStatus::Success,
            timestamp: self.clock.now(),
        };

        self.transition(PaymentState::Success { transaction_id });
        self.listener.on_complete(&result);
        self.result = Some(result);
    }

    /// Stop a payment that is still processing. An attempt whose settle delay
    /// has already elapsed settles instead and the abort is refused.
    pub fn abort(&mut self, reason: FailureReason) -> Result<(), BookingError> {
        self.poll();
        if !matches!(self.state, PaymentState::Processing { .. }) {
            return Err(self.rejected("abort payment"));
        }
        self.listener.on_failure(&reason);
        self.transition(PaymentState::Failed { reason });
        Ok(())
    }

    /// Return a failed attempt to method selection. The chosen method is kept;
    /// its form is cleared.
    pub fn retry(&mut self) -> Result<(), BookingError> {
        if !matches!(self.state, PaymentState::Failed { .. }) {
            return Err(self.rejected("retry payment"));
        }
        self.details = self.selected.as_ref().map(|m| PaymentDetails::blank(m.kind));
        self.transition(PaymentState::MethodSelection);
        Ok(())
    }
}
