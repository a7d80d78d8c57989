//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    BookingDraft, CountryConfig, FailureReason, MethodKind, MethodOption, PaymentDetails,
    PaymentMethod, PaymentResult, PaymentState, PricingBreakdown, ReviewEstimate,
    ServiceOffering, WizardStep,
};
use crate::services::{Navigation, PaymentFlow};

#[derive(Debug, Serialize)]
pub struct StepStatus {
    pub step: WizardStep,
    pub index: u8,
    pub complete: bool,
}

#[derive(Debug, Serialize)]
pub struct BookingView {
    pub id: Uuid,
    pub step: WizardStep,
    pub step_index: u8,
    pub draft: BookingDraft,
    pub steps: Vec<StepStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewEstimate>,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub navigation: Navigation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingView>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    pub country_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PaymentAction {
    Proceed,
    Cancel,
    SelectMethod {
        method_id: String,
    },
    EnterDetails {
        details: PaymentDetails,
    },
    Submit,
    Abort {
        #[serde(default)]
        reason: Option<FailureReason>,
    },
    Retry,
}

/// Breakdown amounts rendered in the attempt's currency.
#[derive(Debug, Serialize)]
pub struct FormattedBreakdown {
    pub base_amount: String,
    pub advance_amount: String,
    pub platform_fee: String,
    pub total_advance_payable: String,
    pub remaining_amount: String,
    pub method_fee: String,
    pub grand_total: String,
}

impl FormattedBreakdown {
    pub fn new(country: &CountryConfig, breakdown: &PricingBreakdown) -> Self {
        Self {
            base_amount: country.format_amount(breakdown.base_amount),
            advance_amount: country.format_amount(breakdown.advance_amount),
            platform_fee: country.format_amount(breakdown.platform_fee),
            total_advance_payable: country.format_amount(breakdown.total_advance_payable),
            remaining_amount: country.format_amount(breakdown.remaining_amount),
            method_fee: country.format_amount(breakdown.method_fee),
            grand_total: country.format_amount(breakdown.grand_total),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentView {
    pub id: Uuid,
    pub booking_id: Uuid,
    #[serde(flatten)]
    pub state: PaymentState,
    pub service: ServiceOffering,
    pub country: CountryConfig,
    pub breakdown: PricingBreakdown,
    pub formatted: FormattedBreakdown,
    pub methods: Vec<MethodOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_kind: Option<MethodKind>,
    pub details_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PaymentResult>,
}

impl PaymentView {
    pub fn new(id: Uuid, booking_id: Uuid, flow: &PaymentFlow) -> Self {
        Self {
            id,
            booking_id,
            state: flow.state().clone(),
            service: flow.service().clone(),
            country: *flow.country(),
            breakdown: *flow.breakdown(),
            formatted: FormattedBreakdown::new(flow.country(), flow.breakdown()),
            methods: flow.method_options(),
            selected_method: flow.selected_method().cloned(),
            details_kind: flow.details().map(|d| d.kind()),
            details_complete: flow.details().is_some_and(|d| d.is_filled()),
            result: flow.result().cloned(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MethodComparisonQuery {
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct MethodComparisonResponse {
    pub country: CountryConfig,
    pub amount: String,
    pub methods: Vec<MethodOption>,
}
