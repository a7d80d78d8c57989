//! Booking domain errors.
//!
//! Every variant is a gating condition: the operation that returns it leaves
//! the wizard or payment attempt in the state it was in.

use serde::Serialize;
use service_core::error::AppError;
use std::fmt;
use thiserror::Error;

use crate::models::{MethodKind, WizardStep};

/// Why a payment method cannot be used for the current amount or country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    Disabled,
    NotOffered,
    BelowMinimum,
    AboveMaximum,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnavailableReason::Disabled => "method is disabled",
            UnavailableReason::NotOffered => "method is not offered in this country",
            UnavailableReason::BelowMinimum => "amount is below the method minimum",
            UnavailableReason::AboveMaximum => "amount is above the method maximum",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(i64),

    #[error("Payment method '{method_id}' is unavailable: {reason}")]
    UnavailableMethod {
        method_id: String,
        reason: UnavailableReason,
    },

    #[error("No payment method selected")]
    NoMethodSelected,

    #[error("Booking draft is incomplete: step {} is missing required fields", .step.index())]
    IncompleteDraft { step: WizardStep },

    #[error("Cannot {action} while payment is in state '{state}'")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("Payment details of kind {provided:?} do not match the selected {expected:?} method")]
    DetailsMismatch {
        expected: MethodKind,
        provided: MethodKind,
    },

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Unsupported country: {0}")]
    UnknownCountry(String),

    #[error("A duration of {0} hours is not offered")]
    InvalidDuration(u8),

    #[error("Percentage {0} is outside 0..=100")]
    InvalidPercentage(f64),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::UnknownService(_) | BookingError::UnknownCountry(_) => {
                AppError::NotFound(err.into())
            }
            BookingError::InvalidTransition { .. } => AppError::Conflict(err.into()),
            BookingError::InvalidAmount(_)
            | BookingError::UnavailableMethod { .. }
            | BookingError::NoMethodSelected
            | BookingError::IncompleteDraft { .. }
            | BookingError::DetailsMismatch { .. }
            | BookingError::InvalidDuration(_)
            | BookingError::InvalidPercentage(_) => AppError::BadRequest(err.into()),
        }
    }
}
