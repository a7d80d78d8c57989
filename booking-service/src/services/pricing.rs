//! Fee calculators.
//!
//! Two independent pricing formulas exist:
//!
//! * [`compute_breakdown`] / [`quote_method`]: advance payment, platform fee and
//!   per-method processing fee, used by the payment flow.
//! * [`review_estimate`]: hourly price times duration plus a flat-rate service
//!   fee, shown on the wizard's review step.
//!
//! All functions are pure and work in whole currency units.

use crate::error::{BookingError, UnavailableReason};
use crate::models::{
    DurationHours, FeePolicy, FeeRule, MethodOption, MethodQuote, PaymentMethod,
    PricingBreakdown, ReviewEstimate,
};

/// Round half away from zero to a whole currency unit.
pub fn round_amount(value: f64) -> i64 {
    value.round() as i64
}

fn ensure_percentage(percentage: f64) -> Result<(), BookingError> {
    if (0.0..=100.0).contains(&percentage) {
        Ok(())
    } else {
        Err(BookingError::InvalidPercentage(percentage))
    }
}

fn ensure_positive(amount: i64) -> Result<(), BookingError> {
    if amount > 0 {
        Ok(())
    } else {
        Err(BookingError::InvalidAmount(amount))
    }
}

/// Fee a method charges on `applied_base`.
pub fn processing_fee(rule: &FeeRule, applied_base: i64) -> i64 {
    match *rule {
        FeeRule::Flat { amount } => amount,
        FeeRule::Percentage { percentage, flat } => {
            round_amount(applied_base as f64 * percentage / 100.0 + flat)
        }
    }
}

/// Full booking-payment breakdown. The method fee is charged on the total
/// advance payable; with no method selected it is zero.
pub fn compute_breakdown(
    base_amount: i64,
    policy: &FeePolicy,
    method: Option<&PaymentMethod>,
) -> Result<PricingBreakdown, BookingError> {
    ensure_positive(base_amount)?;
    ensure_percentage(policy.advance_payment_percentage)?;
    ensure_percentage(policy.platform_fee_percentage)?;
    if let Some(method) = method {
        method.ensure_usable(base_amount)?;
    }

    let advance_amount =
        round_amount(base_amount as f64 * policy.advance_payment_percentage / 100.0);
    let platform_fee =
        round_amount(advance_amount as f64 * policy.platform_fee_percentage / 100.0);
    let total_advance_payable = advance_amount + platform_fee;
    let method_fee = method
        .map(|m| processing_fee(&m.fee, total_advance_payable))
        .unwrap_or(0);

    Ok(PricingBreakdown {
        base_amount,
        advance_amount,
        platform_fee,
        total_advance_payable,
        remaining_amount: base_amount - advance_amount,
        method_fee,
        grand_total: total_advance_payable + method_fee,
    })
}

/// Standalone method comparison: the fee is charged on `amount` itself.
pub fn quote_method(amount: i64, method: &PaymentMethod) -> Result<MethodQuote, BookingError> {
    ensure_positive(amount)?;
    method.ensure_usable(amount)?;

    let fee = processing_fee(&method.fee, amount);
    Ok(MethodQuote {
        method_id: method.id.clone(),
        amount,
        fee,
        total: amount + fee,
    })
}

fn unavailable(method: &PaymentMethod, reason: UnavailableReason) -> MethodOption {
    MethodOption {
        method: method.clone(),
        selectable: false,
        quote: None,
        unavailable_reason: Some(reason),
    }
}

/// Quote every method for `amount`, keeping unusable ones with their reason.
pub fn compare_methods(
    amount: i64,
    methods: &[PaymentMethod],
) -> Result<Vec<MethodOption>, BookingError> {
    ensure_positive(amount)?;

    methods
        .iter()
        .map(|method| match quote_method(amount, method) {
            Ok(quote) => Ok(MethodOption {
                method: method.clone(),
                selectable: true,
                quote: Some(quote),
                unavailable_reason: None,
            }),
            Err(BookingError::UnavailableMethod { reason, .. }) => Ok(unavailable(method, reason)),
            Err(e) => Err(e),
        })
        .collect()
}

/// Method options for a booking payment, quoted against the breakdown each
/// method would produce.
pub fn booking_method_options(
    base_amount: i64,
    policy: &FeePolicy,
    methods: &[PaymentMethod],
) -> Result<Vec<MethodOption>, BookingError> {
    methods
        .iter()
        .map(
            |method| match compute_breakdown(base_amount, policy, Some(method)) {
                Ok(breakdown) => Ok(MethodOption {
                    method: method.clone(),
                    selectable: true,
                    quote: Some(MethodQuote {
                        method_id: method.id.clone(),
                        amount: breakdown.total_advance_payable,
                        fee: breakdown.method_fee,
                        total: breakdown.grand_total,
                    }),
                    unavailable_reason: None,
                }),
                Err(BookingError::UnavailableMethod { reason, .. }) => {
                    Ok(unavailable(method, reason))
                }
                Err(e) => Err(e),
            },
        )
        .collect()
}

/// Review-step price: `unit_price` per hour for the booked duration plus a
/// service fee on the subtotal.
pub fn review_estimate(
    unit_price: i64,
    duration: DurationHours,
    service_fee_percentage: f64,
) -> Result<ReviewEstimate, BookingError> {
    ensure_positive(unit_price)?;
    ensure_percentage(service_fee_percentage)?;

    let subtotal = unit_price * i64::from(duration.hours());
    let service_fee = round_amount(subtotal as f64 * service_fee_percentage / 100.0);

    Ok(ReviewEstimate {
        unit_price,
        duration_hours: duration.hours(),
        subtotal,
        service_fee,
        total: subtotal + service_fee,
    })
}
