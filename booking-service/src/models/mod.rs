//! Domain models for booking-service.

mod catalog;
mod draft;
mod payment;
mod payment_method;
mod pricing;

pub use catalog::{CountryConfig, ServiceOffering};
pub use draft::{BookingDraft, BookingUpdate, ContactInfo, DurationHours, Location, WizardStep};
pub use payment::{FailureReason, PaymentResult, PaymentState, PaymentStatus};
pub use payment_method::{FeeRule, MethodKind, PaymentDetails, PaymentMethod};
pub use pricing::{FeePolicy, MethodOption, MethodQuote, PricingBreakdown, ReviewEstimate};
