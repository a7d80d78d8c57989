pub mod catalog;
pub mod clock;
pub mod ledger;
pub mod listener;
pub mod metrics;
pub mod payment_flow;
pub mod pricing;
pub mod wizard;

pub use catalog::{country, methods_for, InMemoryServiceCatalog, ServiceCatalog};
pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::ConfirmationLedger;
pub use listener::{FlowListener, NoopListener};
pub use metrics::{get_metrics, init_metrics};
pub use payment_flow::{FlowSettings, PaymentFlow};
pub use pricing::{compare_methods, compute_breakdown, quote_method, review_estimate};
pub use wizard::{BookingWizard, Navigation};
