use crate::models::{FailureReason, PaymentResult};

/// Callbacks into whoever owns the booking record. All methods default to
/// doing nothing.
pub trait FlowListener: Send + Sync {
    /// The payment settled. Called once per attempt.
    fn on_complete(&self, _result: &PaymentResult) {}

    /// The customer cancelled from the payment summary.
    fn on_cancel(&self) {}

    /// Processing was aborted.
    fn on_failure(&self, _reason: &FailureReason) {}

    /// The customer backed out of the first wizard step.
    fn on_exit(&self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl FlowListener for NoopListener {}
