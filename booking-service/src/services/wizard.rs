//! Booking parameter collector: the five-step booking wizard.

use serde::Serialize;
use std::sync::Arc;

use crate::error::BookingError;
use crate::models::{BookingDraft, BookingUpdate, ReviewEstimate, WizardStep};
use crate::services::catalog::ServiceCatalog;
use crate::services::listener::FlowListener;
use crate::services::pricing::review_estimate;

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "step", rename_all = "snake_case")]
pub enum Navigation {
    Moved(WizardStep),
    /// Navigation refused; the wizard remains on this step.
    Stayed(WizardStep),
    /// Backed out of the first step; the owner should discard the wizard.
    Exited,
}

pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
    listener: Arc<dyn FlowListener>,
}

impl BookingWizard {
    pub fn new(listener: Arc<dyn FlowListener>) -> Self {
        Self {
            step: WizardStep::Service,
            draft: BookingDraft::new(),
            listener,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Replace the draft with one carrying `update`. Any field may be set from
    /// any step.
    pub fn update(&mut self, update: BookingUpdate) -> &BookingDraft {
        self.draft = self.draft.apply(update);
        &self.draft
    }

    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        self.draft.is_step_complete(step)
    }

    pub fn next(&mut self) -> Navigation {
        if !self.draft.is_step_complete(self.step) {
            tracing::warn!(
                step = self.step.index(),
                "Wizard step incomplete, staying put"
            );
            return Navigation::Stayed(self.step);
        }

        match self.step.next() {
            Some(next) => {
                tracing::debug!(from = self.step.index(), to = next.index(), "Wizard advanced");
                self.step = next;
                Navigation::Moved(next)
            }
            None => Navigation::Stayed(self.step),
        }
    }

    pub fn back(&mut self) -> Navigation {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                Navigation::Moved(previous)
            }
            None => {
                tracing::info!("Wizard exited from first step");
                self.listener.on_exit();
                Navigation::Exited
            }
        }
    }

    /// Review-step price for the current draft.
    pub fn review(
        &self,
        catalog: &dyn ServiceCatalog,
        service_fee_percentage: f64,
    ) -> Result<ReviewEstimate, BookingError> {
        let service_id = self
            .draft
            .service_id
            .as_deref()
            .ok_or(BookingError::IncompleteDraft {
                step: WizardStep::Service,
            })?;
        let service = catalog
            .find(service_id)
            .ok_or_else(|| BookingError::UnknownService(service_id.to_string()))?;

        review_estimate(service.price, self.draft.duration, service_fee_percentage)
    }

    /// The draft, once every required field is populated.
    pub fn completed_draft(&self) -> Result<BookingDraft, BookingError> {
        match self.draft.first_incomplete_step() {
            Some(step) => Err(BookingError::IncompleteDraft { step }),
            None => Ok(self.draft.clone()),
        }
    }
}
