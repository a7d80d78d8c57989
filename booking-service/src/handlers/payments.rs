//! Payment attempt handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::{PaymentAction, PaymentView},
    models::{FailureReason, PaymentResult, PaymentState},
    AppState,
};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Payment {} not found", id))
}

/// Current view of an attempt. A processing attempt whose delay has elapsed
/// settles here.
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentView>, AppError> {
    let view = {
        let mut session = state.payments.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.flow.poll();
        PaymentView::new(id, session.booking_id, &session.flow)
    };

    retire_if_finished(&state, &view);
    Ok(Json(view))
}

/// Drive the attempt with a user action. Settlement is applied before the
/// action so an elapsed delay always wins.
pub async fn apply_action(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<PaymentAction>,
) -> Result<Json<PaymentView>, AppError> {
    let view = {
        let mut session = state.payments.get_mut(&id).ok_or_else(|| not_found(id))?;
        let flow = &mut session.flow;
        flow.poll();

        match action {
            PaymentAction::Proceed => flow.proceed_to_payment()?,
            PaymentAction::Cancel => flow.cancel()?,
            PaymentAction::SelectMethod { method_id } => {
                flow.select_method(&method_id)?;
            }
            PaymentAction::EnterDetails { details } => flow.enter_details(details)?,
            PaymentAction::Submit => {
                flow.submit()?;
                schedule_settlement(&state, id);
            }
            PaymentAction::Abort { reason } => {
                flow.abort(reason.unwrap_or(FailureReason::Cancelled))?
            }
            PaymentAction::Retry => flow.retry()?,
        }

        flow.poll();
        PaymentView::new(id, session.booking_id, &session.flow)
    };

    retire_if_finished(&state, &view);
    Ok(Json(view))
}

/// Drop an attempt once its terminal state has been handed back. A settled
/// result stays reachable through the confirmation ledger; a paid booking's
/// wizard goes with it.
fn retire_if_finished(state: &AppState, view: &PaymentView) {
    if !view.state.is_terminal() {
        return;
    }

    state.payments.remove(&view.id);
    if matches!(view.state, PaymentState::Success { .. }) {
        state.wizards.remove(&view.booking_id);
    }

    tracing::info!(
        payment_id = %view.id,
        booking_id = %view.booking_id,
        state = view.state.name(),
        "Payment attempt retired"
    );
}

/// One-shot task settling the attempt once the configured delay has passed.
fn schedule_settlement(state: &AppState, id: Uuid) {
    let payments = state.payments.clone();
    let delay = state.settings.settle_delay();

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(mut session) = payments.get_mut(&id) {
            session.flow.poll();
        }
    });
}

pub async fn get_confirmation(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<PaymentResult>, AppError> {
    state
        .ledger
        .get(&transaction_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Transaction not found")))
}
