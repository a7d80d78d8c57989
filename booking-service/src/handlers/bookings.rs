//! Booking wizard handlers. Each wizard lives in memory under its own id.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::{BookingView, CheckoutRequest, NavigationResponse, PaymentView, StepStatus},
    error::BookingError,
    models::{BookingUpdate, WizardStep},
    services::{country, methods_for, BookingWizard, Navigation, PaymentFlow},
    AppState, PaymentSession,
};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Booking {} not found", id))
}

fn booking_view(state: &AppState, id: Uuid, wizard: &BookingWizard) -> BookingView {
    let steps = [
        WizardStep::Service,
        WizardStep::Schedule,
        WizardStep::EventDetails,
        WizardStep::Contact,
        WizardStep::Review,
    ]
    .into_iter()
    .map(|step| StepStatus {
        step,
        index: step.index(),
        complete: wizard.is_step_complete(step),
    })
    .collect();

    let review = (wizard.step() == WizardStep::Review)
        .then(|| {
            wizard
                .review(
                    state.catalog.as_ref(),
                    state.settings.pricing.review_service_fee_percentage,
                )
                .ok()
        })
        .flatten();

    BookingView {
        id,
        step: wizard.step(),
        step_index: wizard.step().index(),
        draft: wizard.draft().clone(),
        steps,
        review,
    }
}

/// Open a new booking wizard on the service-selection step.
pub async fn create_booking(
    State(state): State<AppState>,
) -> (StatusCode, Json<BookingView>) {
    let id = Uuid::new_v4();
    let wizard = BookingWizard::new(state.ledger.clone());
    let view = booking_view(&state, id, &wizard);
    state.wizards.insert(id, wizard);

    tracing::info!(booking_id = %id, "Booking wizard opened");

    (StatusCode::CREATED, Json(view))
}

pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingView>, AppError> {
    let wizard = state.wizards.get(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(booking_view(&state, id, &wizard)))
}

/// Apply one field update to the draft.
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<BookingUpdate>,
) -> Result<Json<BookingView>, AppError> {
    if let BookingUpdate::Service(service_id) = &update {
        if state.catalog.find(service_id.trim()).is_none() {
            return Err(BookingError::UnknownService(service_id.clone()).into());
        }
    }

    let mut wizard = state.wizards.get_mut(&id).ok_or_else(|| not_found(id))?;
    wizard.update(update);

    tracing::debug!(booking_id = %id, step = wizard.step().index(), "Booking draft updated");

    Ok(Json(booking_view(&state, id, &wizard)))
}

pub async fn next_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NavigationResponse>, AppError> {
    let mut wizard = state.wizards.get_mut(&id).ok_or_else(|| not_found(id))?;
    let navigation = wizard.next();

    Ok(Json(NavigationResponse {
        navigation,
        booking: Some(booking_view(&state, id, &wizard)),
    }))
}

/// Step back; backing out of the first step closes the wizard.
pub async fn previous_step(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NavigationResponse>, AppError> {
    let (navigation, view) = {
        let mut wizard = state.wizards.get_mut(&id).ok_or_else(|| not_found(id))?;
        let navigation = wizard.back();
        (navigation, booking_view(&state, id, &wizard))
    };

    if navigation == Navigation::Exited {
        state.wizards.remove(&id);
        tracing::info!(booking_id = %id, "Booking wizard closed");
        return Ok(Json(NavigationResponse {
            navigation,
            booking: None,
        }));
    }

    Ok(Json(NavigationResponse {
        navigation,
        booking: Some(view),
    }))
}

/// Start a payment attempt for a completed draft.
pub async fn checkout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<CheckoutRequest>>,
) -> Result<(StatusCode, Json<PaymentView>), AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let draft = {
        let wizard = state.wizards.get(&id).ok_or_else(|| not_found(id))?;
        wizard.completed_draft()?
    };

    let service_id = draft.service_id.clone().unwrap_or_default();
    let service = state
        .catalog
        .find(&service_id)
        .ok_or(BookingError::UnknownService(service_id))?;

    let country_code = request
        .country_code
        .unwrap_or_else(|| state.settings.payment.default_country.clone());
    let country = country(&country_code)?;

    let flow = PaymentFlow::start(
        draft,
        service,
        country,
        methods_for(country.code),
        state.settings.flow_settings(),
        state.clock.clone(),
        state.ledger.clone(),
    )?;

    let payment_id = Uuid::new_v4();
    let view = PaymentView::new(payment_id, id, &flow);
    state.payments.insert(
        payment_id,
        PaymentSession {
            booking_id: id,
            flow,
        },
    );

    tracing::info!(booking_id = %id, payment_id = %payment_id, "Checkout started");

    Ok((StatusCode::CREATED, Json(view)))
}
