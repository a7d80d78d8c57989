use axum::{
    extract::{Path, Query, State},
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{MethodComparisonQuery, MethodComparisonResponse},
    models::ServiceOffering,
    services::{compare_methods, country, methods_for},
    AppState,
};

/// Services bookable through the wizard.
pub async fn list_services(State(state): State<AppState>) -> Json<Vec<ServiceOffering>> {
    Json(state.catalog.services())
}

/// Fee comparison of every method offered in a country for a raw amount.
pub async fn compare_payment_methods(
    Path(country_code): Path<String>,
    Query(query): Query<MethodComparisonQuery>,
) -> Result<Json<MethodComparisonResponse>, AppError> {
    let country = country(&country_code)?;
    let methods = compare_methods(query.amount, &methods_for(country.code))?;

    tracing::debug!(
        country = country.code,
        amount = query.amount,
        options = methods.len(),
        "Compared payment methods"
    );

    Ok(Json(MethodComparisonResponse {
        country,
        amount: country.format_amount(query.amount),
        methods,
    }))
}
