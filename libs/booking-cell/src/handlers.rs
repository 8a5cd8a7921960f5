// libs/booking-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{BookingError, SelectionRequest};
use crate::services::booking::BookingSelectionService;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::UnknownService(_) => AppError::NotFound(err.to_string()),
            BookingError::ServiceNotSelected(_) => AppError::BadRequest(err.to_string()),
            BookingError::EmployeeNotCandidate { .. } => AppError::BadRequest(err.to_string()),
            BookingError::Lookup(msg) => AppError::ExternalService(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn get_service_employees(
    State(state): State<Arc<AppConfig>>,
    Path(service_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingSelectionService::new(&state);

    let employees = booking_service.employees_for_service(&service_id).await;

    Ok(Json(json!({
        "service_id": service_id,
        "employees": employees,
        "total": employees.len()
    })))
}

#[axum::debug_handler]
pub async fn get_business_services(
    State(state): State<Arc<AppConfig>>,
    Path(business_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingSelectionService::new(&state);

    let services = booking_service.services_for_business(&business_id).await?;

    Ok(Json(json!({
        "business_id": business_id,
        "services": services,
        "total": services.len()
    })))
}

#[axum::debug_handler]
pub async fn evaluate_selection(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<Value>, AppError> {
    if request.service_ids.is_empty() {
        return Err(AppError::BadRequest("service_ids must not be empty".to_string()));
    }

    let booking_service = BookingSelectionService::new(&state);

    let response = booking_service.evaluate_selection(request).await?;

    Ok(Json(json!(response)))
}
