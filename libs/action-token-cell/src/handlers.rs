// libs/action-token-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ActionError, AppointmentActionRequest, TokenQuery};
use crate::services::appointment::AppointmentActionService;

impl From<ActionError> for AppError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::InvalidLink => AppError::Auth(err.to_string()),
            ActionError::Configuration(msg) => AppError::Configuration(msg),
            ActionError::NotAllowed { .. } => AppError::Conflict(err.to_string()),
            ActionError::InvalidReschedule(_) => AppError::BadRequest(err.to_string()),
            ActionError::Database(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn get_appointment_for_link(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Value>, AppError> {
    let action_service = AppointmentActionService::new(&state);

    let summary = action_service.get_summary(&appointment_id, &query.token).await?;

    Ok(Json(json!(summary)))
}

#[axum::debug_handler]
pub async fn perform_appointment_action(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<AppointmentActionRequest>,
) -> Result<Json<Value>, AppError> {
    let action_service = AppointmentActionService::new(&state);
    let action = request.action;

    let appointment = action_service.perform_action(&appointment_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "action": action,
        "appointment": appointment
    })))
}
