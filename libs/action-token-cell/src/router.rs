// libs/action-token-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_action_routes(state: Arc<AppConfig>) -> Router {
    // The signed token stands in for a session, so these routes carry no auth layer
    Router::new()
        .route("/{appointment_id}", get(handlers::get_appointment_for_link))
        .route("/{appointment_id}/action", post(handlers::perform_appointment_action))
        .with_state(state)
}
