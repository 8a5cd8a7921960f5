use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use action_token_cell::router::appointment_action_routes;
use booking_cell::router::booking_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "TuTurno API is running!" }))
        .nest("/appointments", appointment_action_routes(state.clone()))
        .nest("/booking", booking_routes(state))
}
