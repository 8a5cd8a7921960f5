// libs/booking-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    // Customers browse and build a cart before signing in
    Router::new()
        .route("/services/{service_id}/employees", get(handlers::get_service_employees))
        .route("/businesses/{business_id}/services", get(handlers::get_business_services))
        .route("/selection", post(handlers::evaluate_selection))
        .with_state(state)
}
