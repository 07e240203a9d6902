// libs/medical-history-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn medical_history_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::get_lab_results).post(handlers::add_medical_record))
        .route("/conditions", get(handlers::get_conditions))
        .route("/medications", get(handlers::get_medications))
        .route("/appointments", get(handlers::get_prior_appointments))
        .route("/{history_id}", delete(handlers::delete_medical_record))
        .with_state(state)
}
