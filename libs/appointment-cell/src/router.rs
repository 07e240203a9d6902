// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    // The client identifies the patient by the user_id it stashed at login
    let lookup_routes = Router::new()
        .route("/hospitals", get(handlers::get_hospitals))
        .route("/upcoming", get(handlers::get_upcoming_appointment))
        .route("/list", get(handlers::list_upcoming_appointments))
        .route("/available-times", get(handlers::get_available_times))
        .route("/get-appointment-id", get(handlers::get_appointment_id));

    let booking_routes = Router::new()
        .route("/book", post(handlers::book_appointment))
        .route("/reschedule", post(handlers::reschedule_appointment))
        .route("/cancel", post(handlers::cancel_appointment))
        .route("/complete", post(handlers::complete_appointment));

    Router::new()
        .merge(lookup_routes)
        .merge(booking_routes)
        .with_state(state)
}
