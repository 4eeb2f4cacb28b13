pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{compensation, credentials, email, housing, military, resume, tax, translator};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Tax
        .route("/api/tax/calculate", post(tax::handlers::handle_calculate))
        .route("/api/tax/states", get(tax::handlers::handle_states))
        // Military pay
        .route("/api/military/pay", get(military::handlers::handle_pay))
        .route("/api/military/bah", get(military::handlers::handle_bah))
        .route(
            "/api/military/equivalent",
            post(military::handlers::handle_equivalent),
        )
        .route("/api/military/grades", get(military::handlers::handle_grades))
        // Housing
        .route("/api/housing/compare", post(housing::handlers::handle_compare))
        // Compensation
        .route(
            "/api/compensation/compare",
            post(compensation::handlers::handle_compare),
        )
        .route(
            "/api/compensation/locations",
            get(compensation::handlers::handle_locations),
        )
        // Credential ROI
        .route("/api/roi/calculate", post(credentials::handlers::handle_calculate))
        .route(
            "/api/roi/credentials",
            get(credentials::handlers::handle_credentials),
        )
        // Translator
        .route(
            "/api/translator/mapping",
            get(translator::handlers::handle_mapping),
        )
        // Resume (streamed)
        .route("/api/resume/generate", post(resume::handlers::handle_generate))
        // Email capture
        .route("/api/email/capture", post(email::handlers::handle_capture))
        .with_state(state)
}
