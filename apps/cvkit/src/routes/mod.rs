pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::layout::handlers as resumes;
use crate::richtext::handlers as richtext;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Rich-text API
        .route("/api/v1/richtext/decode", post(richtext::handle_decode))
        .route("/api/v1/richtext/encode", post(richtext::handle_encode))
        .route("/api/v1/richtext/command", post(richtext::handle_command))
        // Resume layout API
        .route("/api/v1/resumes/paginate", post(resumes::handle_paginate))
        .route("/api/v1/resumes/preview", post(resumes::handle_preview))
        .with_state(state)
}
