//! Prometheus metrics for blog-service.
//!
//! Exposes content and auth collectors and an HTTP handler for the
//! `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Total posts created through the HTTP surface.
    pub static ref POSTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "blog_posts_created_total",
        "Total posts created"
    )
    .expect("failed to register blog_posts_created_total");

    /// Total comments created through the HTTP surface.
    pub static ref COMMENTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "blog_comments_created_total",
        "Total comments created"
    )
    .expect("failed to register blog_comments_created_total");

    /// Login attempts segmented by outcome (success/failure).
    pub static ref LOGIN_ATTEMPTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "blog_login_attempts_total",
        "Login attempts segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register blog_login_attempts_total");
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
