//! Application factory
//!
//! Builds the Actix application with middleware, routes and shared state so
//! the binary and the integration tests construct the same app.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use td_shared::config::CorsConfig;

use crate::middleware::cors::create_cors;
use crate::routes;
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app(
    state: web::Data<AppState>,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = create_cors(cors_config);

    App::new()
        .app_data(state)
        .wrap(TracingLogger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(routes::configure))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "tedris-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
