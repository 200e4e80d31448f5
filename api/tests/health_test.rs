//! Tests for the application factory, health endpoint and 404 handling

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::Value;

use td_api::app::create_app;
use td_api::state::AppState;
use td_core::repositories::{
    MockConversationRepository, MockPendingRegistrationRepository, MockUserRepository,
    MockVerificationCodeRepository,
};
use td_core::services::auth::{AuthService, AuthServiceConfig};
use td_core::services::messaging::MessagingService;
use td_core::services::registration::RegistrationService;
use td_core::services::verification::VerificationService;
use td_infra::security::BcryptPasswordHasher;
use td_infra::sms::MockSmsGateway;
use td_shared::config::CorsConfig;

fn empty_state() -> web::Data<AppState> {
    let users = Arc::new(MockUserRepository::new());
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let pending = Arc::new(MockPendingRegistrationRepository::new());
    let conversations = Arc::new(MockConversationRepository::new());
    let gateway = Arc::new(MockSmsGateway::new());
    let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));

    let verification = Arc::new(VerificationService::new(codes, gateway));
    let registration = Arc::new(RegistrationService::new(
        users.clone(),
        pending,
        verification.clone(),
        hasher.clone(),
    ));
    let auth = Arc::new(AuthService::new(
        users.clone(),
        verification,
        hasher,
        AuthServiceConfig::default(),
    ));
    let messaging = Arc::new(MessagingService::new(conversations, users));

    web::Data::new(AppState::new(registration, auth, messaging))
}

#[actix_web::test]
async fn health_reports_the_service_alive() {
    let app = test::init_service(create_app(empty_state(), &CorsConfig::default())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "tedris-api");
}

#[actix_web::test]
async fn unknown_routes_return_the_standard_error_shape() {
    let app = test::init_service(create_app(empty_state(), &CorsConfig::default())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/nope").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
