//! Route tests for login, logout and password reset

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use uuid::Uuid;

use td_api::routes;
use td_api::state::AppState;
use td_core::domain::entities::{CodePurpose, SpecificRole, User, UserCategory, UserProfile};
use td_core::repositories::{
    MockConversationRepository, MockPendingRegistrationRepository, MockUserRepository,
    MockVerificationCodeRepository,
};
use td_core::services::auth::{AuthService, AuthServiceConfig, PasswordHasher};
use td_core::services::messaging::MessagingService;
use td_core::services::registration::RegistrationService;
use td_core::services::verification::VerificationService;
use td_infra::security::BcryptPasswordHasher;
use td_infra::sms::MockSmsGateway;

const PHONE: &str = "34567890";

struct Backend {
    users: MockUserRepository,
    codes: MockVerificationCodeRepository,
    gateway: Arc<MockSmsGateway>,
    state: web::Data<AppState>,
}

async fn backend_with_users(seed: Vec<User>) -> Backend {
    let mut users = MockUserRepository::new();
    for user in seed {
        users = users.with_user(user).await;
    }
    let codes = MockVerificationCodeRepository::new();
    let pending = MockPendingRegistrationRepository::new();
    let conversations = MockConversationRepository::new();
    let gateway = Arc::new(MockSmsGateway::new());
    let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));

    let verification = Arc::new(VerificationService::new(
        Arc::new(codes.clone()),
        gateway.clone(),
    ));
    let registration = Arc::new(RegistrationService::new(
        Arc::new(users.clone()),
        Arc::new(pending.clone()),
        verification.clone(),
        hasher.clone(),
    ));
    let auth = Arc::new(AuthService::new(
        Arc::new(users.clone()),
        verification,
        hasher,
        AuthServiceConfig::default(),
    ));
    let messaging = Arc::new(MessagingService::new(
        Arc::new(conversations.clone()),
        Arc::new(users.clone()),
    ));

    Backend {
        users,
        codes,
        gateway,
        state: web::Data::new(AppState::new(registration, auth, messaging)),
    }
}

fn sample_profile() -> UserProfile {
    UserProfile {
        national_id: "1111111111".to_string(),
        reference_number: "MAT-100".to_string(),
        full_name: "Aminata Ba".to_string(),
        category: UserCategory::Instituteur,
        role: SpecificRole::InstituteurBilingue,
        wilaya: "Trarza".to_string(),
        moughataa: "Rosso".to_string(),
        school: "Ecole 3 de Rosso".to_string(),
        new_school: false,
    }
}

/// Backend seeded with one account registered for [`PHONE`]
async fn seeded_backend(password: &str, verified: bool) -> (Backend, User) {
    let hash = BcryptPasswordHasher::with_cost(4).hash(password).unwrap();
    let mut user = User::new(PHONE.to_string(), sample_profile(), hash);
    if verified {
        user.verify();
    }
    let backend = backend_with_users(vec![user.clone()]).await;
    (backend, user)
}

macro_rules! init_app {
    ($backend:expr) => {
        test::init_service(
            App::new()
                .app_data($backend.state.clone())
                .service(web::scope("/api/v1").configure(routes::configure)),
        )
        .await
    };
}

macro_rules! post_login {
    ($app:expr, $phone:expr, $password:expr) => {
        test::call_service(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(json!({ "phone": $phone, "password": $password }))
                .to_request(),
        )
        .await
    };
}

#[actix_web::test]
async fn login_marks_the_user_online() {
    let (backend, user) = seeded_backend("secret123", true).await;
    let app = init_app!(backend);

    let resp = post_login!(&app, PHONE, "secret123");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["is_online"], true);
    assert!(body["user"].get("password_hash").is_none());

    let stored = backend.users.get(user.id).await.unwrap();
    assert!(stored.is_online);
    assert!(stored.last_seen.is_some());
}

#[actix_web::test]
async fn bad_password_and_unknown_phone_answer_identically() {
    let (backend, _) = seeded_backend("secret123", true).await;
    let app = init_app!(backend);

    let wrong = post_login!(&app, PHONE, "not-the-password");
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong: Value = test::read_body_json(wrong).await;

    let unknown = post_login!(&app, "45999999", "secret123");
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown: Value = test::read_body_json(unknown).await;

    assert_eq!(wrong["error"], "invalid_credentials");
    assert_eq!(wrong["error"], unknown["error"]);
    assert_eq!(wrong["message"], unknown["message"]);
}

#[actix_web::test]
async fn login_refuses_unverified_accounts() {
    let (backend, _) = seeded_backend("secret123", false).await;
    let app = init_app!(backend);

    let resp = post_login!(&app, PHONE, "secret123");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "account_unverified");
}

#[actix_web::test]
async fn logout_marks_the_user_offline() {
    let (backend, user) = seeded_backend("secret123", true).await;
    let app = init_app!(backend);

    let resp = post_login!(&app, PHONE, "secret123");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .set_json(json!({ "user_id": user.id }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = backend.users.get(user.id).await.unwrap();
    assert!(!stored.is_online);
    assert!(stored.last_seen.is_some());
}

#[actix_web::test]
async fn logout_for_an_unknown_user_is_not_found() {
    let backend = backend_with_users(Vec::new()).await;
    let app = init_app!(backend);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .set_json(json!({ "user_id": Uuid::new_v4() }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn password_reset_allows_login_with_the_new_password() {
    let (backend, _) = seeded_backend("oldsecret", true).await;
    let app = init_app!(backend);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/password/forgot")
            .set_json(json!({ "phone": PHONE }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(backend.gateway.delivered_count(), 1);

    let code = backend
        .codes
        .get(PHONE, CodePurpose::PasswordReset)
        .await
        .unwrap()
        .code;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/password/reset")
            .set_json(json!({ "phone": PHONE, "code": code, "new_password": "newsecret" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = post_login!(&app, PHONE, "oldsecret");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post_login!(&app, PHONE, "newsecret");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn password_forgot_for_an_unknown_phone_is_not_found() {
    let backend = backend_with_users(Vec::new()).await;
    let app = init_app!(backend);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/password/forgot")
            .set_json(json!({ "phone": "45000000" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(backend.gateway.delivered_count(), 0);
}

#[actix_web::test]
async fn password_reset_rejects_short_passwords() {
    let (backend, _) = seeded_backend("oldsecret", true).await;
    let app = init_app!(backend);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/password/reset")
            .set_json(json!({ "phone": PHONE, "code": "000000", "new_password": "abc" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["password"].is_array());
}
