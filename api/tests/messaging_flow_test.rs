//! Route tests for direct messaging

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use uuid::Uuid;

use td_api::routes;
use td_api::state::AppState;
use td_core::domain::entities::{SpecificRole, User, UserCategory, UserProfile};
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

struct Backend {
    conversations: MockConversationRepository,
    state: web::Data<AppState>,
    alice: Uuid,
    bob: Uuid,
    carol: Uuid,
}

fn member(phone: &str, name: &str, national_id: &str, reference: &str) -> User {
    let profile = UserProfile {
        national_id: national_id.to_string(),
        reference_number: reference.to_string(),
        full_name: name.to_string(),
        category: UserCategory::Professeur,
        role: SpecificRole::ProfDeuxiemeCycle,
        wilaya: "Nouakchott-Ouest".to_string(),
        moughataa: "Tevragh-Zeina".to_string(),
        school: "Lycee de Tevragh-Zeina".to_string(),
        new_school: false,
    };
    let mut user = User::new(phone.to_string(), profile, "irrelevant".to_string());
    user.verify();
    user
}

async fn backend() -> Backend {
    let alice = member("34567890", "Aminata Ba", "1111111111", "MAT-001");
    let bob = member("23456789", "Oumar Sow", "2222222222", "MAT-002");
    let carol = member("45678901", "Mariem Fall", "3333333333", "MAT-003");

    let users = MockUserRepository::new()
        .with_user(alice.clone())
        .await
        .with_user(bob.clone())
        .await
        .with_user(carol.clone())
        .await;
    let conversations = MockConversationRepository::new()
        .with_participant(alice.id, "Aminata Ba", true)
        .await
        .with_participant(bob.id, "Oumar Sow", false)
        .await
        .with_participant(carol.id, "Mariem Fall", false)
        .await;

    let codes = MockVerificationCodeRepository::new();
    let pending = MockPendingRegistrationRepository::new();
    let gateway = Arc::new(MockSmsGateway::new());
    let hasher = Arc::new(BcryptPasswordHasher::with_cost(4));

    let verification = Arc::new(VerificationService::new(Arc::new(codes), gateway));
    let registration = Arc::new(RegistrationService::new(
        Arc::new(users.clone()),
        Arc::new(pending),
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
        Arc::new(users),
    ));

    Backend {
        conversations,
        state: web::Data::new(AppState::new(registration, auth, messaging)),
        alice: alice.id,
        bob: bob.id,
        carol: carol.id,
    }
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

macro_rules! send_message {
    ($app:expr, $sender:expr, $recipient:expr, $content:expr) => {
        test::call_service(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/messages")
                .set_json(json!({
                    "sender_id": $sender,
                    "recipient_id": $recipient,
                    "content": $content
                }))
                .to_request(),
        )
        .await
    };
}

macro_rules! get_conversations {
    ($app:expr, $user:expr) => {{
        let resp = test::call_service(
            $app,
            test::TestRequest::get()
                .uri(&format!("/api/v1/users/{}/conversations", $user))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body["conversations"].as_array().unwrap().clone()
    }};
}

#[actix_web::test]
async fn send_message_creates_the_conversation() {
    let backend = backend().await;
    let app = init_app!(backend);

    let resp = send_message!(&app, backend.alice, backend.bob, "salut");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["content"], "salut");
    assert_eq!(body["is_read"], false);
    assert_eq!(body["sender_id"], json!(backend.alice));

    assert_eq!(backend.conversations.conversation_count().await, 1);
}

#[actix_web::test]
async fn both_directions_share_one_conversation() {
    let backend = backend().await;
    let app = init_app!(backend);

    let resp = send_message!(&app, backend.alice, backend.bob, "salut");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = send_message!(&app, backend.bob, backend.alice, "bonjour");
    assert_eq!(resp.status(), StatusCode::CREATED);

    assert_eq!(backend.conversations.conversation_count().await, 1);

    let summaries = get_conversations!(&app, backend.alice);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["other_user_id"], json!(backend.bob));
    assert_eq!(summaries[0]["last_message"], "bonjour");
    assert_eq!(summaries[0]["unread_count"], 1);
}

#[actix_web::test]
async fn fetching_messages_marks_them_read() {
    let backend = backend().await;
    let app = init_app!(backend);

    let resp = send_message!(&app, backend.alice, backend.bob, "salut");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = send_message!(&app, backend.alice, backend.bob, "tu es la ?");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let summaries = get_conversations!(&app, backend.bob);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["unread_count"], 2);
    assert_eq!(summaries[0]["last_message"], "tu es la ?");
    assert_eq!(summaries[0]["other_full_name"], "Aminata Ba");
    let conversation_id = summaries[0]["conversation_id"].as_str().unwrap().to_string();

    // The fetch returns the pre-fetch read state, oldest first
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/api/v1/conversations/{}/messages?user_id={}",
                conversation_id, backend.bob
            ))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "salut");
    assert_eq!(messages[1]["content"], "tu es la ?");
    assert_eq!(messages[0]["is_read"], false);

    // The sender never contributes to their own unread count
    let summaries = get_conversations!(&app, backend.alice);
    assert_eq!(summaries[0]["unread_count"], 0);

    let summaries = get_conversations!(&app, backend.bob);
    assert_eq!(summaries[0]["unread_count"], 0);
}

#[actix_web::test]
async fn fetching_messages_requires_participation() {
    let backend = backend().await;
    let app = init_app!(backend);

    let resp = send_message!(&app, backend.alice, backend.bob, "salut");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let summaries = get_conversations!(&app, backend.alice);
    let conversation_id = summaries[0]["conversation_id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/api/v1/conversations/{}/messages?user_id={}",
                conversation_id, backend.carol
            ))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "forbidden");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/api/v1/conversations/{}/messages?user_id={}",
                Uuid::new_v4(),
                backend.alice
            ))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn send_rejects_self_messages_and_unknown_recipients() {
    let backend = backend().await;
    let app = init_app!(backend);

    let resp = send_message!(&app, backend.alice, backend.alice, "echo");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["recipient_id"].is_array());

    let resp = send_message!(&app, backend.alice, Uuid::new_v4(), "hello?");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send_message!(&app, backend.alice, backend.bob, "   ");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["details"]["content"].is_array());
}
