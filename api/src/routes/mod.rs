//! HTTP route handlers and registration

pub mod auth;
pub mod messaging;

use actix_web::web;

/// Register every `/api/v1` route on the given service config
///
/// The binary and the integration tests both build their route tree
/// through this function.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register::register))
            .route("/register/verify", web::post().to(auth::register::verify))
            .route("/register/resend", web::post().to(auth::register::resend))
            .route("/login", web::post().to(auth::login::login))
            .route("/logout", web::post().to(auth::login::logout))
            .route("/password/forgot", web::post().to(auth::password::forgot))
            .route("/password/reset", web::post().to(auth::password::reset)),
    )
    .route(
        "/users/{user_id}/conversations",
        web::get().to(messaging::conversations::list_conversations),
    )
    .route(
        "/conversations/{conversation_id}/messages",
        web::get().to(messaging::messages::list_messages),
    )
    .route(
        "/messages",
        web::post().to(messaging::messages::send_message),
    );
}
