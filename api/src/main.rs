//! Tedris API server
//!
//! Wires the MySQL repositories, the SMS gateway and the domain services
//! together, then serves the HTTP API.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use td_api::app::create_app;
use td_api::state::AppState;
use td_core::services::auth::{AuthService, AuthServiceConfig};
use td_core::services::messaging::MessagingService;
use td_core::services::registration::RegistrationService;
use td_core::services::verification::VerificationService;
use td_infra::database::{
    schema, DatabasePool, MySqlConversationRepository, MySqlPendingRegistrationRepository,
    MySqlUserRepository, MySqlVerificationCodeRepository,
};
use td_infra::security::BcryptPasswordHasher;
use td_infra::sms::create_sms_gateway;
use td_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(environment = %config.environment, "starting tedris api server");

    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    schema::ensure_schema(pool.get_pool())
        .await
        .context("failed to prepare the database schema")?;

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let codes = Arc::new(MySqlVerificationCodeRepository::new(pool.get_pool().clone()));
    let pending = Arc::new(MySqlPendingRegistrationRepository::new(
        pool.get_pool().clone(),
    ));
    let conversations = Arc::new(MySqlConversationRepository::new(pool.get_pool().clone()));

    let sms_gateway =
        create_sms_gateway(&config.sms).context("failed to configure the sms gateway")?;
    let password_hasher = Arc::new(BcryptPasswordHasher::new());

    let verification = Arc::new(VerificationService::new(codes, sms_gateway));
    let registration = Arc::new(RegistrationService::new(
        users.clone(),
        pending,
        verification.clone(),
        password_hasher.clone(),
    ));
    let auth = Arc::new(AuthService::new(
        users.clone(),
        verification,
        password_hasher,
        AuthServiceConfig::default(),
    ));
    let messaging = Arc::new(MessagingService::new(conversations, users));

    let state = web::Data::new(AppState::new(registration, auth, messaging));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "binding http server");

    let cors_config = config.cors.clone();
    let workers = config.server.workers;
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors_config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
