//! CORS middleware configuration for cross-origin requests
//!
//! The mobile clients talk to the API from app schemes and local dev
//! servers, so development keeps CORS permissive. Configuring any origin in
//! `ALLOWED_ORIGINS` switches to an explicit allow-list.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use td_shared::config::CorsConfig;
use tracing::info;

/// Build the CORS middleware from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    if config.allow_any_origin() {
        info!("cors: allowing any origin");
        permissive_cors(config.max_age)
    } else {
        info!(
            origins = config.allowed_origins.len(),
            "cors: restricting to configured origins"
        );
        restricted_cors(config)
    }
}

fn permissive_cors(max_age: usize) -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
        ])
        .max_age(max_age)
}

fn restricted_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_origin_list_is_permissive() {
        let config = CorsConfig::default();
        assert!(config.allow_any_origin());
        let _cors = create_cors(&config);
    }

    #[test]
    fn configured_origins_restrict() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.tedris.mr".to_string()],
            max_age: 600,
        };
        assert!(!config.allow_any_origin());
        let _cors = create_cors(&config);
    }
}
