#![allow(dead_code)]

use alumni_web::app_lib::{ApiClient, AppError, config::AppConfig, storage::MemoryStore};
use alumni_web::features::{auth::SessionStore, otp::PendingRegistration};
use std::{net::TcpListener, sync::Arc};
use wiremock::MockServer;

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Gateway pointed at `/api/` on the mock server.
pub fn api_for(server: &MockServer) -> Result<ApiClient, AppError> {
    let config = AppConfig {
        api_base_url: format!("{}/api/", server.uri()),
        ..AppConfig::default()
    };
    ApiClient::new(&config)
}

/// Session store and pending marker sharing one in-memory backend, like the
/// browser's single `localStorage`.
pub fn browser_like_storage() -> (SessionStore, PendingRegistration) {
    let storage = Arc::new(MemoryStore::new());
    (
        SessionStore::new(storage.clone()),
        PendingRegistration::new(storage),
    )
}
