//! Client wrappers for account endpoints. These helpers centralize payload
//! encoding so views never assemble requests themselves. Passwords are exposed
//! only while building the request body and must never be logged.

use crate::{
    app_lib::{AppError, api::ApiClient},
    features::auth::{
        session::Session,
        types::{Department, LoginPayload, LoginRequest, LoginResponse, RegisterRequest},
    },
};
use reqwest::{Method, multipart::Form};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::info;

pub const REGISTER_FALLBACK: &str = "Something went wrong.";
pub const REGISTERED_NOTICE: &str = "Registration successful! Redirecting to OTP...";
pub const LOGIN_FALLBACK: &str = "Something went wrong. Try again.";
pub const MISSING_TOKEN: &str = "Backend did not return token!";

/// Creates an account. The backend issues the OTP out of band.
///
/// # Errors
/// Returns `AppError::Validation` for an incomplete form, otherwise any gateway error.
pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<(), AppError> {
    request.validate()?;

    let form = Form::new()
        .text("student_id", request.student_id.trim().to_string())
        .text("email", request.email.trim().to_string())
        .text("name", request.name.trim().to_string())
        .text("password", request.password.expose_secret().to_string())
        .text("role", request.role.as_str())
        .text("department", request.department.trim().to_string());

    let _: Value = api
        .send_form(Method::POST, "/accounts/register/", form, None)
        .await?;
    info!("registration accepted");
    Ok(())
}

/// Exchanges credentials for a session. The caller persists it.
///
/// # Errors
/// Returns `AppError::Validation` for blank fields, `AppError::Parse` when the
/// backend answers without a token, otherwise any gateway error.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<Session, AppError> {
    request.validate()?;

    let payload = LoginPayload {
        email: request.email.trim(),
        password: request.password.expose_secret(),
    };
    let response: LoginResponse = api.post_json("/accounts/login/", &payload).await?;

    let token = response
        .token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| AppError::Parse(MISSING_TOKEN.to_string()))?;

    Ok(Session {
        token: SecretString::from(token),
        user: response.user,
    })
}

/// Lists departments for the registration form.
///
/// # Errors
/// Returns any gateway error.
pub async fn departments(api: &ApiClient) -> Result<Vec<Department>, AppError> {
    api.get_json("/accounts/departments/", None).await
}

/// Message for a failed login. A tokenless success is reported as such rather
/// than as a generic failure.
#[must_use]
pub fn login_error_message(err: &AppError) -> String {
    match err {
        AppError::Parse(message) if message == MISSING_TOKEN => message.clone(),
        other => other.user_message(LOGIN_FALLBACK),
    }
}
