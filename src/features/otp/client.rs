//! Client wrappers for the OTP endpoints.

use crate::{
    app_lib::{AppError, api::ApiClient},
    features::otp::types::{ResendOtpRequest, VerifyOtpRequest},
};
use serde_json::Value;

/// Submits the code; the success payload is returned as-is.
///
/// # Errors
/// Returns any gateway error; field errors arrive as `AppError::Rejected`.
pub async fn verify_otp(api: &ApiClient, request: &VerifyOtpRequest) -> Result<Value, AppError> {
    api.post_json("/accounts/verify-otp/", request).await
}

/// Asks the backend to issue a fresh code to the same email.
///
/// # Errors
/// Returns any gateway error.
pub async fn resend_otp(api: &ApiClient, request: &ResendOtpRequest) -> Result<Value, AppError> {
    api.post_json("/accounts/resend-otp/", request).await
}
