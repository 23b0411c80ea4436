//! Bearer-authenticated profile calls. Both go through
//! [`SessionStore::enforce`], so a 401/403 clears the session before the caller
//! sees the error.

use crate::{
    app_lib::{AppError, api::ApiClient},
    features::{
        auth::SessionStore,
        profile::types::{Profile, ProfileUpdate},
    },
};
use reqwest::{
    Method,
    multipart::{Form, Part},
};
use serde_json::Value;
use tracing::info;

const ME_PATH: &str = "/accounts/me/";

/// # Errors
/// Returns `AppError::Unauthorized` without a stored token or when the backend
/// rejects it, otherwise any gateway error.
pub async fn fetch_profile(api: &ApiClient, store: &SessionStore) -> Result<Profile, AppError> {
    let result = match store.get_token() {
        Some(token) => api.get_json(ME_PATH, Some(&token)).await,
        None => Err(AppError::Unauthorized { status: 401 }),
    };
    store.enforce(result)
}

/// # Errors
/// Returns `AppError::Validation` for a blank name, `AppError::Unauthorized`
/// as for [`fetch_profile`], otherwise any gateway error.
pub async fn update_profile(
    api: &ApiClient,
    store: &SessionStore,
    update: &ProfileUpdate,
) -> Result<(), AppError> {
    update.validate()?;

    let Some(token) = store.get_token() else {
        return store.enforce(Err(AppError::Unauthorized { status: 401 }));
    };

    let mut form = Form::new()
        .text("name", update.name.trim().to_string())
        .text("department", update.department.trim().to_string())
        .text("batch", update.batch.trim().to_string());

    if let Some(picture) = &update.picture {
        let part = Part::bytes(picture.bytes.clone())
            .file_name(picture.file_name.clone())
            .mime_str(&picture.mime)
            .map_err(|err| AppError::Serialization(format!("Invalid picture type: {err}")))?;
        form = form.part("profile_picture", part);
    }

    let result: Result<Value, AppError> = api
        .send_form(Method::PUT, ME_PATH, form, Some(&token))
        .await;
    store.enforce(result)?;
    info!("profile updated");
    Ok(())
}
