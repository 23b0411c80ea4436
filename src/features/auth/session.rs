//! Persisted session: the access token and the user record, written and cleared
//! as a pair. This is the single source of truth for "is the caller signed in"
//! and survives reloads through the backing [`KeyValueStore`].

use crate::{
    app_lib::{AppError, storage::KeyValueStore},
    features::auth::types::UserRecord,
};
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, sync::Arc};
use tracing::{debug, info, warn};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USER_KEY: &str = "user";
/// Never written by this client; removed on clear so stale values cannot linger.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// A token and its user, as returned by login.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: SecretString,
    pub user: UserRecord,
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Persists token and user together. If the token cannot be written the
    /// user record is rolled back so neither half is left behind.
    pub fn set_session(&self, token: &SecretString, user: &UserRecord) {
        let user_json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(err) => {
                warn!("failed to encode user record: {err}");
                return;
            }
        };

        if let Err(err) = self.storage.set(USER_KEY, &user_json) {
            warn!("failed to persist user record: {err}");
            return;
        }

        if let Err(err) = self.storage.set(ACCESS_TOKEN_KEY, token.expose_secret()) {
            warn!("failed to persist access token: {err}");
            if let Err(err) = self.storage.remove(USER_KEY) {
                warn!("failed to roll back user record: {err}");
            }
            return;
        }

        info!("session established");
    }

    /// Convenience for [`Self::set_session`] with a login result.
    pub fn store(&self, session: &Session) {
        self.set_session(&session.token, &session.user);
    }

    /// The stored token, if any. Blank values count as absent.
    #[must_use]
    pub fn get_token(&self) -> Option<SecretString> {
        match self.storage.get(ACCESS_TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => Some(SecretString::from(token)),
            Ok(_) => None,
            Err(err) => {
                warn!("failed to read access token: {err}");
                None
            }
        }
    }

    /// The stored user; only meaningful while a token is present.
    #[must_use]
    pub fn user(&self) -> Option<UserRecord> {
        self.get_token()?;

        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("failed to read user record: {err}");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .inspect_err(|err| warn!("stored user record is unreadable: {err}"))
            .ok()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Removes token and user. Clearing an empty session is a no-op.
    pub fn clear_session(&self) {
        for key in [ACCESS_TOKEN_KEY, USER_KEY, REFRESH_TOKEN_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!("failed to remove {key}: {err}");
            }
        }
        debug!("session cleared");
    }

    /// Passes `result` through, clearing the session first when it carries an
    /// authorization failure. Every bearer-authenticated call goes through here.
    ///
    /// # Errors
    /// Returns the error from `result` unchanged.
    pub fn enforce<T>(&self, result: Result<T, AppError>) -> Result<T, AppError> {
        if let Err(err) = &result {
            if err.is_unauthorized() {
                info!("authorization rejected by backend; clearing session");
                self.clear_session();
            }
        }
        result
    }
}
