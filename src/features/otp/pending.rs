//! Durable record of the email awaiting OTP verification, so the OTP step
//! survives a reload between registration and verification.

use crate::app_lib::{
    navigation::{Navigation, ScheduledNavigation, paths},
    storage::KeyValueStore,
};
use std::{sync::Arc, time::Duration};
use tracing::warn;

pub const PENDING_EMAIL_KEY: &str = "registrationEmail";

#[derive(Clone)]
pub struct PendingRegistration {
    storage: Arc<dyn KeyValueStore>,
}

impl PendingRegistration {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn remember(&self, email: &str) {
        let email = email.trim();
        if email.is_empty() {
            return;
        }
        if let Err(err) = self.storage.set(PENDING_EMAIL_KEY, email) {
            warn!("failed to persist pending registration: {err}");
        }
    }

    /// Called once registration is accepted: remembers `email` and returns the
    /// delayed hop to the OTP step carrying it.
    pub fn begin(&self, email: &str, delay: Duration) -> ScheduledNavigation {
        self.remember(email);
        ScheduledNavigation {
            delay,
            navigation: Navigation::push(paths::OTP).with_email(email.trim()),
        }
    }

    #[must_use]
    pub fn email(&self) -> Option<String> {
        match self.storage.get(PENDING_EMAIL_KEY) {
            Ok(value) => value.filter(|email| !email.trim().is_empty()),
            Err(err) => {
                warn!("failed to read pending registration: {err}");
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.storage.remove(PENDING_EMAIL_KEY) {
            warn!("failed to clear pending registration: {err}");
        }
    }
}
