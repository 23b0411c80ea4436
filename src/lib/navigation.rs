//! Navigation requests produced by the core flows. Views translate a
//! [`Navigation`] into a router call; the core never touches the router.

use std::time::Duration;

pub mod paths {
    pub const HOME: &str = "/";
    pub const REGISTER: &str = "/register";
    pub const OTP: &str = "/otp";
    pub const LOGIN: &str = "/login";
    pub const PROFILE: &str = "/profile";
    pub const UPDATE_PROFILE: &str = "/updateprofile";
}

/// Where to go next and what to carry along.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub to: &'static str,
    /// Replace the current history entry so "back" does not return here.
    pub replace: bool,
    /// One-shot message for the destination view.
    pub flash: Option<String>,
    /// Email handed to the destination view (registration to OTP).
    pub email: Option<String>,
}

impl Navigation {
    #[must_use]
    pub fn push(to: &'static str) -> Self {
        Self {
            to,
            replace: false,
            flash: None,
            email: None,
        }
    }

    #[must_use]
    pub fn replace(to: &'static str) -> Self {
        Self {
            replace: true,
            ..Self::push(to)
        }
    }

    #[must_use]
    pub fn with_flash(mut self, message: impl Into<String>) -> Self {
        self.flash = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A navigation to follow once `delay` has elapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledNavigation {
    pub delay: Duration,
    pub navigation: Navigation,
}
