//! OTP entry state machine.
//!
//! The controller never performs I/O. Commands that need the backend
//! ([`OtpController::submit`], [`OtpController::request_resend`]) hand back the
//! request to send and flip the matching in-flight latch; the caller reports the
//! outcome through the `*_succeeded` / `*_failed` methods. The view and the
//! integration tests drive it the same way.

use crate::{
    app_lib::{
        AppError,
        config::AppConfig,
        navigation::{Navigation, ScheduledNavigation, paths},
    },
    features::otp::{
        code::{OTP_LENGTH, OtpEvent, OtpInput},
        cooldown::Countdown,
        pending::PendingRegistration,
        types::{ResendOtpRequest, VerifyOtpRequest},
    },
};
use std::time::Duration;
use tracing::{debug, info};

pub const INCOMPLETE_CODE: &str = "Please enter a valid 6-digit OTP";
pub const PASTE_WITHOUT_DIGITS: &str = "Pasted text contains no digits.";
pub const VERIFY_FALLBACK: &str = "Invalid OTP. Please try again.";
pub const RESEND_FALLBACK: &str = "Failed to resend OTP. Please try again.";
pub const VERIFIED_NOTICE: &str = "OTP verified successfully! Redirecting to login...";
pub const RESENT_NOTICE: &str = "New OTP sent to your email!";
pub const LOGIN_FLASH: &str = "Registration successful! Please login.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtpSettings {
    pub cooldown_secs: u32,
    pub redirect_delay: Duration,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            cooldown_secs: 30,
            redirect_delay: Duration::from_millis(2_000),
        }
    }
}

impl OtpSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cooldown_secs: config.resend_cooldown_secs,
            redirect_delay: config.redirect_delay(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
    Verified,
}

/// Result of mounting the OTP step.
#[derive(Debug)]
pub enum OtpStart {
    Ready(OtpController),
    /// No email to verify; send the user back to registration.
    Redirect(Navigation),
}

#[derive(Clone, Debug)]
pub struct OtpController {
    email: String,
    input: OtpInput,
    phase: Phase,
    cooldown: Countdown,
    resend_in_flight: bool,
    error: Option<String>,
    notice: Option<String>,
    settings: OtpSettings,
}

impl OtpController {
    /// Seeds the controller from the navigation email, falling back to the
    /// pending-registration marker. A navigation email is remembered so a
    /// reload lands back here.
    #[must_use]
    pub fn start(
        navigation_email: Option<&str>,
        pending: &PendingRegistration,
        settings: OtpSettings,
    ) -> OtpStart {
        let from_navigation = navigation_email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string);

        let email = match from_navigation {
            Some(email) => {
                pending.remember(&email);
                email
            }
            None => match pending.email() {
                Some(email) => email,
                None => {
                    info!("no pending registration; redirecting to register");
                    return OtpStart::Redirect(Navigation::replace(paths::REGISTER));
                }
            },
        };

        OtpStart::Ready(Self {
            email,
            input: OtpInput::new(),
            phase: Phase::Editing,
            cooldown: Countdown::default(),
            resend_in_flight: false,
            error: None,
            notice: None,
            settings,
        })
    }

    /// Applies a keyboard or paste event. Edits are only accepted while editing;
    /// any accepted edit clears a shown error.
    pub fn handle(&mut self, event: OtpEvent) {
        if self.phase != Phase::Editing {
            return;
        }

        if matches!(&event, OtpEvent::Paste(text) if !text.chars().any(|c| c.is_ascii_digit())) {
            self.error = Some(PASTE_WITHOUT_DIGITS.to_string());
            return;
        }

        let before = self.input.clone();
        self.input.apply(&event);
        if self.input != before {
            self.error = None;
        }
    }

    /// Starts verification when the code is complete. Returns `None`, without
    /// issuing anything, for an incomplete code or while a submit is pending.
    pub fn submit(&mut self) -> Option<VerifyOtpRequest> {
        if self.phase != Phase::Editing {
            return None;
        }

        let Some(otp) = self.input.code() else {
            self.error = Some(INCOMPLETE_CODE.to_string());
            return None;
        };

        self.phase = Phase::Submitting;
        self.error = None;
        self.notice = None;
        debug!("submitting otp");
        Some(VerifyOtpRequest {
            email: self.email.clone(),
            otp,
        })
    }

    /// Marks the code verified, clears the pending marker and returns the
    /// delayed hop to login.
    pub fn verify_succeeded(&mut self, pending: &PendingRegistration) -> ScheduledNavigation {
        self.phase = Phase::Verified;
        self.error = None;
        self.notice = Some(VERIFIED_NOTICE.to_string());
        pending.clear();
        info!("otp verified");

        ScheduledNavigation {
            delay: self.settings.redirect_delay,
            navigation: Navigation::push(paths::LOGIN).with_flash(LOGIN_FLASH),
        }
    }

    /// Back to editing with the backend's message; the entered code is kept.
    pub fn verify_failed(&mut self, err: &AppError) {
        self.phase = Phase::Editing;
        self.notice = None;
        self.error = Some(err.user_message(VERIFY_FALLBACK));
    }

    /// Returns the resend request while the code is editable and no cooldown or
    /// other resend is active.
    pub fn request_resend(&mut self) -> Option<ResendOtpRequest> {
        if !self.can_resend() {
            return None;
        }

        self.resend_in_flight = true;
        self.error = None;
        Some(ResendOtpRequest {
            email: self.email.clone(),
        })
    }

    /// Empties the code, focuses the first slot and starts the cooldown.
    pub fn resend_succeeded(&mut self) {
        self.resend_in_flight = false;
        self.input.apply(&OtpEvent::Reset);
        self.cooldown.start(self.settings.cooldown_secs);
        self.error = None;
        self.notice = Some(RESENT_NOTICE.to_string());
        info!(cooldown = self.settings.cooldown_secs, "otp resent");
    }

    pub fn resend_failed(&mut self, err: &AppError) {
        self.resend_in_flight = false;
        self.notice = None;
        self.error = Some(err.user_message(RESEND_FALLBACK));
    }

    /// One cooldown second elapsed. Returns the seconds still remaining.
    pub fn tick(&mut self) -> u32 {
        self.cooldown.tick()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn input(&self) -> &OtpInput {
        &self.input
    }

    #[must_use]
    pub fn slots(&self) -> [String; OTP_LENGTH] {
        self.input.slots()
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.input.focus()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown.remaining()
    }

    #[must_use]
    pub fn resend_in_flight(&self) -> bool {
        self.resend_in_flight
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing && self.input.is_complete()
    }

    #[must_use]
    pub fn can_resend(&self) -> bool {
        self.phase == Phase::Editing && !self.resend_in_flight && !self.cooldown.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        INCOMPLETE_CODE, LOGIN_FLASH, OtpController, OtpSettings, OtpStart, PASTE_WITHOUT_DIGITS,
        Phase, RESEND_FALLBACK, VERIFY_FALLBACK,
    };
    use crate::{
        app_lib::{
            AppError,
            navigation::{Navigation, paths},
            storage::MemoryStore,
        },
        features::otp::{code::OtpEvent, pending::PendingRegistration},
    };
    use std::{sync::Arc, time::Duration};

    fn pending() -> PendingRegistration {
        PendingRegistration::new(Arc::new(MemoryStore::new()))
    }

    fn ready(pending: &PendingRegistration) -> OtpController {
        match OtpController::start(Some("ada@example.com"), pending, OtpSettings::default()) {
            OtpStart::Ready(controller) => controller,
            OtpStart::Redirect(navigation) => panic!("unexpected redirect to {}", navigation.to),
        }
    }

    fn paste(controller: &mut OtpController, text: &str) {
        controller.handle(OtpEvent::Paste(text.to_string()));
    }

    #[test]
    fn start_without_email_redirects_to_register() {
        match OtpController::start(None, &pending(), OtpSettings::default()) {
            OtpStart::Redirect(navigation) => {
                assert_eq!(navigation, Navigation::replace(paths::REGISTER));
            }
            OtpStart::Ready(_) => panic!("controller started without an email"),
        }
    }

    #[test]
    fn start_prefers_navigation_email_and_remembers_it() {
        let pending = pending();
        pending.remember("old@example.com");
        let controller = ready(&pending);
        assert_eq!(controller.email(), "ada@example.com");
        assert_eq!(pending.email().as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn start_falls_back_to_pending_marker() {
        let pending = pending();
        pending.remember("stored@example.com");
        match OtpController::start(Some("  "), &pending, OtpSettings::default()) {
            OtpStart::Ready(controller) => assert_eq!(controller.email(), "stored@example.com"),
            OtpStart::Redirect(_) => panic!("marker was ignored"),
        }
    }

    #[test]
    fn incomplete_code_is_rejected_locally() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "12345");

        assert_eq!(controller.submit(), None);
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(controller.error(), Some(INCOMPLETE_CODE));

        controller.handle(OtpEvent::Input {
            index: 5,
            value: "6".to_string(),
        });
        assert_eq!(controller.error(), None);
        assert!(controller.can_submit());
    }

    #[test]
    fn gaps_anywhere_block_submit() {
        let pending = pending();
        for gap in 0..6 {
            let mut controller = ready(&pending);
            paste(&mut controller, "123456");
            controller.handle(OtpEvent::Input {
                index: gap,
                value: String::new(),
            });
            assert_eq!(controller.submit(), None, "gap at {gap}");
        }
    }

    #[test]
    fn full_code_is_submitted_once() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "123456");

        let request = controller.submit();
        assert_eq!(
            request.map(|r| (r.email, r.otp)),
            Some(("ada@example.com".to_string(), "123456".to_string()))
        );
        assert_eq!(controller.phase(), Phase::Submitting);
        assert_eq!(controller.submit(), None);
        assert!(!controller.can_submit());
    }

    #[test]
    fn edits_are_ignored_while_submitting() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "123456");
        let _ = controller.submit();

        controller.handle(OtpEvent::Reset);
        assert_eq!(controller.input().code().as_deref(), Some("123456"));
    }

    #[test]
    fn failed_verification_keeps_code_and_shows_backend_text() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "123456");
        let _ = controller.submit();

        controller.verify_failed(&AppError::Rejected {
            status: 400,
            message: "OTP has expired.".to_string(),
        });
        assert_eq!(controller.phase(), Phase::Editing);
        assert_eq!(controller.error(), Some("OTP has expired."));
        assert_eq!(controller.input().code().as_deref(), Some("123456"));

        let _ = controller.submit();
        controller.verify_failed(&AppError::Network("offline".to_string()));
        assert_eq!(controller.error(), Some(VERIFY_FALLBACK));
    }

    #[test]
    fn verified_clears_marker_and_schedules_login() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "123456");
        let _ = controller.submit();

        let scheduled = controller.verify_succeeded(&pending);
        assert_eq!(controller.phase(), Phase::Verified);
        assert!(controller.notice().is_some());
        assert_eq!(pending.email(), None);
        assert_eq!(scheduled.delay, Duration::from_millis(2_000));
        assert_eq!(
            scheduled.navigation,
            Navigation::push(paths::LOGIN).with_flash(LOGIN_FLASH)
        );

        assert!(!controller.can_resend());
        assert_eq!(controller.submit(), None);
    }

    #[test]
    fn paste_without_digits_is_a_validation_error() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "12");
        paste(&mut controller, "abc-def");

        assert_eq!(controller.error(), Some(PASTE_WITHOUT_DIGITS));
        assert_eq!(controller.slots(), ["1", "2", "", "", "", ""]);
    }

    #[test]
    fn resend_resets_code_and_starts_cooldown() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "987");

        let request = controller.request_resend();
        assert_eq!(request.map(|r| r.email).as_deref(), Some("ada@example.com"));
        assert!(controller.resend_in_flight());
        assert_eq!(controller.request_resend(), None);

        controller.resend_succeeded();
        assert_eq!(controller.slots(), ["", "", "", "", "", ""]);
        assert_eq!(controller.focus(), 0);
        assert_eq!(controller.cooldown_remaining(), 30);
        assert!(!controller.can_resend());
        assert_eq!(controller.request_resend(), None);
    }

    #[test]
    fn resend_is_blocked_while_a_code_is_being_verified() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "123456");
        assert!(controller.submit().is_some());

        assert_eq!(controller.phase(), Phase::Submitting);
        assert!(!controller.can_resend());
        assert_eq!(controller.request_resend(), None);

        controller.verify_failed(&AppError::Network("down".to_string()));
        assert_eq!(controller.slots(), ["1", "2", "3", "4", "5", "6"]);
        assert!(controller.can_resend());
    }

    #[test]
    fn cooldown_counts_down_to_zero_and_reenables_resend() {
        let pending = pending();
        let mut controller = ready(&pending);
        let _ = controller.request_resend();
        controller.resend_succeeded();

        let mut previous = controller.cooldown_remaining();
        while controller.cooldown_remaining() > 0 {
            assert!(!controller.can_resend());
            let remaining = controller.tick();
            assert_eq!(remaining, previous - 1);
            previous = remaining;
        }
        assert_eq!(controller.tick(), 0);
        assert!(controller.can_resend());
    }

    #[test]
    fn failed_resend_does_not_start_cooldown() {
        let pending = pending();
        let mut controller = ready(&pending);
        paste(&mut controller, "12");
        let _ = controller.request_resend();

        controller.resend_failed(&AppError::Timeout("slow".to_string()));
        assert_eq!(controller.error(), Some(RESEND_FALLBACK));
        assert_eq!(controller.cooldown_remaining(), 0);
        assert!(controller.can_resend());
        assert_eq!(controller.slots(), ["1", "2", "", "", "", ""]);
    }

    #[test]
    fn configured_cooldown_is_used() {
        let pending = pending();
        let settings = OtpSettings {
            cooldown_secs: 5,
            redirect_delay: Duration::from_millis(10),
        };
        let OtpStart::Ready(mut controller) =
            OtpController::start(Some("ada@example.com"), &pending, settings)
        else {
            panic!("expected controller");
        };
        let _ = controller.request_resend();
        controller.resend_succeeded();
        assert_eq!(controller.cooldown_remaining(), 5);
    }
}
