//! Signed-in profile: view and edit the current user's record.

pub mod client;
pub mod types;

pub use types::{Profile, ProfilePicture, ProfileUpdate};

use crate::app_lib::AppError;

/// Shown when the profile cannot be loaded for a reason other than expiry.
pub const LOAD_FALLBACK: &str = "Failed to load profile data.";
pub const UPDATE_FALLBACK: &str = "Failed to update profile. Please check your inputs.";
pub const UPDATED_NOTICE: &str = "Profile updated successfully! Redirecting...";

/// Message for a failed profile load. Authorization failures have none: they
/// end in the expiry redirect instead of an inline error.
#[must_use]
pub fn load_failure_message(err: &AppError) -> Option<&'static str> {
    (!err.is_unauthorized()).then_some(LOAD_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::{LOAD_FALLBACK, load_failure_message};
    use crate::app_lib::AppError;

    #[test]
    fn expired_session_shows_no_load_error() {
        for status in [401, 403] {
            assert_eq!(load_failure_message(&AppError::Unauthorized { status }), None);
        }
    }

    #[test]
    fn other_load_failures_show_fallback() {
        let rejected = AppError::Rejected {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(load_failure_message(&rejected), Some(LOAD_FALLBACK));
        assert_eq!(
            load_failure_message(&AppError::Network("down".to_string())),
            Some(LOAD_FALLBACK)
        );
    }
}
