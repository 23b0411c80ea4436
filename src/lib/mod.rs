//! Shared client utilities: backend access, configuration, errors, logging,
//! durable storage and navigation targets.
//!
//! ## Core Flows
//!
//! ### Registration & OTP Verification
//!
//! 1. **Register:** The client POSTs a multipart form to `/accounts/register/` and
//!    remembers the email as a pending registration.
//! 2. **Verify:** The user types or pastes the 6-digit code, which is POSTed with the
//!    email to `/accounts/verify-otp/`. Resends go to `/accounts/resend-otp/` and are
//!    throttled by a cooldown.
//! 3. **Login:** Credentials are POSTed to `/accounts/login/`; the returned token and
//!    user record are persisted together in the session store.
//!
//! ### Guarded Views
//!
//! Profile views require a stored token. A 401/403 from any bearer-authenticated
//! call clears the session and sends the user back to the login view.
//!
//! These utilities never log tokens or passwords; callers must keep it that way.

pub mod api;
pub mod build_info;
pub mod config;
pub mod errors;
pub mod logging;
pub mod navigation;
pub mod storage;

pub use api::ApiClient;
pub use errors::AppError;
pub use navigation::{Navigation, ScheduledNavigation, paths};
