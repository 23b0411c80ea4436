//! Auth feature covering registration, login, the persisted session and the
//! authenticated-route guard. It keeps session handling out of the views and
//! touches security boundaries: never log tokens or passwords.
//!
//! Flow Overview: Registration submits the account form and hands the email to
//! the OTP step. Login exchanges credentials for a token and user record that
//! are stored together. Guarded views consult the stored token before
//! rendering, and any 401/403 on an authenticated call clears the session.

pub mod client;
pub mod guards;
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod state;
pub mod types;

pub use session::{Session, SessionStore};
