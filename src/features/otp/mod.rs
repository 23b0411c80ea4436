//! Email OTP verification: the fixed-length code buffer, the resend cooldown,
//! the pending-registration marker and the controller that ties them to the
//! backend calls. All state transitions are plain functions so they can be
//! driven by the views or by tests without a UI harness.

pub mod client;
pub mod code;
pub mod controller;
pub mod cooldown;
pub mod pending;
pub mod types;

pub use code::{OTP_LENGTH, OtpEvent, OtpInput};
pub use controller::{OtpController, OtpSettings, OtpStart, Phase};
pub use cooldown::{CooldownTimer, Countdown};
pub use pending::PendingRegistration;
