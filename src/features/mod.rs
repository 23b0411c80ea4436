//! Domain-level features (auth, OTP verification, profile) and their shared
//! logic. Views import these modules so they stay focused on markup while
//! session handling and backend calls live in dedicated feature areas.

pub mod auth;
pub mod otp;
pub mod profile;
