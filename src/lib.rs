//! Alumni network web client.
//!
//! `app_lib` and `features` hold the platform-independent core (storage,
//! session, route guard, OTP controller, backend gateway) and build on every
//! target. The Leptos views in `app`, `components` and `routes` only build for
//! `wasm32`.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod routes;

#[cfg(target_arch = "wasm32")]
pub use app::App;
