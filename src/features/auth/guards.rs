//! Authenticated-route guard. The check is synchronous and runs once per
//! navigation to a guarded path: a stored token allows rendering, anything
//! else redirects to login replacing the history entry. Token validity is not
//! inspected here; the backend answers 401/403 and [`session_expired`] handles
//! that path. UX-only: real access control lives on the API.

use crate::{
    app_lib::{AppError, Navigation, paths},
    features::auth::session::SessionStore,
};
use tracing::{debug, info};

/// Terminal result of a guarded navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allowed,
    Denied(Navigation),
}

impl GuardOutcome {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allowed)
    }
}

/// Decides whether `path` may render given the current session.
#[must_use]
pub fn check(store: &SessionStore, path: &str) -> GuardOutcome {
    if store.get_token().is_some() {
        debug!(path, "guard allowed navigation");
        GuardOutcome::Allowed
    } else {
        info!(path, "guard denied navigation; redirecting to login");
        GuardOutcome::Denied(Navigation::replace(paths::LOGIN))
    }
}

/// Secondary enforcement path: on an authorization failure make sure the
/// session is gone and return the redirect to login. Other errors return
/// `None` and are shown in place.
pub fn session_expired(store: &SessionStore, err: &AppError) -> Option<Navigation> {
    if !err.is_unauthorized() {
        return None;
    }
    store.clear_session();
    Some(Navigation::replace(paths::LOGIN))
}

/// Logs out and returns where to go next.
pub fn logout(store: &SessionStore) -> Navigation {
    store.clear_session();
    Navigation::push(paths::LOGIN)
}

#[cfg(target_arch = "wasm32")]
pub use view::RequireAuth;

#[cfg(target_arch = "wasm32")]
mod view {
    use super::{GuardOutcome, check};
    use crate::features::auth::state::use_auth;
    use leptos::prelude::*;
    use leptos_router::{NavigateOptions, hooks::use_location, hooks::use_navigate};

    /// Renders `children` only when a session token is stored.
    #[component]
    pub fn RequireAuth(children: Children) -> impl IntoView {
        let auth = use_auth();
        let path = use_location().pathname.get_untracked();

        match check(&auth.store, &path) {
            GuardOutcome::Allowed => children().into_any(),
            GuardOutcome::Denied(navigation) => {
                let navigate = use_navigate();
                Effect::new(move |_| {
                    navigate(
                        navigation.to,
                        NavigateOptions {
                            replace: navigation.replace,
                            ..Default::default()
                        },
                    );
                });
                ().into_any()
            }
        }
    }
}
