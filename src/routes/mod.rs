//! Route table and the bridge from core [`Navigation`] values to the router.
//!
//! Views never call the router directly: they hand a [`Navigation`] to
//! [`Flow::go`] (or [`Flow::schedule`] for delayed hops) and the single
//! `Navigator` inside the router follows it, carrying any flash message or
//! email to the destination.

mod home;
mod login;
mod not_found;
mod otp;
mod profile;
mod register;
mod update_profile;

pub(crate) use home::HomePage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use otp::OtpPage;
pub(crate) use profile::ProfilePage;
pub(crate) use register::RegisterPage;
pub(crate) use update_profile::UpdateProfilePage;

use crate::{
    app_lib::{Navigation, ScheduledNavigation},
    features::auth::guards::RequireAuth,
};
use leptos::{
    leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle},
    prelude::*,
};
use leptos_router::{
    NavigateOptions,
    components::{Route, Routes},
    hooks::use_navigate,
    path,
};
use tracing::{debug, warn};

/// Pending navigation plus the one-shot values handed to the next view.
#[derive(Clone, Copy)]
pub(crate) struct Flow {
    pending: RwSignal<Option<Navigation>>,
    flash: RwSignal<Option<String>>,
    email: RwSignal<Option<String>>,
}

impl Flow {
    fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
            flash: RwSignal::new(None),
            email: RwSignal::new(None),
        }
    }

    pub(crate) fn go(&self, navigation: Navigation) {
        self.pending.set(Some(navigation));
    }

    /// Follows `scheduled` after its delay. Dropping the handle does not cancel
    /// it; callers clear it on teardown.
    pub(crate) fn schedule(&self, scheduled: ScheduledNavigation) -> Option<TimeoutHandle> {
        let flow = *self;
        let ScheduledNavigation { delay, navigation } = scheduled;
        set_timeout_with_handle(move || flow.go(navigation), delay)
            .inspect_err(|_| warn!("failed to schedule navigation"))
            .ok()
    }

    /// The flash message carried by the last navigation, once.
    pub(crate) fn take_flash(&self) -> Option<String> {
        self.flash.try_update_untracked(Option::take).flatten()
    }

    /// The email carried by the last navigation, once.
    pub(crate) fn take_email(&self) -> Option<String> {
        self.email.try_update_untracked(Option::take).flatten()
    }
}

pub(crate) fn use_flow() -> Flow {
    use_context::<Flow>().unwrap_or_else(|| {
        let flow = Flow::new();
        provide_context(flow);
        flow
    })
}

#[component]
fn Navigator() -> impl IntoView {
    let flow = use_flow();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let Some(navigation) = flow.pending.get() else {
            return;
        };
        flow.pending.set(None);
        flow.flash.set(navigation.flash);
        flow.email.set(navigation.email);
        debug!(to = navigation.to, replace = navigation.replace, "navigating");
        navigate(
            navigation.to,
            NavigateOptions {
                replace: navigation.replace,
                ..Default::default()
            },
        );
    });
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    provide_context(Flow::new());

    view! {
        <Navigator />
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/register") view=RegisterPage />
            <Route path=path!("/otp") view=OtpPage />
            <Route path=path!("/login") view=LoginPage />
            <Route
                path=path!("/profile")
                view=|| view! { <RequireAuth><ProfilePage /></RequireAuth> }
            />
            <Route
                path=path!("/updateprofile")
                view=|| view! { <RequireAuth><UpdateProfilePage /></RequireAuth> }
            />
        </Routes>
    }
}
