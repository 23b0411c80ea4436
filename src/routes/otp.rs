//! OTP verification view. All state lives in [`OtpController`]; this page only
//! forwards input events, dispatches the requests the controller hands out and
//! owns the timers, which are cancelled when the page is torn down.

use crate::{
    app_lib::{ApiClient, config::AppConfig, storage::BrowserStore},
    components::{Alert, AlertKind, AppShell, Button, OtpInputs, Spinner},
    features::otp::{
        CooldownTimer, OtpController, OtpEvent, OtpSettings, OtpStart, PendingRegistration, Phase,
        client,
        types::{ResendOtpRequest, VerifyOtpRequest},
    },
    routes::use_flow,
};
use leptos::{ev::SubmitEvent, leptos_dom::helpers::TimeoutHandle, prelude::*};
use std::sync::Arc;
use tracing::warn;

#[component]
pub fn OtpPage() -> impl IntoView {
    let flow = use_flow();
    let config = AppConfig::load();
    let pending = PendingRegistration::new(Arc::new(BrowserStore));

    let controller = match OtpController::start(
        flow.take_email().as_deref(),
        &pending,
        OtpSettings::from_config(&config),
    ) {
        OtpStart::Ready(controller) => controller,
        OtpStart::Redirect(navigation) => {
            flow.go(navigation);
            return ().into_any();
        }
    };

    let state = RwSignal::new(controller);
    let cooldown: StoredValue<Option<CooldownTimer>, LocalStorage> = StoredValue::new_local(None);
    let redirect: StoredValue<Option<TimeoutHandle>> = StoredValue::new(None);

    on_cleanup(move || {
        let _ = cooldown.try_update_value(Option::take);
        if let Some(handle) = redirect.try_get_value().flatten() {
            handle.clear();
        }
    });

    let verify_action = Action::new_local(move |request: &VerifyOtpRequest| {
        let request = request.clone();
        async move {
            let api = ApiClient::new(&AppConfig::load())?;
            client::verify_otp(&api, &request).await
        }
    });

    let resend_action = Action::new_local(move |request: &ResendOtpRequest| {
        let request = request.clone();
        async move {
            let api = ApiClient::new(&AppConfig::load())?;
            client::resend_otp(&api, &request).await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
            match result {
                Ok(_) => {
                    let scheduled = state
                        .try_update(|controller| controller.verify_succeeded(&pending));
                    if let Some(scheduled) = scheduled {
                        redirect.set_value(flow.schedule(scheduled));
                    }
                }
                Err(err) => state.update(|controller| controller.verify_failed(&err)),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = resend_action.value().get() {
            match result {
                Ok(_) => {
                    state.update(OtpController::resend_succeeded);
                    let timer = CooldownTimer::start(move || {
                        state
                            .try_update(|controller| controller.tick() > 0)
                            .unwrap_or(false)
                    });
                    match timer {
                        Ok(timer) => cooldown.set_value(Some(timer)),
                        Err(err) => warn!("failed to start resend cooldown: {err}"),
                    }
                }
                Err(err) => state.update(|controller| controller.resend_failed(&err)),
            }
        }
    });

    let on_event = Callback::new(move |event: OtpEvent| {
        state.update(|controller| controller.handle(event));
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        if let Some(request) = state.try_update(OtpController::submit).flatten() {
            verify_action.dispatch(request);
        }
    };

    let on_resend = move |_| {
        if let Some(request) = state.try_update(OtpController::request_resend).flatten() {
            resend_action.dispatch(request);
        }
    };

    let email = state.with_untracked(|controller| controller.email().to_string());
    let slots = Signal::derive(move || state.with(OtpController::slots));
    let focus = Signal::derive(move || state.with(OtpController::focus));
    let locked = Signal::derive(move || state.with(|controller| controller.phase() != Phase::Editing));
    let cannot_submit = Signal::derive(move || state.with(|controller| !controller.can_submit()));
    let cannot_resend = Signal::derive(move || state.with(|controller| !controller.can_resend()));

    view! {
        <AppShell>
            <form class="mx-auto max-w-md space-y-6 text-center" on:submit=on_submit>
                <div>
                    <h1 class="text-2xl font-semibold text-white">"Verify your email"</h1>
                    <p class="mt-2 text-sm text-gray-400">
                        "Enter the 6-digit code sent to "
                        <span class="font-medium text-indigo-300">{email}</span>
                    </p>
                </div>
                <OtpInputs slots=slots focus=focus disabled=locked on_event=on_event />
                <Button button_type="submit" disabled=cannot_submit>
                    "Verify OTP"
                </Button>
                {move || {
                    (state.with(OtpController::phase) == Phase::Submitting)
                        .then_some(view! { <div class="flex justify-center"><Spinner /></div> })
                }}
                {move || {
                    state
                        .with(|controller| controller.notice().map(str::to_string))
                        .map(|message| view! { <Alert kind=AlertKind::Success message=message /> })
                }}
                {move || {
                    state
                        .with(|controller| controller.error().map(str::to_string))
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <div class="text-sm text-gray-400">
                    {move || {
                        let remaining = state.with(OtpController::cooldown_remaining);
                        if remaining > 0 {
                            format!("You can request a new code in {remaining}s")
                        } else {
                            "Didn't receive the code?".to_string()
                        }
                    }}
                    <button
                        type="button"
                        class="ml-2 font-medium text-indigo-400 hover:underline disabled:cursor-not-allowed disabled:opacity-50"
                        disabled=move || cannot_resend.get()
                        on:click=on_resend
                    >
                        {move || {
                            if state.with(OtpController::resend_in_flight) {
                                "Sending..."
                            } else {
                                "Resend OTP"
                            }
                        }}
                    </button>
                </div>
            </form>
        </AppShell>
    }
    .into_any()
}
