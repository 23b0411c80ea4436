use crate::{
    app_lib::{ApiClient, config::AppConfig, paths},
    components::{Alert, AlertKind, AppShell, Spinner},
    features::{
        auth::{guards, state::use_auth},
        profile::{Profile, client, load_failure_message},
    },
    routes::use_flow,
};
use leptos::prelude::*;
use leptos_router::components::A;

const DEFAULT_PICTURE: &str = "/default-avatar.svg";
const BADGE_OK: &str = "rounded-full bg-emerald-500/20 px-3 py-1 text-emerald-300";
const BADGE_WARN: &str = "rounded-full bg-amber-500/20 px-3 py-1 text-amber-300";

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let flow = use_flow();
    let store = auth.store.clone();

    let record = LocalResource::new(move || {
        let store = store.clone();
        async move {
            let api = ApiClient::new(&AppConfig::load())?;
            client::fetch_profile(&api, &store).await
        }
    });

    let expiry_auth = auth.clone();
    Effect::new(move |_| {
        let Some(Err(err)) = record.get() else {
            return;
        };
        if let Some(navigation) = guards::session_expired(&expiry_auth.store, &err) {
            expiry_auth.refresh();
            flow.go(navigation);
        }
    });

    let logout_auth = auth.clone();
    let on_logout = move |_| {
        let navigation = guards::logout(&logout_auth.store);
        logout_auth.refresh();
        flow.go(navigation);
    };

    view! {
        <AppShell>
            <div class="mx-auto max-w-xl rounded-2xl border border-gray-700 bg-gray-800/60 p-8">
                <Suspense fallback=move || view! { <div class="flex justify-center"><Spinner /></div> }>
                    {move || match record.get() {
                        Some(Ok(profile)) => view! { <ProfileCard profile=profile /> }.into_any(),
                        Some(Err(err)) => {
                            load_failure_message(&err)
                                .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                                .into_any()
                        }
                        None => ().into_any(),
                    }}
                </Suspense>
                <div class="mt-8 flex flex-col gap-3 sm:flex-row">
                    <A
                        href=paths::UPDATE_PROFILE
                        {..}
                        class="flex-1 rounded-lg bg-indigo-600 px-5 py-2.5 text-center text-sm font-medium text-white hover:bg-indigo-700"
                    >
                        "Edit Profile"
                    </A>
                    <button
                        type="button"
                        class="flex-1 rounded-lg border border-gray-600 px-5 py-2.5 text-sm font-medium text-gray-200 hover:bg-gray-700"
                        on:click=on_logout
                    >
                        "Logout"
                    </button>
                </div>
            </div>
        </AppShell>
    }
}

#[component]
fn ProfileCard(profile: Profile) -> impl IntoView {
    let picture = profile
        .profile_picture
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PICTURE.to_string());
    let batch = profile.batch_label();
    let (verified_class, verified_label) = if profile.is_verified {
        (BADGE_OK, "Verified")
    } else {
        (BADGE_WARN, "Not verified")
    };
    let (active_class, active_label) = if profile.is_active {
        (BADGE_OK, "Active")
    } else {
        (BADGE_WARN, "Inactive")
    };

    view! {
        <div class="flex flex-col items-center text-center">
            <img
                src=picture
                alt="Profile picture"
                class="h-28 w-28 rounded-full border-4 border-indigo-500 object-cover"
            />
            <h1 class="mt-4 text-2xl font-semibold text-white">{profile.display_name().to_string()}</h1>
            <p class="text-sm capitalize text-indigo-300">{profile.role.clone().unwrap_or_default()}</p>
        </div>
        <dl class="mt-6 space-y-2 text-gray-300">
            <div class="flex justify-between">
                <dt class="text-gray-400">"Email"</dt>
                <dd>{profile.email.clone().unwrap_or_default()}</dd>
            </div>
            <div class="flex justify-between">
                <dt class="text-gray-400">"Student ID"</dt>
                <dd>{profile.student_id.clone().unwrap_or_default()}</dd>
            </div>
            <div class="flex justify-between">
                <dt class="text-gray-400">"Department"</dt>
                <dd>{profile.department_label()}</dd>
            </div>
            <div class="flex justify-between">
                <dt class="text-gray-400">"Batch"</dt>
                <dd>{if batch.is_empty() { "N/A".to_string() } else { batch }}</dd>
            </div>
        </dl>
        <div class="mt-6 flex justify-center gap-2 text-xs font-medium">
            <span class=verified_class>{verified_label}</span>
            <span class=active_class>{active_label}</span>
        </div>
    }
}
