use crate::{
    app_lib::{ApiClient, AppError, Navigation, ScheduledNavigation, config::AppConfig, paths},
    components::{Alert, AlertKind, AppShell, Button, Spinner},
    features::{
        auth::{guards, state::use_auth},
        profile::{
            LOAD_FALLBACK, ProfilePicture, ProfileUpdate, UPDATE_FALLBACK, UPDATED_NOTICE, client,
        },
    },
    routes::use_flow,
};
use js_sys::Uint8Array;
use leptos::{
    ev::{Event, SubmitEvent},
    leptos_dom::helpers::TimeoutHandle,
    prelude::*,
    task::spawn_local,
};
use leptos_router::components::A;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

const INPUT_CLASS: &str = "block w-full rounded-lg border border-gray-600 bg-gray-800 p-2.5 text-sm text-white focus:border-indigo-500 focus:ring-indigo-500";
const LABEL_CLASS: &str = "mb-2 block text-sm font-medium text-gray-300";

#[component]
pub fn UpdateProfilePage() -> impl IntoView {
    let auth = use_auth();
    let flow = use_flow();
    let (name, set_name) = signal(String::new());
    let (department, set_department) = signal(String::new());
    let (batch, set_batch) = signal(String::new());
    let (picture, set_picture) = signal::<Option<ProfilePicture>>(None);
    let (loaded, set_loaded) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let redirect: StoredValue<Option<TimeoutHandle>> = StoredValue::new(None);

    on_cleanup(move || {
        if let Some(handle) = redirect.try_get_value().flatten() {
            handle.clear();
        }
    });

    let load_store = auth.store.clone();
    let current = LocalResource::new(move || {
        let store = load_store.clone();
        async move {
            let api = ApiClient::new(&AppConfig::load())?;
            client::fetch_profile(&api, &store).await
        }
    });

    let update_store = auth.store.clone();
    let update_action = Action::new_local(move |update: &ProfileUpdate| {
        let update = update.clone();
        let store = update_store.clone();
        async move {
            let api = ApiClient::new(&AppConfig::load())?;
            client::update_profile(&api, &store, &update).await
        }
    });

    let expiry_auth = auth.clone();
    let on_expired = move |err: &AppError| -> bool {
        match guards::session_expired(&expiry_auth.store, err) {
            Some(navigation) => {
                expiry_auth.refresh();
                flow.go(navigation);
                true
            }
            None => false,
        }
    };

    let on_load_expired = on_expired.clone();
    Effect::new(move |_| match current.get() {
        Some(Ok(profile)) if !loaded.get_untracked() => {
            let form = ProfileUpdate::from_profile(&profile);
            set_name.set(form.name);
            set_department.set(form.department);
            set_batch.set(form.batch);
            set_loaded.set(true);
        }
        Some(Err(err)) if !on_load_expired(&err) => set_error.set(Some(LOAD_FALLBACK.to_string())),
        _ => {}
    });

    Effect::new(move |_| {
        if let Some(result) = update_action.value().get() {
            match result {
                Ok(()) => {
                    set_notice.set(Some(UPDATED_NOTICE.to_string()));
                    let scheduled = ScheduledNavigation {
                        delay: AppConfig::load().redirect_delay(),
                        navigation: Navigation::push(paths::PROFILE),
                    };
                    redirect.set_value(flow.schedule(scheduled));
                }
                Err(err) if !on_expired(&err) => {
                    let message = match err {
                        AppError::Validation(message) => message,
                        _ => UPDATE_FALLBACK.to_string(),
                    };
                    set_error.set(Some(message));
                }
                Err(_) => {}
            }
        }
    });

    let on_picture = move |event: Event| {
        let file = event_target::<HtmlInputElement>(&event)
            .files()
            .and_then(|files| files.get(0));
        let Some(file) = file else {
            set_picture.set(None);
            return;
        };
        spawn_local(async move {
            match read_picture(file).await {
                Ok(selected) => set_picture.set(Some(selected)),
                Err(err) => set_error.set(Some(err.user_message(UPDATE_FALLBACK))),
            }
        });
    };

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        set_notice.set(None);

        let update = ProfileUpdate {
            name: name.get_untracked(),
            department: department.get_untracked(),
            batch: batch.get_untracked(),
            picture: picture.get_untracked(),
        };
        if let Err(err) = update.validate() {
            set_error.set(Some(err.user_message(UPDATE_FALLBACK)));
            return;
        }

        update_action.dispatch(update);
    };

    let busy = Signal::derive(move || update_action.pending().get() || notice.get().is_some());

    view! {
        <AppShell>
            <form class="mx-auto max-w-md space-y-5" on:submit=on_submit>
                <h1 class="text-2xl font-semibold text-white">"Edit profile"</h1>
                <Show
                    when=move || loaded.get()
                    fallback=move || {
                        (error.get().is_none())
                            .then_some(view! { <div class="flex justify-center"><Spinner /></div> })
                    }
                >
                    <div>
                        <label class=LABEL_CLASS for="name">"Full name"</label>
                        <input
                            id="name"
                            type="text"
                            class=INPUT_CLASS
                            prop:value=move || name.get()
                            on:input=move |event| set_name.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label class=LABEL_CLASS for="department">"Department"</label>
                        <input
                            id="department"
                            type="text"
                            class=INPUT_CLASS
                            prop:value=move || department.get()
                            on:input=move |event| set_department.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label class=LABEL_CLASS for="batch">"Batch"</label>
                        <input
                            id="batch"
                            type="text"
                            class=INPUT_CLASS
                            prop:value=move || batch.get()
                            on:input=move |event| set_batch.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label class=LABEL_CLASS for="profile_picture">"Profile picture"</label>
                        <input
                            id="profile_picture"
                            type="file"
                            accept="image/*"
                            class="block w-full text-sm text-gray-300"
                            on:change=on_picture
                        />
                        {move || {
                            picture
                                .get()
                                .map(|selected| {
                                    view! {
                                        <p class="mt-1 text-xs text-gray-400">{selected.file_name}</p>
                                    }
                                })
                        }}
                    </div>
                    <Button button_type="submit" disabled=busy>
                        "Save changes"
                    </Button>
                </Show>
                {move || {
                    update_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="flex justify-center"><Spinner /></div> })
                }}
                {move || {
                    notice.get().map(|message| view! { <Alert kind=AlertKind::Success message=message /> })
                }}
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <p class="text-center text-sm">
                    <A href=paths::PROFILE {..} class="text-indigo-400 hover:underline">
                        "Back to profile"
                    </A>
                </p>
            </form>
        </AppShell>
    }
}

async fn read_picture(file: File) -> Result<ProfilePicture, AppError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| AppError::Validation("Could not read the selected picture.".to_string()))?;
    let mime = match file.type_() {
        mime if mime.trim().is_empty() => "application/octet-stream".to_string(),
        mime => mime,
    };

    Ok(ProfilePicture {
        file_name: file.name(),
        mime,
        bytes: Uint8Array::new(&buffer).to_vec(),
    })
}
