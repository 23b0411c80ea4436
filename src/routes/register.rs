use crate::{
    app_lib::{ApiClient, AppError, config::AppConfig, paths, storage::BrowserStore},
    components::{Alert, AlertKind, AppShell, Button, Spinner},
    features::{
        auth::{
            client,
            types::{RegisterRequest, Role},
        },
        otp::PendingRegistration,
    },
    routes::use_flow,
};
use leptos::{ev::SubmitEvent, leptos_dom::helpers::TimeoutHandle, prelude::*};
use leptos_router::components::A;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::warn;

const INPUT_CLASS: &str = "block w-full rounded-lg border border-gray-600 bg-gray-800 p-2.5 text-sm text-white focus:border-indigo-500 focus:ring-indigo-500";
const LABEL_CLASS: &str = "mb-2 block text-sm font-medium text-gray-300";

#[component]
pub fn RegisterPage() -> impl IntoView {
    let flow = use_flow();
    let (student_id, set_student_id) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(Role::Student);
    let (department, set_department) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let redirect: StoredValue<Option<TimeoutHandle>> = StoredValue::new(None);

    on_cleanup(move || {
        if let Some(handle) = redirect.try_get_value().flatten() {
            handle.clear();
        }
    });

    let departments = LocalResource::new(move || async move {
        let api = ApiClient::new(&AppConfig::load())?;
        client::departments(&api)
            .await
            .inspect_err(|err| warn!("failed to load departments: {err}"))
    });

    let register_action = Action::new_local(move |request: &RegisterRequest| {
        let request = request.clone();
        async move {
            let api = ApiClient::new(&AppConfig::load())?;
            client::register(&api, &request).await?;
            Ok::<_, AppError>(request.email)
        }
    });

    Effect::new(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(email) => {
                    set_notice.set(Some(client::REGISTERED_NOTICE.to_string()));
                    let pending = PendingRegistration::new(Arc::new(BrowserStore));
                    let scheduled = pending.begin(&email, AppConfig::load().redirect_delay());
                    redirect.set_value(flow.schedule(scheduled));
                }
                Err(err) => set_error.set(Some(err.user_message(client::REGISTER_FALLBACK))),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        set_notice.set(None);

        let request = RegisterRequest {
            student_id: student_id.get_untracked(),
            email: email.get_untracked(),
            name: name.get_untracked(),
            password: SecretString::from(password.get_untracked()),
            role: role.get_untracked(),
            department: department.get_untracked(),
        };
        if let Err(err) = request.validate() {
            set_error.set(Some(err.user_message(client::REGISTER_FALLBACK)));
            return;
        }

        register_action.dispatch(request);
    };

    let busy = Signal::derive(move || register_action.pending().get() || notice.get().is_some());

    view! {
        <AppShell>
            <form class="mx-auto max-w-md space-y-5" on:submit=on_submit>
                <h1 class="text-2xl font-semibold text-white">"Create your account"</h1>
                <div>
                    <label class=LABEL_CLASS for="student_id">"Student ID"</label>
                    <input
                        id="student_id"
                        type="text"
                        class=INPUT_CLASS
                        required
                        on:input=move |event| set_student_id.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="name">"Full name"</label>
                    <input
                        id="name"
                        type="text"
                        class=INPUT_CLASS
                        autocomplete="name"
                        required
                        on:input=move |event| set_name.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        class=INPUT_CLASS
                        autocomplete="email"
                        required
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        class=INPUT_CLASS
                        autocomplete="new-password"
                        required
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="role">"Role"</label>
                    <select
                        id="role"
                        class=INPUT_CLASS
                        on:change=move |event| {
                            set_role.set(Role::parse(&event_target_value(&event)).unwrap_or_default());
                        }
                    >
                        {[Role::Student, Role::Teacher]
                            .into_iter()
                            .map(|option| {
                                view! {
                                    <option value=option.as_str() selected=move || role.get() == option>
                                        {option.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
                <div>
                    <label class=LABEL_CLASS for="department">"Department"</label>
                    <select
                        id="department"
                        class=INPUT_CLASS
                        required
                        on:change=move |event| set_department.set(event_target_value(&event))
                    >
                        <option value="">"Select a department"</option>
                        <Suspense fallback=|| ()>
                            {move || {
                                departments
                                    .get()
                                    .and_then(Result::ok)
                                    .unwrap_or_default()
                                    .into_iter()
                                    .map(|department| {
                                        view! {
                                            <option value=department.id.to_string()>
                                                {department.label()}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </Suspense>
                    </select>
                </div>
                <Button button_type="submit" disabled=busy>
                    "Register"
                </Button>
                {move || {
                    register_action
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
                <p class="text-center text-sm text-gray-400">
                    "Already registered? "
                    <A href=paths::LOGIN {..} class="text-indigo-400 hover:underline">
                        "Login"
                    </A>
                </p>
            </form>
        </AppShell>
    }
}
