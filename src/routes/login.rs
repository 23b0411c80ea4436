use crate::{
    app_lib::{ApiClient, AppError, Navigation, config::AppConfig, paths},
    components::{Alert, AlertKind, AppShell, Button, Spinner},
    features::auth::{client, state::use_auth, types::LoginRequest},
    routes::use_flow,
};
use leptos::{ev::SubmitEvent, prelude::*};
use leptos_router::components::A;
use secrecy::SecretString;

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let flow = use_flow();
    let flash = flow.take_flash();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        async move {
            let api = ApiClient::new(&AppConfig::load())?;
            let request = LoginRequest {
                email: input.email,
                password: SecretString::from(input.password),
            };
            client::login(&api, &request).await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(session) => {
                    auth.set_session(&session);
                    flow.go(Navigation::push(paths::PROFILE));
                }
                Err(err) => set_error.set(Some(client::login_error_message(&err))),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            let err = AppError::Validation("Email and password are required.".to_string());
            set_error.set(Some(client::login_error_message(&err)));
            return;
        }

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
        });
    };

    view! {
        <AppShell>
            <form class="mx-auto max-w-sm space-y-5" on:submit=on_submit>
                <h1 class="text-2xl font-semibold text-white">"Welcome back"</h1>
                {flash.map(|message| view! { <Alert kind=AlertKind::Info message=message /> })}
                <div>
                    <label class="mb-2 block text-sm font-medium text-gray-300" for="email">
                        "Email"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class="block w-full rounded-lg border border-gray-600 bg-gray-800 p-2.5 text-sm text-white focus:border-indigo-500 focus:ring-indigo-500"
                        autocomplete="email"
                        placeholder="you@example.com"
                        required
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label class="mb-2 block text-sm font-medium text-gray-300" for="password">
                        "Password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class="block w-full rounded-lg border border-gray-600 bg-gray-800 p-2.5 text-sm text-white focus:border-indigo-500 focus:ring-indigo-500"
                        autocomplete="current-password"
                        required
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                </div>
                <Button button_type="submit" disabled=login_action.pending()>
                    "Login"
                </Button>
                {move || {
                    login_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="flex justify-center"><Spinner /></div> })
                }}
                {move || {
                    error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                <p class="text-center text-sm text-gray-400">
                    "No account yet? "
                    <A href=paths::REGISTER {..} class="text-indigo-400 hover:underline">
                        "Register"
                    </A>
                </p>
            </form>
        </AppShell>
    }
}
