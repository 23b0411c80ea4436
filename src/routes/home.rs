//! Landing page.

use crate::{app_lib::paths, components::AppShell, features::auth::state::use_auth};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;

    view! {
        <AppShell>
            <section class="mx-auto max-w-3xl py-16 text-center">
                <h1 class="text-4xl font-bold text-white sm:text-5xl">
                    "Stay connected with your alumni network"
                </h1>
                <p class="mt-6 text-lg text-gray-400">
                    "Find classmates, follow their journeys and keep your own profile up to date."
                </p>
                <div class="mt-10 flex flex-col items-center justify-center gap-4 sm:flex-row">
                    <Show
                        when=move || is_authenticated.get()
                        fallback=|| {
                            view! {
                                <A
                                    href=paths::REGISTER
                                    {..}
                                    class="rounded-lg bg-indigo-600 px-6 py-3 font-medium text-white hover:bg-indigo-700"
                                >
                                    "Join the network"
                                </A>
                                <A
                                    href=paths::LOGIN
                                    {..}
                                    class="rounded-lg border border-gray-600 px-6 py-3 font-medium text-gray-200 hover:bg-gray-800"
                                >
                                    "I already have an account"
                                </A>
                            }
                        }
                    >
                        <A
                            href=paths::PROFILE
                            {..}
                            class="rounded-lg bg-indigo-600 px-6 py-3 font-medium text-white hover:bg-indigo-700"
                        >
                            "Go to my profile"
                        </A>
                    </Show>
                </div>
            </section>
        </AppShell>
    }
}
