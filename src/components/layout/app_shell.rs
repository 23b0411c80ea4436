//! Page chrome: navigation bar reflecting the session, content container and a
//! footer with build details. Links are client-side only; the backend enforces
//! access control.

use crate::{
    app_lib::{build_info, paths},
    features::auth::{guards, state::use_auth},
    routes::use_flow,
};
use leptos::prelude::*;
use leptos_router::components::A;

const LINK_CLASS: &str = "block rounded px-3 py-2 text-gray-300 hover:text-white md:p-0";

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let auth = use_auth();
    let flow = use_flow();
    let is_authenticated = auth.is_authenticated;
    let user = auth.user;
    let display_name = move || {
        user.get()
            .and_then(|user| user.name().map(str::to_string))
            .unwrap_or_default()
    };

    view! {
        <div class="flex min-h-screen flex-col bg-gray-900 text-gray-100">
            <header class="border-b border-gray-800">
                <nav class="mx-auto flex max-w-screen-xl flex-wrap items-center justify-between p-4">
                    <A href=paths::HOME {..} class="text-lg font-semibold text-white">
                        "Alumni Network"
                    </A>
                    <button
                        type="button"
                        class="inline-flex h-10 w-10 items-center justify-center rounded-lg text-gray-400 hover:bg-gray-800 md:hidden"
                        aria-expanded=move || menu_open.get().to_string()
                        on:click=move |_| set_menu_open.update(|open| *open = !*open)
                    >
                        <span class="sr-only">"Open main menu"</span>
                        "☰"
                    </button>
                    <div class="w-full md:block md:w-auto" class:hidden=move || !menu_open.get()>
                        <ul class="mt-4 flex flex-col gap-2 font-medium md:mt-0 md:flex-row md:items-center md:gap-8">
                            <li>
                                <A href=paths::HOME {..} class=LINK_CLASS>
                                    "Home"
                                </A>
                            </li>
                            <Show
                                when=move || is_authenticated.get()
                                fallback=move || {
                                    view! {
                                        <li>
                                            <A href=paths::REGISTER {..} class=LINK_CLASS>
                                                "Register"
                                            </A>
                                        </li>
                                        <li>
                                            <A href=paths::LOGIN {..} class=LINK_CLASS>
                                                "Login"
                                            </A>
                                        </li>
                                    }
                                }
                            >
                                <li>
                                    <A href=paths::PROFILE {..} class=LINK_CLASS>
                                        {display_name}
                                    </A>
                                </li>
                                <li>
                                    <button
                                        type="button"
                                        class=LINK_CLASS
                                        on:click={
                                            let auth = auth.clone();
                                            move |_| {
                                                let navigation = guards::logout(&auth.store);
                                                auth.refresh();
                                                set_menu_open.set(false);
                                                flow.go(navigation);
                                            }
                                        }
                                    >
                                        "Logout"
                                    </button>
                                </li>
                            </Show>
                        </ul>
                    </div>
                </nav>
            </header>
            <main class="flex-1">
                <div class="container mx-auto mt-6 p-4">{children()}</div>
            </main>
            <footer class="border-t border-gray-800 p-4 text-center text-xs text-gray-500">
                {format!(
                    "Alumni Network v{} ({})",
                    build_info::version(),
                    build_info::git_commit_hash(),
                )}
            </footer>
        </div>
    }
}
