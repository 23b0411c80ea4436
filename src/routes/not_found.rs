use crate::{app_lib::paths, components::AppShell};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="flex min-h-[50vh] flex-col items-center justify-center px-4 text-center">
                <h1 class="text-8xl font-black text-gray-700 select-none">"404"</h1>
                <p class="mt-4 text-xl font-semibold text-white">"Page not found"</p>
                <p class="mt-2 max-w-sm text-gray-400">
                    "The page you requested does not exist."
                </p>
                <A
                    href=paths::HOME
                    {..}
                    class="mt-6 rounded-lg bg-indigo-600 px-5 py-2.5 text-sm font-medium text-white hover:bg-indigo-700"
                >
                    "Go Home"
                </A>
            </div>
        </AppShell>
    }
}
