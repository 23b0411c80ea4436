//! Inline banners for flow messages. Messages come from the backend or from
//! fixed copy and never include credentials.

use leptos::prelude::*;

#[derive(Clone, Copy)]
pub enum AlertKind {
    Error,
    Success,
    Info,
}

#[component]
pub fn Alert(kind: AlertKind, #[prop(into)] message: String) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => {
            "rounded-lg border border-red-500/40 bg-red-500/10 px-4 py-3 text-sm text-red-300"
        }
        AlertKind::Success => {
            "rounded-lg border border-emerald-500/40 bg-emerald-500/10 px-4 py-3 text-sm text-emerald-300"
        }
        AlertKind::Info => {
            "rounded-lg border border-indigo-500/40 bg-indigo-500/10 px-4 py-3 text-sm text-indigo-200"
        }
    };

    view! { <div class=class role="alert">{message}</div> }
}
