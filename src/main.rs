#[cfg(target_arch = "wasm32")]
use alumni_web::{
    App,
    app_lib::{build_info, logging},
};
#[cfg(target_arch = "wasm32")]
use leptos::prelude::mount_to_body;

#[cfg(target_arch = "wasm32")]
pub fn main() {
    logging::init(false);
    tracing::info!(
        version = build_info::version(),
        commit = build_info::git_commit_hash(),
        "starting alumni web"
    );
    mount_to_body(App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
