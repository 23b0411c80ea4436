//! Reactive auth context for the views. The persisted [`SessionStore`] stays the
//! source of truth; the signals mirror it so navigation chrome updates when the
//! session changes.

use crate::{
    app_lib::storage::BrowserStore,
    features::auth::{
        session::{Session, SessionStore},
        types::UserRecord,
    },
};
use leptos::prelude::*;
use std::sync::Arc;

#[derive(Clone)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    pub store: SessionStore,
    pub user: RwSignal<Option<UserRecord>>,
    pub is_authenticated: RwSignal<bool>,
}

impl AuthContext {
    fn new(store: SessionStore) -> Self {
        let user = RwSignal::new(store.user());
        let is_authenticated = RwSignal::new(store.is_authenticated());
        Self {
            store,
            user,
            is_authenticated,
        }
    }

    /// Persists the login result and updates the signals.
    pub fn set_session(&self, session: &Session) {
        self.store.store(session);
        self.refresh();
    }

    /// Clears the persisted session, typically on logout or expiry.
    pub fn clear_session(&self) {
        self.store.clear_session();
        self.refresh();
    }

    /// Re-reads the store, e.g. after a call cleared an expired session.
    pub fn refresh(&self) {
        self.user.set(self.store.user());
        self.is_authenticated.set(self.store.is_authenticated());
    }
}

/// Provides the auth context backed by `localStorage`.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new(SessionStore::new(Arc::new(BrowserStore)));
    provide_context(auth);

    view! { {children()} }
}

/// Returns the current auth context or a fresh one reading the same storage.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .unwrap_or_else(|| AuthContext::new(SessionStore::new(Arc::new(BrowserStore))))
}
