//! Session context and hooks for the UI.
//!
//! [`SessionProvider`] is mounted once at the root of the app. It owns the
//! [`SessionStore`] and the [`AuthClient`], hydrates the session after the
//! first render and shares both through context. Components read them with
//! [`use_session`] and [`use_auth_client`]; logging out tears the session down
//! through the same store.

use api::AuthClient;
use dioxus::prelude::*;
use store::KeyValueStore;

use crate::session::SessionStore;

/// Storage backend for the current platform.
pub fn platform_storage() -> Box<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Box::new(store::LocalStorage::new())
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Box::new(store::MemoryStorage::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        match store::FileStorage::in_data_dir("safestock") {
            Some(storage) => Box::new(storage),
            None => Box::new(store::MemoryStorage::new()),
        }
    }
}

/// Origin the auth API is served from.
pub fn api_base_url() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        option_env!("SAFESTOCK_API_URL")
            .unwrap_or("http://127.0.0.1:8080")
            .to_string()
    }
}

/// Get the current session. Updates when the user logs in or out.
pub fn use_session() -> Signal<SessionStore> {
    use_context::<Signal<SessionStore>>()
}

pub fn use_auth_client() -> AuthClient {
    use_context::<AuthClient>()
}

/// Provider component that owns the session for the whole app.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut session = use_signal(|| SessionStore::new(platform_storage()));

    // Hydrate once, after mount.
    use_effect(move || {
        session.write().load();
    });

    use_context_provider(|| session);
    use_context_provider(|| AuthClient::new(api_base_url()));

    rsx! {
        {children}
    }
}

/// Button that ends the current session.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default)] onlogout: EventHandler<()>,
) -> Element {
    let mut session = use_session();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                session.write().logout();
                onlogout.call(());
            },
            "{label}"
        }
    }
}
