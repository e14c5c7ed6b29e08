//! Landing route: the dashboard for the signed-in user's role.

use dioxus::prelude::*;
use ui::{use_session, LogoutButton, RoleDashboard};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let session = use_session();
    let navigator = use_navigator();

    let (loading, signed_in) = {
        let state = session.read();
        (state.loading(), state.is_authenticated())
    };

    if loading {
        return rsx! {
            p { class: "auth-page", "Loading..." }
        };
    }
    if !signed_in {
        navigator.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        nav {
            class: "topbar",
            span { "SafeStock" }
            div {
                Link { to: Route::Settings {}, "Settings" }
                LogoutButton {
                    class: "logout-btn",
                    onlogout: move |_| {
                        navigator.replace(Route::Login {});
                    },
                }
            }
        }
        RoleDashboard {}
    }
}
