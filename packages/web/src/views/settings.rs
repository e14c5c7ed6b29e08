//! Account settings: change password and log out.

use api::ChangePasswordRequest;
use dioxus::prelude::*;
use ui::{use_auth_client, use_session, LogoutButton};

use crate::Route;

#[component]
pub fn Settings() -> Element {
    let session = use_session();
    let client = use_auth_client();
    let navigator = use_navigator();
    let mut current_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut status = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let (loading, user) = {
        let state = session.read();
        (state.loading(), state.user().cloned())
    };
    if loading {
        return rsx! {
            p { class: "auth-page", "Loading..." }
        };
    }
    let Some(user) = user else {
        navigator.replace(Route::Login {});
        return rsx! {};
    };
    let username = user.username.clone();
    let signed_in_as = format!("Signed in as {} ({})", user.username, user.email);

    let handle_change = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let username = username.clone();
        spawn(async move {
            error.set(None);
            status.set(None);

            let new = new_password();
            if new != confirm_password() {
                error.set(Some("New passwords do not match".to_string()));
                return;
            }

            saving.set(true);
            let request = ChangePasswordRequest::new(username, current_password(), new);
            match client.change_password(&request).await {
                Ok(()) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    status.set(Some("Password changed".to_string()));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    rsx! {
        nav {
            class: "topbar",
            Link { to: Route::Home {}, "Back to dashboard" }
            LogoutButton {
                class: "logout-btn",
                onlogout: move |_| {
                    navigator.replace(Route::Login {});
                },
            }
        }

        div {
            class: "auth-page",

            h1 { "Account" }
            p { "{signed_in_as}" }

            form {
                class: "auth-form",
                onsubmit: handle_change,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }
                if let Some(message) = status() {
                    div { class: "form-success", "{message}" }
                }

                input {
                    r#type: "password",
                    placeholder: "Current password",
                    value: current_password(),
                    oninput: move |evt: FormEvent| current_password.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "New password (min 6 characters)",
                    value: new_password(),
                    oninput: move |evt: FormEvent| new_password.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Confirm new password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Change password" }
                }
            }
        }
    }
}
