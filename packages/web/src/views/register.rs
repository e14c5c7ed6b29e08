//! Registration page view.

use api::{ClientError, RegisterRequest, Role};
use dioxus::prelude::*;
use ui::{use_auth_client, use_session};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut session = use_session();
    let client = use_auth_client();
    let navigator = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut full_name = use_signal(String::new);
    let mut role = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| false);

    if !session.read().loading() && session.read().is_authenticated() {
        navigator.replace(Route::Home {});
    }

    let role_options: Vec<(String, String)> = Role::ALL
        .into_iter()
        .map(|r| (r.as_str().to_string(), r.title().to_string()))
        .collect();

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            field_errors.set(Vec::new());

            let p = password();
            if p != confirm_password() {
                error.set(Some("Passwords do not match".to_string()));
                return;
            }

            let mut request = RegisterRequest::new(username(), email(), p);
            let name = full_name().trim().to_string();
            if !name.is_empty() {
                request = request.with_full_name(name);
            }
            let selected = role();
            if !selected.is_empty() {
                request = request.with_role(Role::from(selected));
            }

            loading.set(true);
            match client.register(&request).await {
                Ok(user) => {
                    session.write().login(user);
                    navigator.replace(Route::Home {});
                }
                Err(e) => {
                    loading.set(false);
                    if let ClientError::Server { errors, .. } = &e {
                        field_errors.set(errors.clone());
                    }
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { "Create Account" }
            p { "Register for SafeStock" }

            form {
                class: "auth-form",
                onsubmit: handle_register,

                if let Some(err) = error() {
                    div {
                        class: "form-error",
                        "{err}"
                        ul {
                            for field_error in field_errors() {
                                li { "{field_error}" }
                            }
                        }
                    }
                }

                input {
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }

                input {
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                input {
                    r#type: "text",
                    placeholder: "Full name (optional)",
                    value: full_name(),
                    oninput: move |evt: FormEvent| full_name.set(evt.value()),
                }

                select {
                    value: role(),
                    onchange: move |evt: FormEvent| role.set(evt.value()),
                    option { value: "", "Select a role (optional)" }
                    for (value, title) in role_options {
                        option { value: "{value}", "{title}" }
                    }
                }

                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: confirm_password(),
                    oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                }

                button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                "Already have an account? "
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
