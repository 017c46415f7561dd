use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::{AppContext, AppState};
use crate::routes::Route;
use crate::vm::{
    AuthMode, AuthNotice, login_failure_notice, register_failure_notice, registered_notice,
};

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<AppState>();
    let navigator = use_navigator();

    let mut mode = use_signal(|| AuthMode::Login);
    let mut email = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut notice = use_signal(|| None::<AuthNotice>);
    let mut busy = use_signal(|| false);

    let Some(auth) = ctx.auth() else {
        return rsx! {
            div { class: "page auth-page",
                h2 { class: "auth-title", "Zubroslov" }
                p { "Offline mode: no sign-in needed." }
                Link { to: Route::Learn {}, "Start learning" }
            }
        };
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        busy.set(true);
        notice.set(None);
        let auth = auth.clone();
        let ctx = ctx.clone();
        let current_mode = mode();
        let (email_value, username_value, password_value) = (email(), username(), password());
        spawn(async move {
            match current_mode {
                AuthMode::Login => match auth.login(&email_value, &password_value).await {
                    Ok(session) => {
                        state.sign_in(&ctx, session);
                        let _ = navigator.replace(Route::Learn {});
                    }
                    Err(err) => {
                        log::warn!("login failed: {err}");
                        notice.set(Some(login_failure_notice(&err)));
                    }
                },
                AuthMode::Register => {
                    let result = auth
                        .register(&email_value, &username_value, &password_value)
                        .await;
                    match result {
                        Ok(()) => {
                            mode.set(AuthMode::Login);
                            email.set(String::new());
                            password.set(String::new());
                            notice.set(Some(registered_notice()));
                        }
                        Err(err) => {
                            log::warn!("registration failed: {err}");
                            notice.set(Some(register_failure_notice(&err)));
                        }
                    }
                }
            }
            busy.set(false);
        });
    };

    let is_login = mode() == AuthMode::Login;

    rsx! {
        div { class: "page auth-page",
            h2 { class: "auth-title", "Zubroslov" }
            div { class: "auth-tabs",
                button {
                    class: if is_login { "active" } else { "" },
                    r#type: "button",
                    onclick: move |_| {
                        mode.set(AuthMode::Login);
                        notice.set(None);
                    },
                    "Sign in"
                }
                button {
                    class: if is_login { "" } else { "active" },
                    r#type: "button",
                    onclick: move |_| {
                        mode.set(AuthMode::Register);
                        notice.set(None);
                    },
                    "Register"
                }
            }
            if let Some(current) = notice() {
                div { class: current.class(), "{current.text()}" }
            }
            form { onsubmit: submit,
                div { class: "form-group",
                    label { r#for: "auth-email", "Email" }
                    input {
                        id: "auth-email",
                        r#type: "email",
                        placeholder: "you@example.org",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                if !is_login {
                    div { class: "form-group",
                        label { r#for: "auth-username", "Username" }
                        input {
                            id: "auth-username",
                            r#type: "text",
                            value: "{username}",
                            oninput: move |evt| username.set(evt.value()),
                        }
                    }
                }
                div { class: "form-group",
                    label { r#for: "auth-password", "Password" }
                    input {
                        id: "auth-password",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: busy(),
                    if is_login { "Sign in" } else { "Create account" }
                }
            }
        }
    }
}
