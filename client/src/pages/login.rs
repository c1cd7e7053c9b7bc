//! Username + password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route is wrapped in a `PublicOnly` gate. A successful login flips the
//! session context and the gate re-renders as a redirect to the dashboard,
//! so this page never navigates itself. It is disposed by then; late signal
//! writes therefore use `try_set`.

use gateway::error::INVALID_CREDENTIALS_MESSAGE;
use gateway::routes::SIGNUP_PATH;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::api::{error_message, use_api};

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);

        let api = api.clone();
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        leptos::task::spawn_local(async move {
            if let Err(e) = api.login(&user, &pass).await {
                let _ = error.try_set(Some(error_message(&e, INVALID_CREDENTIALS_MESSAGE)));
                let _ = password.try_set(String::new());
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Vaccine Tracker"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "No account? "
                    <A href=SIGNUP_PATH>"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
