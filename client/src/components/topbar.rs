//! Top bar: signed-in user and the logout button.

use leptos::prelude::*;

use crate::net::api::use_api;
use crate::state::session::{SessionContext, initial};

/// Logging out ends the session; the route gate then sends the user to the
/// login page, so nothing here navigates.
#[component]
pub fn Topbar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let api = use_api();
    let busy = RwSignal::new(false);

    let username = move || session.username().unwrap_or_else(|| "User".to_owned());

    let on_logout = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let api = api.clone();
        leptos::task::spawn_local(async move {
            api.logout().await;
            let _ = busy.try_set(false);
        });
    };

    view! {
        <header class="topbar">
            <span class="topbar__spacer"></span>
            <span class="topbar__avatar" aria-hidden="true">{move || initial(&username())}</span>
            <span class="topbar__user">{username}</span>
            <button class="btn topbar__logout" on:click=on_logout disabled=move || busy.get()>
                "Logout"
            </button>
        </header>
    }
}
