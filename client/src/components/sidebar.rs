//! Primary navigation for the signed-in views.

use leptos::prelude::*;
use leptos_router::components::A;

const LINKS: [(&str, &str); 4] = [
    ("/dashboard", "Dashboard"),
    ("/drives", "Drives"),
    ("/register", "Register"),
    ("/reports", "Reports"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar__title">"Vaccine Tracker"</div>
            <nav class="sidebar__nav">
                {LINKS
                    .into_iter()
                    .map(|(href, label)| {
                        view! {
                            <A href=href attr:class="sidebar__link">
                                {label}
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}
