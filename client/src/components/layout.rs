//! Shell shared by every signed-in page.

use leptos::prelude::*;
use leptos_router::components::Outlet;

use super::sidebar::Sidebar;
use super::topbar::Topbar;

#[component]
pub fn ProtectedLayout() -> impl IntoView {
    view! {
        <div class="shell">
            <Sidebar/>
            <div class="shell__main">
                <Topbar/>
                <main class="shell__content">
                    <Outlet/>
                </main>
            </div>
        </div>
    }
}
