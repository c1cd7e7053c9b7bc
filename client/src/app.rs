//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is restored from `localStorage` exactly once, here. Both the
//! session context and the API client built over it are provided to the whole
//! tree; every route is wrapped in a gate that reads the former.

use gateway::SessionGuard;
use gateway::routes::{Protected, PublicOnly};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::StaticSegment;
use leptos_router::components::{ParentRoute, Route, Router, Routes};

use crate::components::guard::RouteGate;
use crate::components::layout::ProtectedLayout;
use crate::net::api::{build_config, new_api};
use crate::net::storage::BrowserStorage;
use crate::pages::{
    dashboard::DashboardPage, drives::DrivesPage, login::LoginPage, reports::ReportsPage, signup::SignupPage,
    students::StudentsPage,
};
use crate::state::session::SessionContext;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionContext::new(SessionGuard::restore(BrowserStorage));
    provide_context(session);
    provide_context(new_api(build_config(), session));

    view! {
        <Title text="Vaccine Tracker"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <RouteGate guard=PublicOnly><LoginPage/></RouteGate> }
                />
                <Route
                    path=StaticSegment("signup")
                    view=|| view! { <RouteGate guard=PublicOnly><SignupPage/></RouteGate> }
                />
                <ParentRoute
                    path=StaticSegment("")
                    view=|| view! { <RouteGate guard=Protected><ProtectedLayout/></RouteGate> }
                >
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("drives") view=DrivesPage/>
                    <Route path=StaticSegment("register") view=StudentsPage/>
                    <Route path=StaticSegment("reports") view=ReportsPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
