//! Route gate over the session context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route in `App` is wrapped in a [`RouteGate`]. The gate subscribes
//! to the session, so when a 401 or a logout ends it the protected tree is
//! swapped for a redirect without any page having to notice.

use gateway::routes::{RouteDecision, RouteGuard};
use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::state::session::SessionContext;

/// Render `children` when `guard` admits the current session, otherwise
/// redirect to the guard's target.
#[component]
pub fn RouteGate<G>(guard: G, children: ChildrenFn) -> impl IntoView
where
    G: RouteGuard + Copy + Send + Sync + 'static,
{
    let session = expect_context::<SessionContext>();

    move || match guard.decide(session.is_authenticated()) {
        RouteDecision::Render => children().into_any(),
        RouteDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}
