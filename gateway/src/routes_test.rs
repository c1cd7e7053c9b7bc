use super::*;
use crate::session::{MemoryStore, Session, SessionGuard};

#[test]
fn protected_renders_only_when_authenticated() {
    assert_eq!(Protected.decide(true), RouteDecision::Render);
    assert_eq!(Protected.decide(false), RouteDecision::Redirect("/login"));
}

#[test]
fn public_only_renders_only_when_signed_out() {
    assert_eq!(PublicOnly.decide(false), RouteDecision::Render);
    assert_eq!(PublicOnly.decide(true), RouteDecision::Redirect("/dashboard"));
}

#[test]
fn persisted_token_lands_on_protected_view() {
    let store = MemoryStore::with_session(Session {
        token: "tok".to_owned(),
        refresh_token: None,
        username: "admin".to_owned(),
    });
    let guard = SessionGuard::restore(store);
    assert_eq!(Protected.decide(guard.is_authenticated()), RouteDecision::Render);
    assert_eq!(PublicOnly.decide(guard.is_authenticated()), RouteDecision::Redirect(HOME_PATH));
}

#[test]
fn guards_work_through_trait_objects() {
    let guards: [&dyn RouteGuard; 2] = [&Protected, &PublicOnly];
    let decisions: Vec<RouteDecision> = guards.iter().map(|g| g.decide(false)).collect();
    assert_eq!(decisions, vec![RouteDecision::Redirect(LOGIN_PATH), RouteDecision::Render]);
}
