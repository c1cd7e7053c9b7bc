//! Route gating as a pure function of the authentication flag.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const HOME_PATH: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(&'static str),
}

/// A guard over the "requires authentication" capability.
pub trait RouteGuard {
    /// Whether the guarded view is for signed-in users.
    fn requires_authentication(&self) -> bool;

    /// Where to send a visitor in the wrong state.
    fn redirect_to(&self) -> &'static str;

    fn decide(&self, authenticated: bool) -> RouteDecision {
        if authenticated == self.requires_authentication() {
            RouteDecision::Render
        } else {
            RouteDecision::Redirect(self.redirect_to())
        }
    }
}

/// Signed-in views; visitors go to the login page.
#[derive(Clone, Copy, Debug, Default)]
pub struct Protected;

impl RouteGuard for Protected {
    fn requires_authentication(&self) -> bool {
        true
    }

    fn redirect_to(&self) -> &'static str {
        LOGIN_PATH
    }
}

/// Login and signup; signed-in users go to the dashboard.
#[derive(Clone, Copy, Debug, Default)]
pub struct PublicOnly;

impl RouteGuard for PublicOnly {
    fn requires_authentication(&self) -> bool {
        false
    }

    fn redirect_to(&self) -> &'static str {
        HOME_PATH
    }
}
