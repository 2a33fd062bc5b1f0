//! Routes and the route guard.
//!
//! The presentation layer is external; what the core owns is the guard
//! contract: which routes need a session, which need the admin role, and
//! where a rejected navigation lands.

use slotbook_auth::AuthState;

/// Application routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`: entry point, forwards to the user login form.
    Root,
    /// `/login`: user login form.
    Login,
    /// `/admin/login`: admin login form.
    AdminLogin,
    /// `/events`: event list and booking. Requires a session.
    Events,
    /// `/admin`: event management dashboard. Requires the admin role.
    Admin,
}

impl Route {
    /// The path this route is served under.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::AdminLogin => "/admin/login",
            Self::Events => "/events",
            Self::Admin => "/admin",
        }
    }

    /// Parse a path into a route. Unknown paths are `None`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Root),
            "/login" => Some(Self::Login),
            "/admin/login" => Some(Self::AdminLogin),
            "/events" => Some(Self::Events),
            "/admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// One step of route resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Serve the route.
    Allow(Route),
    /// Navigate elsewhere instead.
    Redirect(Route),
}

/// Resolve a single navigation step against the current session.
///
/// Unauthenticated access to the event list redirects to the user login;
/// non-admin access to the dashboard redirects to the admin login. The
/// root always forwards to the user login form, session or not.
#[must_use]
pub fn resolve(route: Route, auth: &AuthState) -> RouteOutcome {
    match route {
        Route::Root => RouteOutcome::Redirect(Route::Login),
        Route::Login | Route::AdminLogin => RouteOutcome::Allow(route),
        Route::Events => {
            if auth.is_authenticated() {
                RouteOutcome::Allow(route)
            } else {
                RouteOutcome::Redirect(Route::Login)
            }
        },
        Route::Admin => {
            if auth.is_admin() {
                RouteOutcome::Allow(route)
            } else {
                RouteOutcome::Redirect(Route::AdminLogin)
            }
        },
    }
}

/// Resolve redirects until a route is allowed.
///
/// Terminates because every redirect chain ends at a login form, which is
/// always allowed.
#[must_use]
pub fn resolve_fully(mut route: Route, auth: &AuthState) -> Route {
    loop {
        match resolve(route, auth) {
            RouteOutcome::Allow(route) => return route,
            RouteOutcome::Redirect(next) => route = next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotbook_auth::{Role, Session};

    fn logged_in(role: Role) -> AuthState {
        AuthState {
            session: Some(Session {
                email: "someone@example.com".to_owned(),
                role,
            }),
            last_error: None,
        }
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Root,
            Route::Login,
            Route::AdminLogin,
            Route::Events,
            Route::Admin,
        ] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn events_requires_a_session() {
        assert_eq!(
            resolve(Route::Events, &AuthState::new()),
            RouteOutcome::Redirect(Route::Login)
        );
        assert_eq!(
            resolve(Route::Events, &logged_in(Role::User)),
            RouteOutcome::Allow(Route::Events)
        );
    }

    #[test]
    fn admin_requires_the_admin_role() {
        assert_eq!(
            resolve(Route::Admin, &AuthState::new()),
            RouteOutcome::Redirect(Route::AdminLogin)
        );
        assert_eq!(
            resolve(Route::Admin, &logged_in(Role::User)),
            RouteOutcome::Redirect(Route::AdminLogin)
        );
        assert_eq!(
            resolve(Route::Admin, &logged_in(Role::Admin)),
            RouteOutcome::Allow(Route::Admin)
        );
    }

    #[test]
    fn root_lands_on_the_login_form_regardless_of_session() {
        assert_eq!(resolve_fully(Route::Root, &AuthState::new()), Route::Login);
        // A logged-in visit to the root still lands on the login form
        assert_eq!(
            resolve_fully(Route::Root, &logged_in(Role::User)),
            Route::Login
        );
        assert_eq!(
            resolve(Route::Root, &logged_in(Role::Admin)),
            RouteOutcome::Redirect(Route::Login)
        );
    }

    #[test]
    fn login_forms_are_always_reachable() {
        assert_eq!(
            resolve(Route::Login, &AuthState::new()),
            RouteOutcome::Allow(Route::Login)
        );
        assert_eq!(
            resolve(Route::AdminLogin, &logged_in(Role::Admin)),
            RouteOutcome::Allow(Route::AdminLogin)
        );
    }
}
