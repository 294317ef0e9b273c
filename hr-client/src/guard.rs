//! Advisory route guard
//!
//! Keeps forbidden screens from flashing. The server gate is the only
//! security boundary; this guard consults the same shared policy table.

use std::sync::Arc;

use shared::policy::{ClientRoute, RouteAccess};

use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    /// Signed in, but the screen is not for this role
    Redirect(ClientRoute),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: Arc<SessionContext>,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self { session }
    }

    pub fn check(&self, route: ClientRoute) -> GuardDecision {
        let Some(identity) = self.session.identity() else {
            return match route.access() {
                RouteAccess::Public => GuardDecision::Allow,
                _ => GuardDecision::RedirectToLogin,
            };
        };

        if route.access() == RouteAccess::Public {
            return GuardDecision::Redirect(ClientRoute::home_for(identity.role));
        }
        if route.permits(identity.role) {
            GuardDecision::Allow
        } else {
            tracing::debug!(route = route.path(), role = %identity.role, "Route not permitted");
            GuardDecision::Redirect(ClientRoute::Dashboard)
        }
    }

    /// Same as [`check`](Self::check) for a raw path
    pub fn check_path(&self, path: &str) -> GuardDecision {
        self.check(ClientRoute::from_path(path))
    }
}
