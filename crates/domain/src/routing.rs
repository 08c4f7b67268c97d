//! Route guard decisions for the protected application shell.
//!
//! Guards are pure: they look only at the resolved [`Principal`] (or its
//! absence) and the rule for the requested path, and they produce a
//! navigation decision. There are exactly two redirect targets in the whole
//! product: the public landing route for missing sessions and the dashboard
//! for wrong-role access. No "forbidden" page exists.

use managersol_core::{Principal, Role};

/// The two navigation targets a guard may redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Public landing route, shown to unauthenticated callers.
    Landing,
    /// Default protected route, shown when the role does not permit a page.
    Dashboard,
}

impl RedirectTarget {
    /// Returns the route path for this target.
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Outcome of evaluating a guard against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested content.
    Allow,
    /// Navigate away before any protected content renders.
    Redirect(RedirectTarget),
}

/// What the public landing route should do for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingDisposition {
    /// No session: render the login view.
    ShowLogin,
    /// Session present: bounce straight to the dashboard.
    RedirectToDashboard,
}

/// Dashboard component selected by role.
///
/// `Role::User` has no dashboard variant in the product; the gap is kept
/// visible as `None` from [`dashboard_variant_for`] rather than hidden
/// behind a fallback view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardVariant {
    /// Cross-company administration dashboard.
    SuperAdmin,
    /// Company administration dashboard.
    Admin,
}

/// Authorization rule for one protected route subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    path: String,
    allowed_roles: Option<Vec<Role>>,
}

impl RouteRule {
    /// Creates a rule for a route path.
    ///
    /// `allowed_roles` of `None` means any authenticated principal may view
    /// the route; an explicit set restricts it to those roles.
    #[must_use]
    pub fn new(path: impl Into<String>, allowed_roles: Option<Vec<Role>>) -> Self {
        Self {
            path: path.into(),
            allowed_roles,
        }
    }

    /// Returns the route path this rule covers.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Returns the roles permitted to view the route, if restricted.
    #[must_use]
    pub fn allowed_roles(&self) -> Option<&[Role]> {
        self.allowed_roles.as_deref()
    }

    /// Returns whether a concrete path falls under this rule.
    ///
    /// Matches the exact path and any nested segment (`/users` covers
    /// `/users/17/edit`).
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path == self.path
            || path
                .strip_prefix(self.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Gates the protected application shell.
///
/// Evaluated synchronously before anything under the shell renders, so an
/// unauthenticated caller never sees an authenticated-looking frame.
#[must_use]
pub fn guard_shell(principal: Option<&Principal>) -> RouteDecision {
    match principal {
        Some(_) => RouteDecision::Allow,
        None => RouteDecision::Redirect(RedirectTarget::Landing),
    }
}

/// Gates one route inside the protected shell.
///
/// No session redirects to the landing route; a session whose role is not
/// in a non-empty `allowed_roles` redirects to the dashboard; everything
/// else is allowed.
#[must_use]
pub fn guard_route(principal: Option<&Principal>, allowed_roles: Option<&[Role]>) -> RouteDecision {
    let Some(principal) = principal else {
        return RouteDecision::Redirect(RedirectTarget::Landing);
    };

    match allowed_roles {
        Some(roles) if !roles.is_empty() && !roles.contains(&principal.role()) => {
            RouteDecision::Redirect(RedirectTarget::Dashboard)
        }
        _ => RouteDecision::Allow,
    }
}

/// Resolves what the public landing route shows.
///
/// Pure function of the session, so repeated evaluation with the same
/// persisted state yields the same disposition.
#[must_use]
pub fn resolve_landing_route(principal: Option<&Principal>) -> LandingDisposition {
    match principal {
        Some(_) => LandingDisposition::RedirectToDashboard,
        None => LandingDisposition::ShowLogin,
    }
}

/// Maps a role to its dashboard component, exhaustively.
#[must_use]
pub fn dashboard_variant_for(role: Role) -> Option<DashboardVariant> {
    match role {
        Role::SuperAdmin => Some(DashboardVariant::SuperAdmin),
        Role::Admin => Some(DashboardVariant::Admin),
        Role::User => None,
    }
}

/// Returns the authorization rules for the protected route surface.
#[must_use]
pub fn protected_routes() -> Vec<RouteRule> {
    vec![
        RouteRule::new("/dashboard", Some(vec![Role::SuperAdmin, Role::Admin])),
        RouteRule::new("/companies", Some(vec![Role::SuperAdmin])),
        RouteRule::new("/users", Some(vec![Role::SuperAdmin, Role::Admin])),
        RouteRule::new("/projects", Some(vec![Role::Admin])),
        RouteRule::new("/zones", Some(vec![Role::Admin])),
        RouteRule::new("/task-elements", Some(vec![Role::Admin])),
        RouteRule::new("/task-groups", Some(vec![Role::Admin])),
        RouteRule::new("/controls", Some(vec![Role::Admin])),
        RouteRule::new("/calendar", Some(vec![Role::Admin])),
        RouteRule::new("/profile", None),
    ]
}

/// Finds the rule covering a concrete path, if the path is protected.
#[must_use]
pub fn rule_for_path(rules: &[RouteRule], path: &str) -> Option<RouteRule> {
    rules.iter().find(|rule| rule.matches(path)).cloned()
}

#[cfg(test)]
mod tests {
    use managersol_core::{Principal, Role};

    use super::{
        DashboardVariant, LandingDisposition, RedirectTarget, RouteDecision, RouteRule,
        dashboard_variant_for, guard_route, guard_shell, protected_routes, resolve_landing_route,
        rule_for_path,
    };

    fn principal_with_role(role: Role) -> Principal {
        Principal::new("u-1", role, "tok", None, None, None, None)
    }

    #[test]
    fn missing_session_redirects_shell_to_landing() {
        assert_eq!(
            guard_shell(None),
            RouteDecision::Redirect(RedirectTarget::Landing)
        );
    }

    #[test]
    fn present_session_allows_shell() {
        let principal = principal_with_role(Role::User);
        assert_eq!(guard_shell(Some(&principal)), RouteDecision::Allow);
    }

    #[test]
    fn missing_session_redirects_route_to_landing() {
        assert_eq!(
            guard_route(None, Some(&[Role::Admin])),
            RouteDecision::Redirect(RedirectTarget::Landing)
        );
    }

    #[test]
    fn wrong_role_redirects_to_dashboard() {
        let principal = principal_with_role(Role::User);
        assert_eq!(
            guard_route(Some(&principal), Some(&[Role::Admin])),
            RouteDecision::Redirect(RedirectTarget::Dashboard)
        );
    }

    #[test]
    fn unrestricted_route_allows_any_session() {
        let principal = principal_with_role(Role::User);
        assert_eq!(guard_route(Some(&principal), None), RouteDecision::Allow);
    }

    #[test]
    fn empty_role_set_allows_any_session() {
        let principal = principal_with_role(Role::User);
        assert_eq!(guard_route(Some(&principal), Some(&[])), RouteDecision::Allow);
    }

    #[test]
    fn matching_role_is_allowed() {
        let principal = principal_with_role(Role::Admin);
        assert_eq!(
            guard_route(Some(&principal), Some(&[Role::SuperAdmin, Role::Admin])),
            RouteDecision::Allow
        );
    }

    #[test]
    fn landing_route_is_idempotent() {
        let principal = principal_with_role(Role::Admin);
        let first = resolve_landing_route(Some(&principal));
        let second = resolve_landing_route(Some(&principal));
        assert_eq!(first, LandingDisposition::RedirectToDashboard);
        assert_eq!(first, second);

        assert_eq!(resolve_landing_route(None), LandingDisposition::ShowLogin);
        assert_eq!(resolve_landing_route(None), LandingDisposition::ShowLogin);
    }

    #[test]
    fn dashboard_variants_are_distinct_and_user_has_none() {
        let super_admin = dashboard_variant_for(Role::SuperAdmin);
        let admin = dashboard_variant_for(Role::Admin);
        assert_eq!(super_admin, Some(DashboardVariant::SuperAdmin));
        assert_eq!(admin, Some(DashboardVariant::Admin));
        assert_ne!(super_admin, admin);
        assert_eq!(dashboard_variant_for(Role::User), None);
    }

    #[test]
    fn rule_matches_exact_and_nested_paths() {
        let rule = RouteRule::new("/users", Some(vec![Role::Admin]));
        assert!(rule.matches("/users"));
        assert!(rule.matches("/users/17/edit"));
        assert!(!rule.matches("/users-archive"));
        assert!(!rule.matches("/projects"));
    }

    #[test]
    fn dashboard_rule_admits_both_admin_roles_only() {
        let rules = protected_routes();
        let rule = rule_for_path(&rules, "/dashboard");
        let principal = principal_with_role(Role::User);
        let decision = rule.map(|rule| guard_route(Some(&principal), rule.allowed_roles()));
        assert_eq!(
            decision,
            Some(RouteDecision::Redirect(RedirectTarget::Dashboard))
        );
    }

    #[test]
    fn unknown_path_has_no_rule() {
        let rules = protected_routes();
        assert!(rule_for_path(&rules, "/reports").is_none());
    }

    #[test]
    fn redirect_targets_expose_the_two_product_paths() {
        assert_eq!(RedirectTarget::Landing.path(), "/");
        assert_eq!(RedirectTarget::Dashboard.path(), "/dashboard");
    }
}
