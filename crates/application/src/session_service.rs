//! Session resolution, route guarding, and logout.
//!
//! The persisted session record is the only cross-component shared state in
//! the client. This service is the single read/write API over it: guards,
//! the landing route, and the dashboard selector all resolve the principal
//! through [`SessionService::resolve_principal`], which re-reads and
//! re-parses the stored value on every call.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use managersol_core::{AppResult, Principal, Role};
use managersol_domain::{
    DashboardVariant, LandingDisposition, RedirectTarget, RouteDecision, RouteRule,
    dashboard_variant_for, guard_route, guard_shell, protected_routes, resolve_landing_route,
    rule_for_path,
};

use crate::session_ports::{AuthGateway, SessionStore};

/// Storage key holding the JSON-encoded principal.
pub const AUTH_USER_KEY: &str = "authUser";

/// Storage key holding the cached company identifier.
pub const COMPANY_ID_KEY: &str = "companyId";

/// Application service over the persisted session record.
#[derive(Clone)]
pub struct SessionService {
    durable: Arc<dyn SessionStore>,
    transient: Arc<dyn SessionStore>,
    auth: Arc<dyn AuthGateway>,
    routes: Arc<Vec<RouteRule>>,
}

impl SessionService {
    /// Creates a session service over a durable store (survives restart)
    /// and a session-scoped store (cleared with the process).
    #[must_use]
    pub fn new(
        durable: Arc<dyn SessionStore>,
        transient: Arc<dyn SessionStore>,
        auth: Arc<dyn AuthGateway>,
    ) -> Self {
        Self {
            durable,
            transient,
            auth,
            routes: Arc::new(protected_routes()),
        }
    }

    /// Resolves the current principal from the durable store.
    ///
    /// Absent, unreadable, or malformed stored state all resolve to `None`;
    /// this never fails. The token is not validated locally in any way.
    #[must_use]
    pub fn resolve_principal(&self) -> Option<Principal> {
        let raw = self.durable.get(AUTH_USER_KEY).ok()??;
        serde_json::from_str(raw.as_str()).ok()
    }

    /// Logs in against the backend and persists the session record.
    ///
    /// On success the principal is stored under `authUser` and, when the
    /// account carries one, the company identifier under `companyId`.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Principal> {
        let principal = self.auth.login(email, password).await?;

        let encoded = serde_json::to_string(&principal).map_err(|error| {
            managersol_core::AppError::Internal(format!(
                "failed to encode session record: {error}"
            ))
        })?;
        self.durable.put(AUTH_USER_KEY, encoded.as_str())?;

        if let Some(company_id) = principal.company_id() {
            self.durable.put(COMPANY_ID_KEY, company_id.as_str())?;
        }

        Ok(principal)
    }

    /// Clears the session from both stores and yields the landing route.
    ///
    /// After this returns, [`Self::resolve_principal`] resolves to `None`.
    pub fn logout(&self) -> AppResult<RedirectTarget> {
        for store in [&self.durable, &self.transient] {
            store.remove(AUTH_USER_KEY)?;
            store.remove(COMPANY_ID_KEY)?;
        }

        Ok(RedirectTarget::Landing)
    }

    /// Drops the session after the backend rejected its token.
    ///
    /// The client performs no local expiry check; the backend is the sole
    /// authority on token validity. Any `Unauthorized` backend error should
    /// be routed here, which takes the same clearing path as an explicit
    /// logout.
    pub fn expire(&self) -> AppResult<RedirectTarget> {
        self.logout()
    }

    /// Gates the protected application shell for the current session.
    #[must_use]
    pub fn guard_shell(&self) -> RouteDecision {
        guard_shell(self.resolve_principal().as_ref())
    }

    /// Gates a route restricted to `allowed_roles` for the current session.
    #[must_use]
    pub fn guard_route(&self, allowed_roles: Option<&[Role]>) -> RouteDecision {
        guard_route(self.resolve_principal().as_ref(), allowed_roles)
    }

    /// Gates a concrete path using the protected route table.
    ///
    /// Paths without a rule fall back to the shell rule: any authenticated
    /// principal may view them.
    #[must_use]
    pub fn guard_path(&self, path: &str) -> RouteDecision {
        let principal = self.resolve_principal();
        match rule_for_path(&self.routes, path) {
            Some(rule) => guard_route(principal.as_ref(), rule.allowed_roles()),
            None => guard_route(principal.as_ref(), None),
        }
    }

    /// Resolves what the public landing route shows for the current session.
    #[must_use]
    pub fn landing(&self) -> LandingDisposition {
        resolve_landing_route(self.resolve_principal().as_ref())
    }

    /// Selects the dashboard component for the current session, if its role
    /// has one.
    #[must_use]
    pub fn dashboard_variant(&self) -> Option<DashboardVariant> {
        self.resolve_principal()
            .map(|principal| principal.role())
            .and_then(dashboard_variant_for)
    }
}
