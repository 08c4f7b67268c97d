use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use managersol_core::{AppError, AppResult, CompanyId, Principal, Role};
use managersol_domain::{
    DashboardVariant, LandingDisposition, RedirectTarget, RouteDecision,
};

use crate::session_ports::{AuthGateway, SessionStore};

use super::{AUTH_USER_KEY, COMPANY_ID_KEY, SessionService};

#[derive(Default)]
struct FakeSessionStore {
    entries: Mutex<HashMap<String, String>>,
    unreadable: bool,
}

impl FakeSessionStore {
    fn unreadable() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            unreadable: true,
        }
    }

    fn seeded(key: &str, value: &str) -> Self {
        let store = Self::default();
        let _ = store.put(key, value);
        store
    }
}

impl SessionStore for FakeSessionStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        if self.unreadable {
            return Err(AppError::Internal("store unavailable".to_owned()));
        }
        Ok(self
            .entries
            .lock()
            .map_err(|_| AppError::Internal("lock poisoned".to_owned()))?
            .get(key)
            .cloned())
    }

    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .lock()
            .map_err(|_| AppError::Internal("lock poisoned".to_owned()))?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries
            .lock()
            .map_err(|_| AppError::Internal("lock poisoned".to_owned()))?
            .remove(key);
        Ok(())
    }
}

struct FakeAuthGateway {
    principal: Principal,
}

#[async_trait]
impl AuthGateway for FakeAuthGateway {
    async fn login(&self, _email: &str, password: &str) -> AppResult<Principal> {
        if password == "wrong" {
            return Err(AppError::Unauthorized("invalid credentials".to_owned()));
        }
        Ok(self.principal.clone())
    }
}

fn admin_principal() -> Principal {
    Principal::new(
        "u-7",
        Role::Admin,
        "tok-7",
        Some("Nadia".to_owned()),
        Some("Bel".to_owned()),
        Some("nadia@managersol.test".to_owned()),
        Some(CompanyId::new("c-3")),
    )
}

fn service_with(durable: FakeSessionStore) -> SessionService {
    SessionService::new(
        Arc::new(durable),
        Arc::new(FakeSessionStore::default()),
        Arc::new(FakeAuthGateway {
            principal: admin_principal(),
        }),
    )
}

fn encoded(principal: &Principal) -> String {
    serde_json::to_string(principal).unwrap_or_default()
}

#[test]
fn absent_session_resolves_to_none() {
    let service = service_with(FakeSessionStore::default());
    assert!(service.resolve_principal().is_none());
}

#[test]
fn malformed_session_values_resolve_to_none() {
    for raw in ["", "not json", "{}", r#"{"id":"u","role":"root","token":"t"}"#, "42"] {
        let service = service_with(FakeSessionStore::seeded(AUTH_USER_KEY, raw));
        assert!(
            service.resolve_principal().is_none(),
            "raw value {raw:?} must resolve to no session"
        );
    }
}

#[test]
fn unreadable_store_resolves_to_none() {
    let service = service_with(FakeSessionStore::unreadable());
    assert!(service.resolve_principal().is_none());
}

#[test]
fn stored_principal_resolves() {
    let principal = admin_principal();
    let service = service_with(FakeSessionStore::seeded(
        AUTH_USER_KEY,
        encoded(&principal).as_str(),
    ));
    assert_eq!(service.resolve_principal(), Some(principal));
}

#[test]
fn shell_guard_redirects_without_session_and_allows_with_one() {
    let service = service_with(FakeSessionStore::default());
    assert_eq!(
        service.guard_shell(),
        RouteDecision::Redirect(RedirectTarget::Landing)
    );

    let service = service_with(FakeSessionStore::seeded(
        AUTH_USER_KEY,
        encoded(&admin_principal()).as_str(),
    ));
    assert_eq!(service.guard_shell(), RouteDecision::Allow);
}

#[test]
fn path_guard_applies_the_route_table() {
    let service = service_with(FakeSessionStore::seeded(
        AUTH_USER_KEY,
        encoded(&admin_principal()).as_str(),
    ));

    assert_eq!(service.guard_path("/dashboard"), RouteDecision::Allow);
    assert_eq!(service.guard_path("/projects/5"), RouteDecision::Allow);
    assert_eq!(
        service.guard_path("/companies"),
        RouteDecision::Redirect(RedirectTarget::Dashboard)
    );
    // Unlisted paths only require an authenticated session.
    assert_eq!(service.guard_path("/reports"), RouteDecision::Allow);
}

#[test]
fn landing_is_idempotent_for_the_same_stored_session() {
    let service = service_with(FakeSessionStore::seeded(
        AUTH_USER_KEY,
        encoded(&admin_principal()).as_str(),
    ));
    assert_eq!(service.landing(), LandingDisposition::RedirectToDashboard);
    assert_eq!(service.landing(), LandingDisposition::RedirectToDashboard);

    let service = service_with(FakeSessionStore::default());
    assert_eq!(service.landing(), LandingDisposition::ShowLogin);
    assert_eq!(service.landing(), LandingDisposition::ShowLogin);
}

#[test]
fn dashboard_variant_follows_the_stored_role() {
    let service = service_with(FakeSessionStore::seeded(
        AUTH_USER_KEY,
        encoded(&admin_principal()).as_str(),
    ));
    assert_eq!(service.dashboard_variant(), Some(DashboardVariant::Admin));

    let user = Principal::new("u-2", Role::User, "t", None, None, None, None);
    let service = service_with(FakeSessionStore::seeded(
        AUTH_USER_KEY,
        encoded(&user).as_str(),
    ));
    assert_eq!(service.dashboard_variant(), None);
}

#[tokio::test]
async fn login_persists_session_and_company_id() {
    let service = service_with(FakeSessionStore::default());

    let principal = service.login("nadia@managersol.test", "pw").await;
    assert!(principal.is_ok());

    assert_eq!(service.resolve_principal(), Some(admin_principal()));
    let cached = service.durable.get(COMPANY_ID_KEY);
    assert!(cached.is_ok_and(|value| value.as_deref() == Some("c-3")));
}

#[tokio::test]
async fn rejected_login_leaves_no_session_behind() {
    let service = service_with(FakeSessionStore::default());

    let outcome = service.login("nadia@managersol.test", "wrong").await;
    assert!(outcome.is_err_and(|error| error.is_unauthorized()));
    assert!(service.resolve_principal().is_none());
}

#[tokio::test]
async fn logout_clears_both_stores_and_navigates_to_landing() {
    let service = service_with(FakeSessionStore::default());
    let logged_in = service.login("nadia@managersol.test", "pw").await;
    assert!(logged_in.is_ok());
    let _ = service.transient.put(AUTH_USER_KEY, "scratch");

    let target = service.logout();
    assert_eq!(target.ok(), Some(RedirectTarget::Landing));
    assert!(service.resolve_principal().is_none());
    let transient_value = service.transient.get(AUTH_USER_KEY);
    assert!(transient_value.is_ok_and(|value| value.is_none()));
}

#[tokio::test]
async fn expire_takes_the_logout_path() {
    let service = service_with(FakeSessionStore::default());
    let logged_in = service.login("nadia@managersol.test", "pw").await;
    assert!(logged_in.is_ok());

    let target = service.expire();
    assert_eq!(target.ok(), Some(RedirectTarget::Landing));
    assert!(service.resolve_principal().is_none());
    assert_eq!(
        service.guard_shell(),
        RouteDecision::Redirect(RedirectTarget::Landing)
    );
}
