//! ManagerSol administrative console runtime.
//!
//! Wires the session service and the ordered assignment board against a
//! live backend: resolves the persisted session (logging in if the
//! environment provides credentials), evaluates the route guards, and, when
//! a group is configured, loads its board and prints the rows.

#![forbid(unsafe_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use managersol_application::{Board, SessionService};
use managersol_core::{AppError, AppResult, Principal};
use managersol_domain::{GroupId, RouteDecision, dashboard_variant_for, protected_routes};
use managersol_infrastructure::{
    FileSessionStore, HttpAuthGateway, HttpBoardGateway, InMemorySessionStore,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct ConsoleConfig {
    api_base_url: String,
    session_file: String,
    login_email: Option<String>,
    login_password: Option<String>,
    group_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let session = SessionService::new(
        Arc::new(FileSessionStore::open(config.session_file.as_str())),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(HttpAuthGateway::new(
            http_client.clone(),
            config.api_base_url.as_str(),
        )),
    );

    let principal = resolve_or_login(&session, &config).await?;
    info!(
        principal_id = %principal.id(),
        role = principal.role().as_str(),
        "session resolved"
    );

    print_guard_decisions(&session);

    match dashboard_variant_for(principal.role()) {
        Some(variant) => info!(dashboard = ?variant, "dashboard variant selected"),
        None => info!("role has no dashboard variant"),
    }

    if let Some(group_id) = config.group_id.clone() {
        sync_board(&session, &http_client, &config, &principal, group_id).await?;
    }

    Ok(())
}

async fn resolve_or_login(
    session: &SessionService,
    config: &ConsoleConfig,
) -> AppResult<Principal> {
    if let Some(principal) = session.resolve_principal() {
        return Ok(principal);
    }

    let (Some(email), Some(password)) = (
        config.login_email.as_deref(),
        config.login_password.as_deref(),
    ) else {
        return Err(AppError::Unauthorized(
            "no stored session; set MANAGERSOL_LOGIN_EMAIL and MANAGERSOL_LOGIN_PASSWORD"
                .to_owned(),
        ));
    };

    info!(email, "no stored session, logging in");
    session.login(email, password).await
}

fn print_guard_decisions(session: &SessionService) {
    for rule in protected_routes() {
        match session.guard_path(rule.path()) {
            RouteDecision::Allow => info!(path = rule.path(), "route allowed"),
            RouteDecision::Redirect(target) => {
                info!(path = rule.path(), redirect = target.path(), "route redirected");
            }
        }
    }
}

async fn sync_board(
    session: &SessionService,
    http_client: &reqwest::Client,
    config: &ConsoleConfig,
    principal: &Principal,
    group_id: String,
) -> AppResult<()> {
    let gateway = Arc::new(HttpBoardGateway::new(
        http_client.clone(),
        config.api_base_url.as_str(),
        principal.token(),
    ));
    let mut board = Board::new(gateway);

    match board.select_group(GroupId::new(group_id)).await {
        Ok(()) => {
            for item in board.items() {
                info!(
                    item_id = item.id(),
                    sort_order = item.sort_order(),
                    column = item.column_number(),
                    mandatory = item.mandatory(),
                    title = item.title().unwrap_or(""),
                    "board row"
                );
            }
            Ok(())
        }
        Err(error) if error.is_unauthorized() => {
            warn!("backend rejected the session token, clearing session");
            let target = session.expire()?;
            info!(redirect = target.path(), "navigate to landing");
            Err(error)
        }
        Err(error) => Err(error),
    }
}

impl ConsoleConfig {
    fn load() -> AppResult<Self> {
        let api_base_url = required_env("MANAGERSOL_API_BASE_URL")?
            .trim_end_matches('/')
            .to_owned();
        url::Url::parse(api_base_url.as_str()).map_err(|error| {
            AppError::Validation(format!(
                "invalid MANAGERSOL_API_BASE_URL '{api_base_url}': {error}"
            ))
        })?;

        let session_file = env::var("MANAGERSOL_SESSION_FILE")
            .unwrap_or_else(|_| ".managersol/session.json".to_owned());

        Ok(Self {
            api_base_url,
            session_file,
            login_email: optional_env("MANAGERSOL_LOGIN_EMAIL"),
            login_password: optional_env("MANAGERSOL_LOGIN_PASSWORD"),
            group_id: optional_env("MANAGERSOL_GROUP_ID"),
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
