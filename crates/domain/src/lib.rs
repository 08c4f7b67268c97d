//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod board;
mod routing;

pub use board::{
    FIRST_COLUMN, GroupId, GroupMembershipItem, ReorderEntry, ReorderPayload,
    build_reorder_payload, relocate,
};
pub use routing::{
    DashboardVariant, LandingDisposition, RedirectTarget, RouteDecision, RouteRule,
    dashboard_variant_for, guard_route, guard_shell, protected_routes, resolve_landing_route,
    rule_for_path,
};
