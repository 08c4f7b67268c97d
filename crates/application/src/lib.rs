//! Application services and ports.

#![forbid(unsafe_code)]

mod board_ports;
mod board_service;
mod session_ports;
mod session_service;

pub use board_ports::{AssignElementInput, BoardGateway};
pub use board_service::{Board, BoardPhase, CommitOutcome};
pub use session_ports::{AuthGateway, SessionStore};
pub use session_service::{AUTH_USER_KEY, COMPANY_ID_KEY, SessionService};
