//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_session_store;
mod http_auth_gateway;
mod http_board_gateway;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use http_auth_gateway::HttpAuthGateway;
pub use http_board_gateway::HttpBoardGateway;
pub use in_memory_session_store::InMemorySessionStore;
