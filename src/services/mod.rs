// Service exports
pub mod audit;
pub mod sessions;

pub use audit::{extract_client_ip, AuditLog, ClientContext};
pub use sessions::{SessionStats, SessionStore};
