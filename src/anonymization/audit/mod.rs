//! Audit logging module
//!
//! Provides a structured audit trail for analysis calls. Matched text is
//! only ever recorded as a SHA-256 hash.

pub mod logger;

pub use logger::{hash_pii_value, AuditLogger};
